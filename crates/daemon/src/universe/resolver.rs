//! Package resolver used in rich mode

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use gopaths_core::Environment;
use gopaths_core::import_path::{clean, to_slash};
use parser::ImportsOnlyParser;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use super::PackagePaths;

/// Resolves importable package paths, optionally with display names.
///
/// Implementations return one mapping per source of packages; callers merge
/// them in order, so later mappings win on collision.
pub trait PackageResolver: Send + Sync {
  fn resolve_package_paths(&self, env: &Environment, roots: &[&str], want_names: bool) -> Vec<PackagePaths>;
}

/// Resolver reading package sources under `<root>/src`.
///
/// Every directory holding a non-test `.go` file is a package; its name is
/// taken from the package clause of the first such file. Packages named in
/// `roots` (e.g. `main`) are programs, not libraries, and are left out.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceTreeResolver;

const SOURCE_SUBDIR: &str = "src";

impl PackageResolver for SourceTreeResolver {
  fn resolve_package_paths(&self, env: &Environment, roots: &[&str], want_names: bool) -> Vec<PackagePaths> {
    let mut parser = match ImportsOnlyParser::new() {
      Ok(parser) => parser,
      Err(e) => {
        warn!("Package resolver unavailable: {}", e);
        return Vec::new();
      }
    };

    env
      .candidate_roots()
      .into_iter()
      .map(|root| {
        let src_root = root.join(SOURCE_SUBDIR);
        let paths = scan_sources(&src_root, roots, want_names, &mut parser);
        debug!(root = %src_root.display(), count = paths.len(), "Resolved source packages");
        paths
      })
      .collect()
  }
}

fn scan_sources(src_root: &Path, excluded: &[&str], want_names: bool, parser: &mut ImportsOnlyParser) -> PackagePaths {
  let mut paths = PackagePaths::new();

  let walker = WalkDir::new(src_root)
    .follow_links(false)
    .sort_by_file_name()
    .into_iter()
    .filter_entry(|e| e.depth() == 0 || !e.file_type().is_dir() || !is_skipped_dir(e));

  for entry in walker.filter_map(|e| e.ok()) {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
      continue;
    }

    let Some(name) = package_in_dir(entry.path(), parser) else {
      continue;
    };
    if excluded.contains(&name.as_str()) {
      continue;
    }

    let Some(import_path) = entry.path().strip_prefix(src_root).ok().and_then(to_slash) else {
      continue;
    };

    let display = if want_names { name } else { String::new() };
    paths.insert(clean(&import_path), display);
  }

  paths
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
  let name = entry.file_name().to_string_lossy();
  name.starts_with('.') || name.starts_with('_') || name == "testdata"
}

fn is_package_source(path: &Path) -> bool {
  let Some(name) = path.file_name().and_then(OsStr::to_str) else {
    return false;
  };
  name.ends_with(".go")
    && !name.ends_with("_test.go")
    && !name.starts_with('.')
    && !name.starts_with('_')
    && path.is_file()
}

/// Package name declared by the first parseable source file in `dir`
fn package_in_dir(dir: &Path, parser: &mut ImportsOnlyParser) -> Option<String> {
  let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
    .ok()?
    .filter_map(|e| e.ok())
    .map(|e| e.path())
    .filter(|p| is_package_source(p))
    .collect();
  files.sort();

  files.iter().find_map(|file| {
    let text = std::fs::read_to_string(file).ok()?;
    parser.package_name(&text)
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use gopaths_core::Ambient;
  use pretty_assertions::assert_eq;
  use std::collections::HashMap;
  use tempfile::TempDir;

  fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(SOURCE_SUBDIR).join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
  }

  fn env_with_roots(gopath: &Path, goroot: &Path) -> Environment {
    let named = HashMap::from([
      ("GOPATH".to_string(), gopath.to_string_lossy().into_owned()),
      ("GOROOT".to_string(), goroot.to_string_lossy().into_owned()),
    ]);
    Environment::new(named, Ambient::none())
  }

  fn merged(mappings: Vec<PackagePaths>) -> PackagePaths {
    mappings.into_iter().flatten().collect()
  }

  fn fixture() -> (TempDir, TempDir) {
    let gopath = TempDir::new().unwrap();
    let goroot = TempDir::new().unwrap();

    write(goroot.path(), "fmt/print.go", "package fmt\n");
    write(goroot.path(), "net/http/server.go", "// Package http\npackage http\n\nimport \"io\"\n");
    write(goroot.path(), "net/http/server_test.go", "package http_test\n");
    write(goroot.path(), "cmd/gofmt/main.go", "package main\n\nfunc main() {}\n");
    write(goroot.path(), "fmt/testdata/data.go", "package data\n");
    write(goroot.path(), "docs/README.md", "no go here");

    write(gopath.path(), "example.com/lib/lib.go", "package lib\n");
    write(gopath.path(), "example.com/lib/.hidden/x.go", "package x\n");
    write(gopath.path(), "example.com/lib/_vendor/y.go", "package y\n");
    write(gopath.path(), "example.com/only_tests/a_test.go", "package only\n");
    write(gopath.path(), "example.com/broken/b.go", "func nope() {}\n");
    write(gopath.path(), "example.com/broken/c.go", "package broken\n");

    (gopath, goroot)
  }

  #[test]
  fn test_resolves_packages_with_names() {
    let (gopath, goroot) = fixture();
    let env = env_with_roots(gopath.path(), goroot.path());

    let mappings = SourceTreeResolver.resolve_package_paths(&env, &["main"], true);
    assert_eq!(mappings.len(), 2);

    let paths = merged(mappings);
    let expected: PackagePaths = [
      ("example.com/broken", "broken"),
      ("example.com/lib", "lib"),
      ("fmt", "fmt"),
      ("net/http", "http"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    assert_eq!(paths, expected);
  }

  #[test]
  fn test_names_omitted_when_not_wanted() {
    let (gopath, goroot) = fixture();
    let env = env_with_roots(gopath.path(), goroot.path());

    let paths = merged(SourceTreeResolver.resolve_package_paths(&env, &["main"], false));
    assert!(paths.contains_key("net/http"));
    assert!(paths.values().all(String::is_empty));
  }

  #[test]
  fn test_root_names_are_excluded() {
    let (gopath, goroot) = fixture();
    let env = env_with_roots(gopath.path(), goroot.path());

    let with_main = merged(SourceTreeResolver.resolve_package_paths(&env, &[], true));
    assert_eq!(with_main.get("cmd/gofmt").map(String::as_str), Some("main"));

    let without_main = merged(SourceTreeResolver.resolve_package_paths(&env, &["main"], true));
    assert!(!without_main.contains_key("cmd/gofmt"));
  }

  #[test]
  fn test_missing_roots_yield_empty_mappings() {
    let temp = TempDir::new().unwrap();
    let env = env_with_roots(&temp.path().join("a"), &temp.path().join("b"));

    let mappings = SourceTreeResolver.resolve_package_paths(&env, &["main"], true);
    assert_eq!(mappings.len(), 2);
    assert!(mappings.iter().all(PackagePaths::is_empty));
  }
}
