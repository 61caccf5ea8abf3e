//! Universe of importable package paths
//!
//! Two resolution strategies produce the same result shape:
//! - [`ResolutionMode::LegacyScan`] walks compiled archives under each
//!   search root (`<root>/pkg/<os_arch>/**/*.a`)
//! - [`ResolutionMode::Rich`] delegates to a [`PackageResolver`], which may
//!   also supply display names
//!
//! Every call starts from empty state; nothing is cached between calls.

mod legacy;
mod resolver;

use std::collections::BTreeMap;

use gopaths_core::Environment;
use tracing::debug;

pub use legacy::{ARCHIVE_SUBDIR, legacy_package_paths};
pub use resolver::{PackageResolver, SourceTreeResolver};

/// Package path -> display name (empty when unknown)
pub type PackagePaths = BTreeMap<String, String>;

/// Pseudo-package that has no archive but is always importable
pub const BUILTIN_PACKAGE: &str = "unsafe";

/// Root package names handed to the rich resolver
pub const ROOT_PACKAGE_NAMES: &[&str] = &["main"];

/// How package paths are discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMode {
  LegacyScan,
  Rich { want_names: bool },
}

impl ResolutionMode {
  /// Map the request flags onto a mode; `want_names` only matters for `Rich`
  pub fn from_flags(legacy: bool, want_names: bool) -> Self {
    if legacy {
      ResolutionMode::LegacyScan
    } else {
      ResolutionMode::Rich { want_names }
    }
  }
}

/// Compute the importable package paths visible to `env`.
///
/// Never fails: unreadable roots simply contribute nothing.
pub fn compute_package_paths(env: &Environment, mode: ResolutionMode, resolver: &dyn PackageResolver) -> PackagePaths {
  let paths = match mode {
    ResolutionMode::LegacyScan => legacy_package_paths(env),
    ResolutionMode::Rich { want_names } => {
      let mut paths = PackagePaths::new();
      for mapping in resolver.resolve_package_paths(env, ROOT_PACKAGE_NAMES, want_names) {
        paths.extend(mapping);
      }
      paths
    }
  };

  debug!(?mode, count = paths.len(), "Computed package paths");
  paths
}

#[cfg(test)]
mod tests {
  use super::*;
  use gopaths_core::Ambient;
  use std::collections::HashMap;
  use std::sync::Mutex;

  /// Resolver returning canned mappings and recording its arguments
  struct FakeResolver {
    mappings: Vec<PackagePaths>,
    calls: Mutex<Vec<(Vec<String>, bool)>>,
  }

  impl FakeResolver {
    fn new(mappings: Vec<PackagePaths>) -> Self {
      Self {
        mappings,
        calls: Mutex::new(Vec::new()),
      }
    }
  }

  impl PackageResolver for FakeResolver {
    fn resolve_package_paths(&self, _env: &Environment, roots: &[&str], want_names: bool) -> Vec<PackagePaths> {
      self
        .calls
        .lock()
        .unwrap()
        .push((roots.iter().map(|r| r.to_string()).collect(), want_names));
      self.mappings.clone()
    }
  }

  fn mapping(pairs: &[(&str, &str)]) -> PackagePaths {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
  }

  fn empty_env() -> Environment {
    Environment::new(HashMap::new(), Ambient::none())
  }

  #[test]
  fn test_mode_from_flags() {
    assert_eq!(ResolutionMode::from_flags(true, true), ResolutionMode::LegacyScan);
    assert_eq!(ResolutionMode::from_flags(true, false), ResolutionMode::LegacyScan);
    assert_eq!(
      ResolutionMode::from_flags(false, true),
      ResolutionMode::Rich { want_names: true }
    );
  }

  #[test]
  fn test_rich_mode_merges_with_later_entries_winning() {
    let resolver = FakeResolver::new(vec![
      mapping(&[("fmt", "fmt"), ("net/http", "")]),
      mapping(&[("net/http", "http"), ("example.com/x", "x")]),
    ]);

    let paths = compute_package_paths(&empty_env(), ResolutionMode::Rich { want_names: true }, &resolver);

    assert_eq!(
      paths,
      mapping(&[("example.com/x", "x"), ("fmt", "fmt"), ("net/http", "http")])
    );
    let calls = resolver.calls.lock().unwrap();
    assert_eq!(calls.as_slice(), &[(vec!["main".to_string()], true)]);
  }

  #[test]
  fn test_rich_mode_has_no_synthetic_entry() {
    let resolver = FakeResolver::new(Vec::new());
    let paths = compute_package_paths(&empty_env(), ResolutionMode::Rich { want_names: false }, &resolver);
    assert!(paths.is_empty());
  }

  #[test]
  fn test_legacy_mode_ignores_resolver() {
    let resolver = FakeResolver::new(vec![mapping(&[("fmt", "fmt")])]);
    let paths = compute_package_paths(&empty_env(), ResolutionMode::LegacyScan, &resolver);

    assert_eq!(paths, mapping(&[(BUILTIN_PACKAGE, "")]));
    assert!(resolver.calls.lock().unwrap().is_empty());
  }
}
