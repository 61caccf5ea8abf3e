//! Archive scan over `<root>/pkg/<os_arch>`
//!
//! Best effort: a missing root, an unreadable directory or an entry whose
//! relative path cannot be computed is skipped, never reported.

use std::path::Path;

use gopaths_core::Environment;
use gopaths_core::import_path::{clean, to_slash};
use tracing::{debug, trace};
use walkdir::WalkDir;

use super::{BUILTIN_PACKAGE, PackagePaths};

/// Directory under each root holding compiled archives
pub const ARCHIVE_SUBDIR: &str = "pkg";

const ARCHIVE_EXT: &str = ".a";

/// Every package path with a compiled archive under any candidate root,
/// plus the builtin package.
pub fn legacy_package_paths(env: &Environment) -> PackagePaths {
  let mut paths = PackagePaths::new();
  paths.insert(BUILTIN_PACKAGE.to_string(), String::new());

  for root in env.candidate_roots() {
    let scan_root = root.join(ARCHIVE_SUBDIR).join(env.platform_tag());
    let before = paths.len();
    scan_archives(&scan_root, &mut paths);
    debug!(root = %scan_root.display(), added = paths.len() - before, "Scanned archive root");
  }

  paths
}

fn scan_archives(scan_root: &Path, paths: &mut PackagePaths) {
  for entry in WalkDir::new(scan_root).follow_links(false) {
    let entry = match entry {
      Ok(entry) => entry,
      Err(e) => {
        trace!(error = %e, "Skipping unreadable entry");
        continue;
      }
    };

    if entry.file_type().is_dir() {
      continue;
    }

    if let Some(import_path) = archive_import_path(scan_root, entry.path()) {
      paths.entry(import_path).or_default();
    }
  }
}

/// Import path for an archive file, or `None` if it is not an importable
/// package (hidden, underscore-prefixed, test archive, not an archive).
fn archive_import_path(scan_root: &Path, path: &Path) -> Option<String> {
  let rel = path.strip_prefix(scan_root).ok()?;
  let rel = rel.to_str()?;
  let stem = rel.strip_suffix(ARCHIVE_EXT)?;

  if stem.is_empty() || stem.starts_with('.') || stem.starts_with('_') || stem.ends_with("_test") {
    return None;
  }

  let slashed = to_slash(Path::new(stem))?;
  Some(clean(&slashed))
}
