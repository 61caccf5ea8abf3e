//! Common test utilities for daemon integration tests
//!
//! Routers built here never read the process environment: search roots come
//! only from the request's `env` overrides or the pinned ambient values.

use daemon::{Router, SourceTreeResolver, ToolHandler};
use gopaths_core::{Ambient, PathsConfig};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

pub const PLATFORM: &str = "linux_amd64";

/// Router with no ambient roots and a fixed platform tag
#[allow(dead_code)]
pub fn create_test_router() -> Router {
  create_router_with_ambient(Ambient::none())
}

#[allow(dead_code)]
pub fn create_router_with_ambient(ambient: Ambient) -> Router {
  let paths = PathsConfig {
    toolchain_root: None,
    platform: Some(PLATFORM.to_string()),
  };
  Router::with_handler(ToolHandler::with_resolver(paths, Arc::new(SourceTreeResolver)).with_ambient(ambient))
}

/// Create an empty archive at `<root>/pkg/<platform>/<rel>`
#[allow(dead_code)]
pub fn touch_archive(root: &Path, rel: &str) {
  let path = root.join("pkg").join(PLATFORM).join(rel);
  std::fs::create_dir_all(path.parent().expect("archive has a parent")).expect("Failed to create archive dir");
  std::fs::write(path, b"!<arch>\n").expect("Failed to write archive");
}

/// Write a source file at `<root>/src/<rel>`
#[allow(dead_code)]
pub fn write_source(root: &Path, rel: &str, content: &str) {
  let path = root.join("src").join(rel);
  std::fs::create_dir_all(path.parent().expect("source has a parent")).expect("Failed to create source dir");
  std::fs::write(path, content).expect("Failed to write source");
}

#[allow(dead_code)]
pub fn temp_root() -> TempDir {
  TempDir::new().expect("Failed to create temp root")
}
