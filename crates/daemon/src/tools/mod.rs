//! Tool handlers for requests
//!
//! This module provides the ToolHandler struct and the tool methods it
//! exposes to the router.

mod imports;

pub use imports::import_paths;

use gopaths_core::{Ambient, Environment, GOARCH, GOOS, PathsConfig};
use std::collections::HashMap;
use std::sync::Arc;

use crate::universe::{PackageResolver, SourceTreeResolver};

/// Handler for tool calls
pub struct ToolHandler {
  pub(crate) resolver: Arc<dyn PackageResolver>,
  pub(crate) paths: PathsConfig,
  /// Fixed ambient values; read from the process per request when `None`
  pub(crate) ambient: Option<Ambient>,
}

impl ToolHandler {
  pub fn new(paths: PathsConfig) -> Self {
    Self {
      resolver: Arc::new(SourceTreeResolver),
      paths,
      ambient: None,
    }
  }

  pub fn with_resolver(paths: PathsConfig, resolver: Arc<dyn PackageResolver>) -> Self {
    Self {
      resolver,
      paths,
      ambient: None,
    }
  }

  /// Pin the ambient values instead of reading the process environment
  pub fn with_ambient(mut self, ambient: Ambient) -> Self {
    self.ambient = Some(ambient);
    self
  }
}

/// Assemble the per-request environment.
///
/// Request `GOOS`/`GOARCH` beat the configured platform, which beats the host.
pub(crate) fn build_environment(
  overrides: HashMap<String, String>,
  paths: &PathsConfig,
  ambient: Option<Ambient>,
) -> Environment {
  let ambient = ambient.unwrap_or_else(|| Ambient::from_process(paths.toolchain_root.as_deref()));
  let platform_requested = [GOOS, GOARCH]
    .iter()
    .any(|name| overrides.get(*name).is_some_and(|v| !v.is_empty()));

  let env = Environment::new(overrides, ambient);
  match &paths.platform {
    Some(platform) if !platform_requested => env.with_platform_tag(platform.clone()),
    _ => env,
  }
}

#[cfg(test)]
pub(crate) fn create_test_handler(resolver: Arc<dyn PackageResolver>) -> ToolHandler {
  ToolHandler::with_resolver(PathsConfig::default(), resolver).with_ambient(Ambient::none())
}
