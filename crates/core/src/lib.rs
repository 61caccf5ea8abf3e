//! Core types shared across gopaths crates
//!
//! - [`Environment`]: the per-request view of search roots and platform
//! - [`Config`]: user configuration
//! - [`import_path`]: slash-path normalization for import paths

mod config;
mod env;
pub mod import_path;

pub use config::{Config, ConfigError, DaemonConfig, PathsConfig};
pub use env::{Ambient, Environment, GOARCH, GOOS, RootVar, discover_toolchain_root, host_platform_tag};
