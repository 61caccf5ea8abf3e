//! Go import path service
//!
//! Answers `import_paths` requests over line-delimited JSON: the imports a
//! source file declares plus every package path importable from the
//! configured search roots.

pub mod router;
mod server;
mod tools;
pub mod universe;

pub use ipc::{Request, Response};
pub use router::Router;
pub use server::Server;
pub use tools::{ToolHandler, import_paths};
pub use universe::{
  BUILTIN_PACKAGE, PackagePaths, PackageResolver, ResolutionMode, SourceTreeResolver, compute_package_paths,
  legacy_package_paths,
};
