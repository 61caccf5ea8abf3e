use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PingParams;

/// Parameters for `import_paths`.
///
/// Go-style field names (`Fn`, `Src`, ...) are accepted as aliases.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ImportPathsParams {
  /// Source filename; read from disk when `src` is empty
  #[serde(default, rename = "fn", alias = "Fn")]
  pub filename: String,
  /// Inline source text
  #[serde(default, alias = "Src")]
  pub src: String,
  /// Variable overrides (`GOPATH`, `GOROOT`, `GOOS`, `GOARCH`)
  #[serde(default, alias = "Env")]
  pub env: HashMap<String, String>,
  /// Use the archive scan instead of the package resolver
  #[serde(default, alias = "UseLegacyImports")]
  pub use_legacy_imports: bool,
  /// Ask the package resolver for display names
  #[serde(default, alias = "WantPkgNames")]
  pub want_pkg_names: bool,
}
