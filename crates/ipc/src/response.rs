use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResult(pub String);

/// One import as reported to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDecl {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportPathsResult {
  /// Imports written in the source, in file order
  pub imports: Vec<ImportDecl>,
  /// Importable package path -> display name (possibly empty)
  pub paths: BTreeMap<String, String>,
}
