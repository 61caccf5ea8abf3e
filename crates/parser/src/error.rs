use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
  #[error("failed to load Go grammar: {0}")]
  Language(#[from] tree_sitter::LanguageError),

  #[error("parser produced no syntax tree")]
  NoTree,

  #[error("open {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Position is `file:line:col`, or `line:col` for unnamed input
  #[error("{position}: {message}")]
  Syntax { position: String, message: String },
}
