//! Tree-sitter based Go header parsing for gopaths
//!
//! This crate provides:
//! - Imports-only parsing of Go source (package clause + import block)
//! - Extraction of the import declarations written in a source unit
//!
//! # Example
//! ```ignore
//! use parser::{SourceUnit, extract_imports};
//!
//! let unit = SourceUnit::new("", "package p\nimport x \"os\"");
//! let imports = extract_imports(&unit)?;
//! assert_eq!(imports[0].alias.as_deref(), Some("x"));
//! ```

mod error;
mod header;
mod imports;
mod unquote;

pub use error::ParseError;
pub use imports::{
  ImportDeclaration, ImportExtractor, ImportFile, ImportGroup, ImportSpec, ImportsOnlyParser, SourceUnit,
  extract_imports,
};
pub use unquote::unquote;
