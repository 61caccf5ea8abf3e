//! Imports-only parsing and import declaration extraction
//!
//! The parser only requires the package clause and the import block to be
//! well formed. Whatever follows the last import declaration is never
//! inspected, so editor buffers with half-written function bodies still
//! yield their imports.

use std::borrow::Cow;
use std::path::PathBuf;

use tree_sitter::{Language as TsLanguage, Node, Parser, Tree};

use crate::error::ParseError;
use crate::header::{header_end, token_len};
use crate::unquote::unquote;

/// A source unit to extract imports from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceUnit {
  pub filename: String,
  /// Inline buffer contents; when empty the file is read from disk
  pub text: String,
}

impl SourceUnit {
  pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
    Self {
      filename: filename.into(),
      text: text.into(),
    }
  }

  /// True when there is nothing to scan
  pub fn is_empty(&self) -> bool {
    self.filename.is_empty() && self.text.is_empty()
  }

  /// The text to parse: inline text, else the named file, else nothing
  fn load(&self) -> Result<Cow<'_, str>, ParseError> {
    if !self.text.is_empty() || self.filename.is_empty() {
      return Ok(Cow::Borrowed(&self.text));
    }
    let bytes = std::fs::read(&self.filename).map_err(|source| ParseError::Read {
      path: PathBuf::from(&self.filename),
      source,
    })?;
    Ok(Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()))
  }
}

/// One import written in a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
  /// Explicit local name, including `_` and `.`
  pub alias: Option<String>,
  pub path: String,
}

/// A single import spec as written, path still quoted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
  pub name: Option<String>,
  pub path_literal: String,
}

/// One `import` declaration: a single spec or a parenthesized group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportGroup {
  pub specs: Vec<ImportSpec>,
}

/// Declarations tree produced by imports-only parsing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportFile {
  /// `None` only for input with no tokens at all
  pub package: Option<String>,
  pub groups: Vec<ImportGroup>,
}

/// Go parser restricted to the package clause and import declarations
pub struct ImportsOnlyParser {
  parser: Parser,
}

impl ImportsOnlyParser {
  pub fn new() -> Result<Self, ParseError> {
    let language: TsLanguage = tree_sitter_go::LANGUAGE.into();
    let mut parser = Parser::new();
    parser.set_language(&language)?;
    Ok(Self { parser })
  }

  /// Parse the header of a Go file.
  ///
  /// `filename` is only used to label error positions.
  pub fn parse(&mut self, filename: &str, text: &str) -> Result<ImportFile, ParseError> {
    let end = header_end(text);
    let header = &text[..end];
    let tree = self.parse_tree(header)?;
    let root = tree.root_node();
    let src = header.as_bytes();

    if root.is_error() {
      return Err(syntax_error(filename, root, src));
    }

    let mut cursor = root.walk();
    let nodes: Vec<Node<'_>> = root
      .named_children(&mut cursor)
      .filter(|n| n.kind() != "comment")
      .collect();

    let mut nodes = nodes.into_iter();
    let Some(first) = nodes.next() else {
      let rest = &text[end..];
      if rest.is_empty() {
        return Ok(ImportFile::default());
      }
      return Err(ParseError::Syntax {
        position: offset_position(filename, text, end),
        message: format!("expected 'package', found '{}'", &rest[..token_len(rest)]),
      });
    };

    if first.kind() != "package_clause" {
      if first.has_error() {
        return Err(syntax_error(filename, first, src));
      }
      return Err(ParseError::Syntax {
        position: position(filename, first),
        message: format!("expected 'package', found '{}'", first_token(first, src)),
      });
    }
    if first.has_error() {
      return Err(syntax_error(filename, first, src));
    }

    let mut file = ImportFile {
      package: package_identifier(first, src),
      groups: Vec::new(),
    };

    for node in nodes {
      match node.kind() {
        "import_declaration" => {
          if node.has_error() {
            return Err(syntax_error(filename, node, src));
          }
          file.groups.push(import_group(node, src));
        }
        "ERROR" => return Err(syntax_error(filename, node, src)),
        _ => break,
      }
    }

    Ok(file)
  }

  /// Package clause name of a Go file, if the header parses
  pub fn package_name(&mut self, text: &str) -> Option<String> {
    self.parse("", text).ok().and_then(|file| file.package)
  }

  fn parse_tree(&mut self, text: &str) -> Result<Tree, ParseError> {
    self.parser.parse(text, None).ok_or(ParseError::NoTree)
  }
}

/// Extracts the import declarations written in a source unit
pub struct ImportExtractor {
  parser: ImportsOnlyParser,
}

impl ImportExtractor {
  pub fn new() -> Result<Self, ParseError> {
    Ok(Self {
      parser: ImportsOnlyParser::new()?,
    })
  }

  /// Imports in file order, one entry per spec, nothing merged or dropped.
  ///
  /// A unit with neither filename nor text yields no imports.
  pub fn extract(&mut self, unit: &SourceUnit) -> Result<Vec<ImportDeclaration>, ParseError> {
    let text = unit.load()?;
    let file = self.parser.parse(&unit.filename, &text)?;

    if unit.is_empty() {
      return Ok(Vec::new());
    }

    let imports = file
      .groups
      .into_iter()
      .flat_map(|group| group.specs)
      .map(|spec| ImportDeclaration {
        alias: spec.name,
        path: unquote(&spec.path_literal),
      })
      .collect();

    Ok(imports)
  }
}

/// Convenience wrapper creating a fresh extractor
pub fn extract_imports(unit: &SourceUnit) -> Result<Vec<ImportDeclaration>, ParseError> {
  ImportExtractor::new()?.extract(unit)
}

fn import_group(decl: Node<'_>, src: &[u8]) -> ImportGroup {
  let mut specs = Vec::new();
  let mut cursor = decl.walk();

  for child in decl.named_children(&mut cursor) {
    match child.kind() {
      "import_spec" => specs.extend(import_spec(child, src)),
      "import_spec_list" => {
        let mut list_cursor = child.walk();
        specs.extend(
          child
            .named_children(&mut list_cursor)
            .filter(|n| n.kind() == "import_spec")
            .filter_map(|n| import_spec(n, src)),
        );
      }
      _ => {}
    }
  }

  ImportGroup { specs }
}

fn import_spec(spec: Node<'_>, src: &[u8]) -> Option<ImportSpec> {
  let path_literal = spec.child_by_field_name("path")?.utf8_text(src).ok()?.to_string();
  let name = spec
    .child_by_field_name("name")
    .and_then(|n| n.utf8_text(src).ok())
    .map(str::to_string);

  Some(ImportSpec { name, path_literal })
}

fn package_identifier(clause: Node<'_>, src: &[u8]) -> Option<String> {
  let mut cursor = clause.walk();
  clause
    .named_children(&mut cursor)
    .find(|n| n.kind() == "package_identifier")
    .and_then(|n| n.utf8_text(src).ok())
    .map(str::to_string)
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
  if node.is_error() || node.is_missing() {
    return Some(node);
  }
  if !node.has_error() {
    return None;
  }
  let mut cursor = node.walk();
  let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
  children.into_iter().find_map(first_error)
}

fn first_token<'a>(node: Node<'a>, src: &'a [u8]) -> &'a str {
  let mut current = node;
  loop {
    let mut cursor = current.walk();
    let next = current.children(&mut cursor).next();
    match next {
      Some(child) => current = child,
      None => break,
    }
  }
  match current.utf8_text(src) {
    Ok("") | Err(_) => "EOF",
    Ok(text) => text,
  }
}

fn position(filename: &str, node: Node<'_>) -> String {
  let point = node.start_position();
  format_position(filename, point.row, point.column)
}

/// Position of a byte offset, columns counted in bytes like tree-sitter
fn offset_position(filename: &str, text: &str, offset: usize) -> String {
  let before = &text[..offset];
  let row = before.matches('\n').count();
  let column = offset - before.rfind('\n').map_or(0, |p| p + 1);
  format_position(filename, row, column)
}

fn format_position(filename: &str, row: usize, column: usize) -> String {
  if filename.is_empty() {
    format!("{}:{}", row + 1, column + 1)
  } else {
    format!("{}:{}:{}", filename, row + 1, column + 1)
  }
}

fn syntax_error(filename: &str, scope: Node<'_>, src: &[u8]) -> ParseError {
  let at = first_error(scope).unwrap_or(scope);
  let message = if at.is_missing() {
    let expected = match at.kind() {
      "identifier" | "package_identifier" => "identifier",
      "interpreted_string_literal" | "raw_string_literal" => "string literal",
      kind => kind,
    };
    format!("expected '{}'", expected)
  } else {
    format!("unexpected '{}'", first_token(at, src))
  };

  ParseError::Syntax {
    position: position(filename, at),
    message,
  }
}
