//! Locating the end of a Go file header
//!
//! The header is the package clause plus the import declarations. Only that
//! prefix is handed to tree-sitter, so a broken body can never turn the
//! whole tree into an error.

/// Byte offset where the header ends.
///
/// The header ends at the first top-level statement that starts with a
/// token other than `package` or `import`. Illegal characters do not end
/// it; they stay in the header and surface as syntax errors.
pub(crate) fn header_end(text: &str) -> usize {
  let mut pos = 0;
  let mut depth = 0usize;
  let mut stmt_start = true;

  while let Some(c) = text[pos..].chars().next() {
    let rest = &text[pos..];

    if c == '\n' {
      stmt_start |= depth == 0;
      pos += 1;
    } else if matches!(c, ' ' | '\t' | '\r') {
      pos += 1;
    } else if rest.starts_with("//") {
      pos += rest.find('\n').unwrap_or(rest.len());
    } else if rest.starts_with("/*") {
      let len = rest[2..].find("*/").map_or(rest.len(), |p| p + 4);
      // a block comment spanning lines acts as a newline
      stmt_start |= depth == 0 && rest[..len].contains('\n');
      pos += len;
    } else {
      if depth == 0 && stmt_start && !continues_header(rest) {
        return pos;
      }
      match c {
        '(' | '[' | '{' => depth += 1,
        ')' | ']' | '}' => depth = depth.saturating_sub(1),
        _ => {}
      }
      stmt_start = depth == 0 && c == ';';
      pos += token_len(rest);
    }
  }

  text.len()
}

/// Length in bytes of the token at the start of `rest`
pub(crate) fn token_len(rest: &str) -> usize {
  let Some(c) = rest.chars().next() else {
    return 0;
  };

  match c {
    '"' | '\'' => quoted_len(rest, c),
    '`' => rest[1..].find('`').map_or(rest.len(), |p| p + 2),
    c if c.is_ascii_digit() => rest
      .find(|ch: char| !(ch.is_alphanumeric() || ch == '_' || ch == '.'))
      .unwrap_or(rest.len()),
    _ => match ident_len(rest) {
      0 => c.len_utf8(),
      n => n,
    },
  }
}

fn continues_header(rest: &str) -> bool {
  match ident_len(rest) {
    0 => rest.chars().next().is_some_and(is_illegal),
    n => matches!(&rest[..n], "package" | "import"),
  }
}

fn ident_len(rest: &str) -> usize {
  let mut chars = rest.char_indices();
  match chars.next() {
    Some((_, c)) if c.is_alphabetic() || c == '_' => {}
    _ => return 0,
  }
  chars
    .find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
    .map_or(rest.len(), |(i, _)| i)
}

/// Interpreted string or rune literal; unterminated literals stop at the
/// end of the line
fn quoted_len(rest: &str, quote: char) -> usize {
  let mut escaped = false;
  for (i, c) in rest.char_indices().skip(1) {
    match c {
      '\n' => return i,
      '\\' if !escaped => escaped = true,
      c if c == quote && !escaped => return i + 1,
      _ => escaped = false,
    }
  }
  rest.len()
}

/// Characters that start no Go token
fn is_illegal(c: char) -> bool {
  !(c.is_alphanumeric() || c == '_' || "+-*/%&|^<>=!()[]{},;.:~\"'`".contains(c))
}
