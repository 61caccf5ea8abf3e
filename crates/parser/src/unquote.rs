//! Go string literal decoding for import paths

/// Decode a Go string literal.
///
/// Raw literals (`` `...` ``) are returned verbatim without the backquotes.
/// Interpreted literals (`"..."`) have their escapes decoded. If the literal
/// is malformed, the surrounding quotes are trimmed and the rest is returned
/// unchanged.
pub fn unquote(literal: &str) -> String {
  if let Some(inner) = literal.strip_prefix('`').and_then(|s| s.strip_suffix('`')) {
    return inner.replace('\r', "");
  }

  if let Some(inner) = literal.strip_prefix('"').and_then(|s| s.strip_suffix('"'))
    && let Some(decoded) = decode_escapes(inner)
  {
    return decoded;
  }

  literal.trim_matches(|c| c == '"' || c == '`').to_string()
}

fn decode_escapes(s: &str) -> Option<String> {
  if !s.contains('\\') {
    return Some(s.to_string());
  }

  let mut out = String::with_capacity(s.len());
  let mut chars = s.chars();

  while let Some(c) = chars.next() {
    if c != '\\' {
      out.push(c);
      continue;
    }

    match chars.next()? {
      'a' => out.push('\u{07}'),
      'b' => out.push('\u{08}'),
      'f' => out.push('\u{0C}'),
      'n' => out.push('\n'),
      'r' => out.push('\r'),
      't' => out.push('\t'),
      'v' => out.push('\u{0B}'),
      '\\' => out.push('\\'),
      '"' => out.push('"'),
      'x' => out.push(char::from_u32(read_digits(&mut chars, 2, 16)?)?),
      'u' => out.push(char::from_u32(read_digits(&mut chars, 4, 16)?)?),
      'U' => out.push(char::from_u32(read_digits(&mut chars, 8, 16)?)?),
      d @ '0'..='7' => {
        let rest = read_digits(&mut chars, 2, 8)?;
        let value = d.to_digit(8)? * 64 + rest;
        out.push(char::from_u32(value).filter(|_| value <= 0xFF)?);
      }
      _ => return None,
    }
  }

  Some(out)
}

fn read_digits(chars: &mut std::str::Chars<'_>, count: usize, radix: u32) -> Option<u32> {
  let mut value = 0u32;
  for _ in 0..count {
    value = value * radix + chars.next()?.to_digit(radix)?;
  }
  Some(value)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_interpreted_literal() {
    assert_eq!(unquote("\"fmt\""), "fmt");
    assert_eq!(unquote("\"net/http\""), "net/http");
  }

  #[test]
  fn test_raw_literal() {
    assert_eq!(unquote("`github.com/lib/pq`"), "github.com/lib/pq");
    assert_eq!(unquote("`a\\nb`"), "a\\nb");
  }

  #[test]
  fn test_escapes() {
    assert_eq!(unquote(r#""a\x2fb""#), "a/b");
    assert_eq!(unquote(r#""été""#), "été");
    assert_eq!(unquote(r#""a\057b""#), "a/b");
    assert_eq!(unquote(r#""tab\there""#), "tab\there");
  }

  #[test]
  fn test_malformed_literal_falls_back() {
    assert_eq!(unquote(r#""bad\qescape""#), r"bad\qescape");
    assert_eq!(unquote("\"unterminated"), "unterminated");
    assert_eq!(unquote("plain"), "plain");
  }
}
