//! Import path normalization
//!
//! Import paths are always slash-separated regardless of host platform, and
//! are compared in their lexically cleaned form.

use std::path::{MAIN_SEPARATOR, Path};

/// Convert a relative filesystem path into a slash-separated string.
///
/// Returns `None` for paths that are not valid UTF-8.
pub fn to_slash(path: &Path) -> Option<String> {
  let s = path.to_str()?;
  if MAIN_SEPARATOR == '/' {
    Some(s.to_string())
  } else {
    Some(s.replace(MAIN_SEPARATOR, "/"))
  }
}

/// Lexically clean a slash-separated path.
///
/// - Repeated slashes collapse to one
/// - `.` segments are removed
/// - `..` removes the preceding segment; at the root it is dropped,
///   in a relative path with nothing left to remove it is kept
/// - An empty result becomes `.`
pub fn clean(path: &str) -> String {
  if path.is_empty() {
    return ".".to_string();
  }

  let rooted = path.starts_with('/');
  let mut segments: Vec<&str> = Vec::new();

  for segment in path.split('/') {
    match segment {
      "" | "." => {}
      ".." => match segments.last() {
        Some(&last) if last != ".." => {
          segments.pop();
        }
        _ if rooted => {}
        _ => segments.push(".."),
      },
      s => segments.push(s),
    }
  }

  let joined = segments.join("/");
  match (rooted, joined.is_empty()) {
    (true, _) => format!("/{}", joined),
    (false, true) => ".".to_string(),
    (false, false) => joined,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_clean_already_clean() {
    assert_eq!(clean("net/http"), "net/http");
    assert_eq!(clean("fmt"), "fmt");
  }

  #[test]
  fn test_clean_redundant_segments() {
    assert_eq!(clean("net//http"), "net/http");
    assert_eq!(clean("./net/./http/"), "net/http");
    assert_eq!(clean("net/x/../http"), "net/http");
  }

  #[test]
  fn test_clean_leading_parent() {
    assert_eq!(clean("../a"), "../a");
    assert_eq!(clean("a/../../b"), "../b");
    assert_eq!(clean("/../a"), "/a");
  }

  #[test]
  fn test_clean_empty() {
    assert_eq!(clean(""), ".");
    assert_eq!(clean("a/.."), ".");
    assert_eq!(clean("/"), "/");
  }

  #[test]
  fn test_to_slash() {
    let path: std::path::PathBuf = ["net", "http"].iter().collect();
    assert_eq!(to_slash(&path).as_deref(), Some("net/http"));
  }
}
