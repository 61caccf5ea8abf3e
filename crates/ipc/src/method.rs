use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
  // Meta
  Ping,
  // Imports
  ImportPaths,
}

impl Method {
  /// Wire name of the method
  pub fn as_str(&self) -> &'static str {
    match self {
      Method::Ping => "ping",
      Method::ImportPaths => "import_paths",
    }
  }
}

impl std::fmt::Display for Method {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_wire_names_match_serde() {
    for method in [Method::Ping, Method::ImportPaths] {
      let value = serde_json::to_value(method).unwrap();
      assert_eq!(value.as_str(), Some(method.as_str()));
    }
  }
}
