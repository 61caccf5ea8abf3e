use serde::{Deserialize, Serialize};

use crate::Method;

/// JSON-RPC style error codes
pub mod error_codes {
  pub const PARSE_ERROR: i32 = -32700;
  pub const METHOD_NOT_FOUND: i32 = -32601;
  pub const INVALID_PARAMS: i32 = -32602;
  pub const INTERNAL_ERROR: i32 = -32603;
  /// The operation ran and reported a failure
  pub const CALL_FAILED: i32 = -32000;
}

/// A request as read off the wire.
///
/// `method` stays a string so unknown methods can be reported back instead
/// of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<serde_json::Value>,
  pub method: String,
  #[serde(default)]
  pub params: serde_json::Value,
}

impl Request {
  /// Build a request from typed params
  pub fn new<P: Serialize>(id: Option<serde_json::Value>, method: Method, params: P) -> Result<Self, serde_json::Error> {
    Ok(Self {
      id,
      method: method.as_str().to_string(),
      params: serde_json::to_value(params)?,
    })
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id: Option<serde_json::Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub result: Option<serde_json::Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<RpcError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcError {
  pub code: i32,
  pub message: String,
}

impl Response {
  /// Create a success response with a typed result (serializes to JSON value)
  pub fn success<T: Serialize>(id: Option<serde_json::Value>, result: T) -> Self {
    match serde_json::to_value(result) {
      Ok(value) => Self {
        id,
        result: Some(value),
        error: None,
      },
      Err(e) => Self::error(id, error_codes::INTERNAL_ERROR, &format!("Serialization error: {}", e)),
    }
  }

  pub fn error(id: Option<serde_json::Value>, code: i32, message: &str) -> Self {
    Self {
      id,
      result: None,
      error: Some(RpcError {
        code,
        message: message.to_string(),
      }),
    }
  }

  /// A failed call that still carries a (usually empty) payload
  pub fn failure(id: Option<serde_json::Value>, payload: serde_json::Value, code: i32, message: &str) -> Self {
    Self {
      result: Some(payload),
      ..Self::error(id, code, message)
    }
  }

  /// Decode the result, turning an error response into `IpcError::Rpc`
  pub fn into_result<R: serde::de::DeserializeOwned>(self) -> Result<R, crate::IpcError> {
    if let Some(error) = self.error {
      return Err(crate::IpcError::Rpc {
        code: error.code,
        message: error.message,
      });
    }
    let value = self.result.ok_or(crate::IpcError::NoResult)?;
    Ok(serde_json::from_value(value)?)
  }
}
