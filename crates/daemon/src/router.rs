use crate::tools::ToolHandler;
use gopaths_core::Config;
use ipc::{PingResult, Request, Response, error_codes};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Request router: maps method names to handlers
pub struct Router {
  tool_handler: Arc<ToolHandler>,
  /// Total requests handled
  request_count: AtomicU64,
}

impl Router {
  pub fn new(config: &Config) -> Self {
    Self::with_handler(ToolHandler::new(config.paths.clone()))
  }

  pub fn with_handler(tool_handler: ToolHandler) -> Self {
    Self {
      tool_handler: Arc::new(tool_handler),
      request_count: AtomicU64::new(0),
    }
  }

  pub fn request_count(&self) -> u64 {
    self.request_count.load(Ordering::Relaxed)
  }

  /// Handle an incoming request
  pub async fn handle(&self, request: Request) -> Response {
    debug!("Handling request: {}", request.method);
    self.request_count.fetch_add(1, Ordering::Relaxed);

    match request.method.as_str() {
      "ping" => Response::success(request.id, PingResult("pong".to_string())),
      "import_paths" => self.tool_handler.import_paths(request).await,

      _ => {
        warn!("Unknown method: {}", request.method);
        Response::error(
          request.id,
          error_codes::METHOD_NOT_FOUND,
          &format!("Method not found: {}", request.method),
        )
      }
    }
  }
}

impl Default for Router {
  fn default() -> Self {
    Self::new(&Config::default())
  }
}
