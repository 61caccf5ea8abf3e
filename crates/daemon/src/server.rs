//! Line-delimited JSON server.
//!
//! # Protocol
//!
//! - Requests: JSON objects, one per line
//! - Responses: JSON objects, one per line, matched to requests by `id`
//!
//! # Threading Model
//!
//! - Each request runs in its own spawned task, so responses may be written
//!   out of order
//! - A single writer task owns the output stream
//! - End of input stops reading; in-flight requests still get answered

use std::sync::Arc;
use std::time::Instant;

use futures::{SinkExt, StreamExt};
use ipc::{IpcError, Request, Response, error_codes};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec, LinesCodecError};
use tracing::{debug, info, warn};

use crate::router::Router;

pub struct Server {
  router: Arc<Router>,
}

impl Server {
  pub fn new(router: Arc<Router>) -> Self {
    Self { router }
  }

  /// Serve requests from stdin, answering on stdout
  pub async fn run_stdio(&self) -> Result<(), IpcError> {
    self.run(tokio::io::stdin(), tokio::io::stdout()).await
  }

  /// Serve requests from `reader` until end of input
  pub async fn run<R, W>(&self, reader: R, writer: W) -> Result<(), IpcError>
  where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
  {
    let mut lines = FramedRead::new(reader, LinesCodec::new());
    let (tx, mut rx) = mpsc::unbounded_channel::<Response>();

    let writer_task = tokio::spawn(async move {
      let mut sink = FramedWrite::new(writer, LinesCodec::new());
      while let Some(response) = rx.recv().await {
        let json = serde_json::to_string(&response)?;
        sink.send(json).await.map_err(codec_error)?;
      }
      Ok::<(), IpcError>(())
    });

    info!("Server ready");
    let mut received = 0u64;

    while let Some(result) = lines.next().await {
      let line = match result {
        Ok(l) => l,
        Err(e) => {
          warn!(error = %e, "Error reading request");
          break;
        }
      };

      let trimmed = line.trim();
      if trimmed.is_empty() {
        continue;
      }
      received += 1;

      let request: Request = match serde_json::from_str(trimmed) {
        Ok(r) => r,
        Err(e) => {
          warn!("Invalid request JSON: {}", e);
          let _ = tx.send(Response::error(None, error_codes::PARSE_ERROR, &format!("Parse error: {}", e)));
          continue;
        }
      };

      let router = Arc::clone(&self.router);
      let tx = tx.clone();
      tokio::spawn(async move {
        let start = Instant::now();
        let method = request.method.clone();
        let response = router.handle(request).await;
        debug!(
          method = %method,
          elapsed_ms = start.elapsed().as_millis() as u64,
          "Request completed"
        );
        let _ = tx.send(response);
      });
    }

    drop(tx);
    debug!(requests = received, "Input closed, draining responses");

    match writer_task.await {
      Ok(result) => result,
      Err(e) => Err(IpcError::Connection(std::io::Error::other(e))),
    }
  }
}

fn codec_error(e: LinesCodecError) -> IpcError {
  match e {
    LinesCodecError::Io(e) => IpcError::Connection(e),
    other => IpcError::Connection(std::io::Error::other(other)),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::tools::create_test_handler;
  use crate::universe::SourceTreeResolver;
  use std::collections::HashMap;
  use tokio::io::AsyncReadExt;

  async fn serve(input: &str) -> HashMap<String, Response> {
    let router = Arc::new(Router::with_handler(create_test_handler(Arc::new(SourceTreeResolver))));
    let server = Server::new(router);
    let (writer, mut output) = tokio::io::duplex(64 * 1024);

    server.run(input.as_bytes(), writer).await.unwrap();

    let mut text = String::new();
    output.read_to_string(&mut text).await.unwrap();
    text
      .lines()
      .map(|line| {
        let response: Response = serde_json::from_str(line).unwrap();
        let key = response.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
        (key, response)
      })
      .collect()
  }

  #[tokio::test]
  async fn test_serves_multiple_requests() {
    let input = concat!(
      r#"{"id":1,"method":"ping"}"#,
      "\n\n",
      r#"{"id":2,"method":"import_paths","params":{"src":"package p\nimport \"fmt\"","use_legacy_imports":true}}"#,
      "\n",
      r#"{"id":3,"method":"nope"}"#,
      "\n",
    );

    let responses = serve(input).await;
    assert_eq!(responses.len(), 3);

    assert_eq!(responses["1"].result, Some(serde_json::json!("pong")));
    assert_eq!(
      responses["2"].result,
      Some(serde_json::json!({"imports": [{"path": "fmt"}], "paths": {"unsafe": ""}}))
    );
    assert_eq!(
      responses["3"].error.as_ref().unwrap().code,
      error_codes::METHOD_NOT_FOUND
    );
  }

  #[tokio::test]
  async fn test_invalid_json_gets_parse_error() {
    let responses = serve("{not json\n").await;
    let response = &responses[""];
    assert_eq!(response.error.as_ref().unwrap().code, error_codes::PARSE_ERROR);
  }

  #[tokio::test]
  async fn test_empty_input() {
    assert!(serve("").await.is_empty());
  }
}
