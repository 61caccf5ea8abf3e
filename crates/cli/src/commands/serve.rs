//! Serve command

use anyhow::{Context, Result};
use daemon::{Router, Server};
use gopaths_core::Config;
use std::sync::Arc;
use tracing::info;

/// Answer line-delimited JSON requests on stdin/stdout until stdin closes
pub async fn cmd_serve(config: &Config) -> Result<()> {
  let router = Arc::new(Router::new(config));
  let server = Server::new(Arc::clone(&router));

  info!("Starting gopaths server on stdio");
  server.run_stdio().await.context("Failed to run server")?;
  info!(requests = router.request_count(), "Server stopped");

  Ok(())
}
