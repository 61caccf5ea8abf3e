//! One-shot `import_paths` call from the command line

use anyhow::{Context, Result, bail};
use daemon::Router;
use gopaths_core::Config;
use ipc::{ImportPathsParams, ImportPathsResult, Method, Request};
use std::collections::HashMap;
use std::path::Path;

/// Parse `KEY=VALUE` pairs into environment overrides
pub fn parse_env_overrides(pairs: &[String]) -> Result<HashMap<String, String>> {
  pairs
    .iter()
    .map(|pair| match pair.split_once('=') {
      Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
      _ => bail!("Invalid environment override '{}', expected KEY=VALUE", pair),
    })
    .collect()
}

/// Print the imports of `file` and the importable package paths as JSON
pub async fn cmd_imports(
  config: &Config,
  file: Option<&Path>,
  src: Option<String>,
  legacy: bool,
  names: bool,
  env: &[String],
) -> Result<()> {
  let params = ImportPathsParams {
    filename: file.map(|f| f.to_string_lossy().into_owned()).unwrap_or_default(),
    src: src.unwrap_or_default(),
    env: parse_env_overrides(env)?,
    use_legacy_imports: legacy,
    want_pkg_names: names,
  };

  let router = Router::new(config);
  let request = Request::new(Some(serde_json::json!(1)), Method::ImportPaths, params)
    .context("Failed to build request")?;
  let response = router.handle(request).await;

  let result: ImportPathsResult = response.into_result().context("import_paths failed")?;
  println!("{}", serde_json::to_string_pretty(&result)?);

  Ok(())
}
