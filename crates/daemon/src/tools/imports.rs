//! `import_paths`: imports written in a file plus the importable universe

use super::{ToolHandler, build_environment};
use crate::universe::{PackageResolver, ResolutionMode, compute_package_paths};
use gopaths_core::Environment;
use ipc::{ImportDecl, ImportPathsParams, ImportPathsResult, Request, Response, error_codes};
use parser::{ParseError, SourceUnit, extract_imports};
use std::sync::Arc;
use tracing::{debug, warn};

/// Run one `import_paths` call.
///
/// A source whose header does not parse fails the whole call. Path discovery
/// cannot fail; it runs only after extraction succeeded.
pub fn import_paths(
  params: &ImportPathsParams,
  env: &Environment,
  resolver: &dyn PackageResolver,
) -> Result<ImportPathsResult, ParseError> {
  let unit = SourceUnit::new(params.filename.as_str(), params.src.as_str());
  let imports = extract_imports(&unit)?
    .into_iter()
    .map(|decl| ImportDecl {
      name: decl.alias,
      path: decl.path,
    })
    .collect();

  let mode = ResolutionMode::from_flags(params.use_legacy_imports, params.want_pkg_names);
  let paths = compute_package_paths(env, mode, resolver);

  Ok(ImportPathsResult { imports, paths })
}

impl ToolHandler {
  /// Handle an `import_paths` request on the blocking pool
  pub async fn import_paths(&self, request: Request) -> Response {
    let params: ImportPathsParams = if request.params.is_null() {
      ImportPathsParams::default()
    } else {
      match serde_json::from_value(request.params.clone()) {
        Ok(p) => p,
        Err(e) => return Response::error(request.id, error_codes::INVALID_PARAMS, &format!("Invalid params: {}", e)),
      }
    };

    let resolver = Arc::clone(&self.resolver);
    let paths_config = self.paths.clone();
    let ambient = self.ambient.clone();

    let outcome = tokio::task::spawn_blocking(move || {
      let env = build_environment(params.env.clone(), &paths_config, ambient);
      import_paths(&params, &env, resolver.as_ref())
    })
    .await;

    match outcome {
      Ok(Ok(result)) => {
        debug!(
          imports = result.imports.len(),
          paths = result.paths.len(),
          "import_paths completed"
        );
        Response::success(request.id, result)
      }
      Ok(Err(e)) => {
        debug!("import_paths failed: {}", e);
        Response::failure(
          request.id,
          serde_json::Value::Object(Default::default()),
          error_codes::CALL_FAILED,
          &e.to_string(),
        )
      }
      Err(e) => {
        warn!("import_paths task failed: {}", e);
        Response::error(request.id, error_codes::INTERNAL_ERROR, &format!("Task failed: {}", e))
      }
    }
  }
}
