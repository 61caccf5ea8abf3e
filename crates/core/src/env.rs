//! Search-root environment for package discovery.
//!
//! An [`Environment`] is assembled once per request from the request's
//! variable overrides and the ambient process values, and is read-only
//! afterwards. Nothing downstream consults the process environment directly.

use std::collections::{BTreeSet, HashMap};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Logical search roots a request may override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootVar {
  /// Workspace roots (may be a path list)
  GoPath,
  /// Toolchain root
  GoRoot,
}

impl RootVar {
  pub const ALL: [RootVar; 2] = [RootVar::GoPath, RootVar::GoRoot];

  /// Environment variable name for this root
  pub fn var_name(&self) -> &'static str {
    match self {
      RootVar::GoPath => "GOPATH",
      RootVar::GoRoot => "GOROOT",
    }
  }
}

/// Variable names that select the target platform
pub const GOOS: &str = "GOOS";
pub const GOARCH: &str = "GOARCH";

/// Process-level values merged in after the request overrides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ambient {
  pub gopath: Option<String>,
  pub goroot: Option<String>,
  /// Install root of the toolchain on this machine
  pub toolchain_root: Option<PathBuf>,
}

impl Ambient {
  /// No ambient values at all; only request overrides are used
  pub fn none() -> Self {
    Self::default()
  }

  /// Read the process environment and locate the installed toolchain.
  ///
  /// `toolchain_override` comes from configuration and wins over discovery.
  pub fn from_process(toolchain_override: Option<&Path>) -> Self {
    let toolchain_root = toolchain_override
      .map(Path::to_path_buf)
      .or_else(|| std::env::var_os("PATH").and_then(|path| discover_toolchain_root(&path)));

    Self {
      gopath: std::env::var(RootVar::GoPath.var_name()).ok(),
      goroot: std::env::var(RootVar::GoRoot.var_name()).ok(),
      toolchain_root,
    }
  }

  fn value(&self, var: RootVar) -> Option<&str> {
    match var {
      RootVar::GoPath => self.gopath.as_deref(),
      RootVar::GoRoot => self.goroot.as_deref(),
    }
  }
}

/// Find the toolchain root from the `go` executable on a search path.
///
/// The executable lives at `<root>/bin/go`; symlinks such as
/// `/usr/local/bin/go -> /usr/local/go/bin/go` are resolved first.
pub fn discover_toolchain_root(search_path: &OsStr) -> Option<PathBuf> {
  let exe = if cfg!(windows) { "go.exe" } else { "go" };

  std::env::split_paths(search_path)
    .filter(|dir| !dir.as_os_str().is_empty())
    .map(|dir| dir.join(exe))
    .find(|candidate| candidate.is_file())
    .and_then(|candidate| std::fs::canonicalize(candidate).ok())
    .and_then(|exe_path| exe_path.parent()?.parent().map(Path::to_path_buf))
}

/// Host platform tag in the toolchain's `os_arch` naming
pub fn host_platform_tag() -> String {
  format!(
    "{}_{}",
    go_os_name(std::env::consts::OS),
    go_arch_name(std::env::consts::ARCH)
  )
}

fn go_os_name(os: &str) -> &str {
  match os {
    "macos" => "darwin",
    other => other,
  }
}

fn go_arch_name(arch: &str) -> &str {
  match arch {
    "x86_64" => "amd64",
    "x86" => "386",
    "aarch64" => "arm64",
    "powerpc64" => "ppc64",
    "loongarch64" => "loong64",
    "arm" => "arm",
    other => other,
  }
}

/// Immutable per-request environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
  named: HashMap<String, String>,
  ambient: Ambient,
  platform_tag: String,
}

impl Environment {
  /// Assemble from request overrides first, then ambient fallbacks.
  ///
  /// `GOOS`/`GOARCH` overrides select the platform tag; any missing half is
  /// taken from the host.
  pub fn new(named: HashMap<String, String>, ambient: Ambient) -> Self {
    let host = host_platform_tag();
    let (host_os, host_arch) = host.split_once('_').unwrap_or((host.as_str(), ""));

    let os = named.get(GOOS).filter(|v| !v.is_empty()).map(String::as_str).unwrap_or(host_os);
    let arch = named
      .get(GOARCH)
      .filter(|v| !v.is_empty())
      .map(String::as_str)
      .unwrap_or(host_arch);
    let platform_tag = format!("{}_{}", os, arch);

    Self {
      named,
      ambient,
      platform_tag,
    }
  }

  /// Replace the platform tag (configuration override)
  pub fn with_platform_tag(mut self, tag: impl Into<String>) -> Self {
    self.platform_tag = tag.into();
    self
  }

  pub fn platform_tag(&self) -> &str {
    &self.platform_tag
  }

  /// Request-supplied value for a variable name
  pub fn named(&self, name: &str) -> Option<&str> {
    self.named.get(name).map(String::as_str)
  }

  /// Every configured value for a logical root, named value first.
  ///
  /// The toolchain install root is an extra candidate for `GOROOT`.
  fn root_values(&self, var: RootVar) -> Vec<&OsStr> {
    let mut values: Vec<&OsStr> = Vec::new();
    if let Some(v) = self.named(var.var_name()) {
      values.push(OsStr::new(v));
    }
    if let Some(v) = self.ambient.value(var) {
      values.push(OsStr::new(v));
    }
    if var == RootVar::GoRoot
      && let Some(root) = &self.ambient.toolchain_root
    {
      values.push(root.as_os_str());
    }
    values
  }

  /// Deduplicated set of non-empty search roots.
  ///
  /// Each value is split with the platform path-list separator.
  pub fn candidate_roots(&self) -> BTreeSet<PathBuf> {
    let mut roots = BTreeSet::new();
    for var in RootVar::ALL {
      for value in self.root_values(var) {
        for root in std::env::split_paths(value) {
          if !root.as_os_str().is_empty() {
            roots.insert(root);
          }
        }
      }
    }
    debug!(count = roots.len(), platform = %self.platform_tag, "Assembled candidate roots");
    roots
  }
}
