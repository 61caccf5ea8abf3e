//! gopaths CLI - Go import paths and importable package universe

use anyhow::Result;
use clap::{Parser, Subcommand};
use gopaths_core::Config;
use std::path::PathBuf;

mod commands;
mod logging;

use commands::{cmd_imports, cmd_serve};
use logging::init_logging;

#[derive(Parser)]
#[command(name = "gopaths")]
#[command(about = "Go import paths and importable package universe")]
#[command(after_help = "\
EXAMPLES:
  gopaths serve                          # Answer JSON requests on stdio
  gopaths imports main.go                # Imports of main.go + package paths
  gopaths imports --legacy main.go       # Scan compiled archives instead
  gopaths imports --env GOPATH=/work     # Override a search root")]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Serve line-delimited JSON requests on stdin/stdout
  Serve,
  /// Run a single import_paths call and print the result
  Imports {
    /// Go source file (read from disk unless --src is given)
    file: Option<PathBuf>,
    /// Source text to use instead of reading the file
    #[arg(long)]
    src: Option<String>,
    /// Scan compiled package archives instead of package sources
    #[arg(long)]
    legacy: bool,
    /// Include package names (ignored with --legacy)
    #[arg(long)]
    names: bool,
    /// Environment override, KEY=VALUE (repeatable)
    #[arg(long, value_name = "KEY=VALUE")]
    env: Vec<String>,
  },
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  let config = Config::load();
  init_logging(&config.daemon.log_level);

  match cli.command {
    Commands::Serve => cmd_serve(&config).await,
    Commands::Imports {
      file,
      src,
      legacy,
      names,
      env,
    } => cmd_imports(&config, file.as_deref(), src, legacy, names, &env).await,
  }
}
