//! CLI command implementations

mod imports;
mod serve;

pub use imports::cmd_imports;
pub use serve::cmd_serve;
