//! The git side of the extension: which commands answer which question,
//! and (off wasm) running them.

pub mod query;
#[cfg(not(target_arch = "wasm32"))]
pub mod cli;

pub use query::{history_format, to_git_path, GitQuery};
#[cfg(not(target_arch = "wasm32"))]
pub use cli::GitCli;
