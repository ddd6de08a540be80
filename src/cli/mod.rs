//! CLI command handling module
//!
//! Argument parsing, dispatch, and logging setup for the binary.

mod commands;
mod logging;

pub use commands::{Args, run};
pub use logging::init_logging;
