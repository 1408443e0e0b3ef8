//! CLI module for contienda
//!
//! This module contains all CLI command handlers and utilities.

mod commands;
mod logging;

pub use commands::{log_level, run_command};
pub use logging::{init_tracing, LogLevel};

// Re-export Cli from config for convenience
pub use crate::config::Cli;
