//! CLI command implementations

mod fid;
mod generate;
mod inspect;
mod validate;


use crate::cli::LogLevel;
use crate::config::{Cli, Command};

/// Map the global flags to an output level
pub fn log_level(cli: &Cli) -> LogLevel {
    if cli.quiet {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    }
}

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = log_level(&cli);

    match cli.command {
        Command::Validate(args) => validate::run_validate(args, log_level),
        Command::Inspect(args) => inspect::run_inspect(args, log_level),
        Command::Fid(args) => fid::run_fid(args, log_level),
        Command::Generate(args) => generate::run_generate(args, log_level),
    }
}
