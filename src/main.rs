//! Contienda CLI
//!
//! # Usage
//!
//! ```bash
//! # Validate a GAN spec
//! contienda validate gan.yaml --detailed
//!
//! # Show the parameter layout the spec produces
//! contienda -v inspect gan.yaml
//!
//! # Fréchet distance between two sample files
//! contienda fid real.csv generated.csv
//!
//! # Draw samples from a checkpoint
//! contienda generate gan.json -n 100 --output samples.csv
//! ```

use clap::Parser;
use contienda::cli::{init_tracing, log_level, run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(log_level(&cli));

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
