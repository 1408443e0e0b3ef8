//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! contienda validate gan.yaml
//! contienda inspect gan.yaml
//! contienda fid real.csv generated.csv
//! contienda generate checkpoint.json -n 100 --output samples.csv
//! ```

mod core;

pub use core::{parse_args, Cli, Command, FidArgs, GenerateArgs, InspectArgs, ValidateArgs};
