//! Core CLI types - Cli, Command, and argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Contienda: adversarial training engine
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "contienda")]
#[command(author = "PAIML")]
#[command(version)]
#[command(
    about = "GAN training engine: shared parameter arena, StandardGAN/DCGAN/WGAN/WGAN-GP policies"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Validate a GAN specification file
    Validate(ValidateArgs),

    /// Build the engine from a specification and report its parameter layout
    Inspect(InspectArgs),

    /// Fréchet distance between two CSV sample files
    Fid(FidArgs),

    /// Draw samples from a saved checkpoint
    Generate(GenerateArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML specification file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Show detailed validation report
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the inspect command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InspectArgs {
    /// Path to YAML specification file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}

/// Arguments for the fid command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct FidArgs {
    /// First sample file (one sample per row)
    #[arg(value_name = "A")]
    pub first: PathBuf,

    /// Second sample file (one sample per row)
    #[arg(value_name = "B")]
    pub second: PathBuf,

    /// Files start with a header row
    #[arg(long)]
    pub header: bool,
}

/// Arguments for the generate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct GenerateArgs {
    /// Checkpoint written by `Gan::save`
    #[arg(value_name = "CHECKPOINT")]
    pub checkpoint: PathBuf,

    /// Number of samples
    #[arg(short = 'n', long, default_value_t = 16)]
    pub count: usize,

    /// Write CSV here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Noise seed
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
