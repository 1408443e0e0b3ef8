//! Generate command implementation

use std::fs::File;
use std::io;

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::GenerateArgs;
use crate::eval::write_samples;
use crate::gan::{Gan, StandardNormalNoise};
use crate::nn::GlorotInit;

pub fn run_generate(args: GenerateArgs, level: LogLevel) -> Result<(), String> {
    if args.count == 0 {
        return Err("Sample count must be positive".to_string());
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    // Weights come from the checkpoint; the init rule is never applied
    let mut gan = Gan::load(
        &args.checkpoint,
        Box::new(GlorotInit::new(seed)),
        Box::new(StandardNormalNoise::new(seed)),
    )
    .map_err(|e| format!("Failed to load checkpoint: {e}"))?;

    let samples = gan.generate(args.count);

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| format!("{}: {e}", path.display()))?;
            write_samples(file, samples.view()).map_err(|e| e.to_string())?;
            log(
                level,
                LogLevel::Normal,
                &format!(
                    "Wrote {} samples of dimension {} to {}",
                    samples.ncols(),
                    samples.nrows(),
                    path.display()
                ),
            );
        }
        None => write_samples(io::stdout().lock(), samples.view()).map_err(|e| e.to_string())?,
    }
    Ok(())
}
