//! Fid command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::FidArgs;
use crate::eval::{frechet_distance, load_samples};

pub fn run_fid(args: FidArgs, level: LogLevel) -> Result<(), String> {
    let first = load_samples(&args.first, args.header)
        .map_err(|e| format!("{}: {e}", args.first.display()))?;
    let second = load_samples(&args.second, args.header)
        .map_err(|e| format!("{}: {e}", args.second.display()))?;

    if first.nrows() != second.nrows() {
        return Err(format!(
            "Feature dimension mismatch: {} has {}, {} has {}",
            args.first.display(),
            first.nrows(),
            args.second.display(),
            second.nrows()
        ));
    }

    log(
        level,
        LogLevel::Verbose,
        &format!(
            "Comparing {} vs {} samples of dimension {}",
            first.ncols(),
            second.ncols(),
            first.nrows()
        ),
    );

    let distance = frechet_distance(first.view(), second.view());
    if level == LogLevel::Quiet {
        // The value is the command's output, so it is printed regardless
        println!("{distance}");
    } else {
        log(level, LogLevel::Normal, &format!("FID: {distance:.6}"));
    }
    Ok(())
}
