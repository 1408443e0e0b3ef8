//! Logging utilities for CLI output

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Log level for CLI output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Suppress all output
    Quiet,
    /// Normal output level
    Normal,
    /// Verbose output with additional details
    Verbose,
}

impl LogLevel {
    /// Most detailed `tracing` level shown at this output level
    pub fn tracing_level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
        }
    }
}

/// Log a message if the current level permits it
pub fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level != LogLevel::Quiet && (level == required || required == LogLevel::Normal) {
        println!("{msg}");
    }
}

/// Install a global fmt subscriber writing engine diagnostics to stderr.
///
/// A second call is a no-op.
pub fn init_tracing(level: LogLevel) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level.tracing_level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_levels_are_ordered() {
        assert!(LogLevel::Verbose.tracing_level() > LogLevel::Normal.tracing_level());
        assert!(LogLevel::Normal.tracing_level() > LogLevel::Quiet.tracing_level());
    }

    #[test]
    fn test_init_tracing_twice() {
        init_tracing(LogLevel::Quiet);
        init_tracing(LogLevel::Verbose);
    }
}
