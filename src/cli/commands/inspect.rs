//! Inspect command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{build_gan, load_spec, InspectArgs};
use crate::gan::Gan;
use crate::nn::SubModel;

/// Describe the parameter layout of an allocated engine
pub fn format_layout(gan: &Gan) -> Vec<String> {
    let gen = gan.arena().generator();
    let disc = gan.arena().discriminator();
    vec![
        "Parameter Layout:".to_string(),
        format!("  Total parameters: {}", gan.parameters().len()),
        format!(
            "  Generator: {} weights in [{}, {})",
            gen.len,
            gen.offset,
            gen.end()
        ),
        format!(
            "  Discriminator: {} weights in [{}, {})",
            disc.len,
            disc.offset,
            disc.end()
        ),
    ]
}

/// Describe each network's layers with their weight counts
pub fn format_layers(gan: &Gan) -> Vec<String> {
    let mut lines = Vec::new();
    for (role, network) in [
        ("Generator", gan.generator()),
        ("Discriminator", gan.discriminator()),
    ] {
        lines.push(format!("{role} ({}):", network.output_spec().name()));
        for (i, layer) in network.specs().iter().enumerate() {
            lines.push(format!(
                "  [{i}] {} ({} weights)",
                layer.name(),
                layer.weight_count()
            ));
        }
    }
    lines
}

pub fn run_inspect(args: InspectArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Inspecting: {}", args.config.display()),
    );

    let spec = load_spec(&args.config).map_err(|e| format!("Config error: {e}"))?;
    let mut gan = build_gan(&spec).map_err(|e| format!("Failed to build engine: {e}"))?;
    gan.reset();

    log(level, LogLevel::Normal, &format!("  Policy: {}", spec.gan.policy));
    for line in format_layout(&gan) {
        log(level, LogLevel::Normal, &line);
    }
    if gan.generator().weight_count() + gan.discriminator().weight_count()
        != gan.parameters().len()
    {
        return Err("Segments do not partition the parameter buffer".to_string());
    }

    for line in format_layers(&gan) {
        log(level, LogLevel::Verbose, &line);
    }

    Ok(())
}
