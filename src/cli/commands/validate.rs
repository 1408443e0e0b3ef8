//! Validate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_spec, GanSpec, NetworkSpec, ValidateArgs};
use crate::nn::LayerSpec;

/// Format engine configuration as a string
pub fn format_gan_info(spec: &GanSpec) -> String {
    let gan = &spec.gan;
    let mut lines = vec![
        format!("  Policy: {}", gan.policy),
        format!("  Noise dim: {}", gan.noise_dim),
        format!("  Batch size: {}", gan.batch_size),
        format!("  Generator update step: {}", gan.generator_update_step),
        format!("  Pre-train steps: {}", gan.pre_train_size),
        format!("  Multiplier: {}", gan.multiplier),
    ];
    if gan.policy.clips_weights() {
        lines.push(format!("  Clipping: {}", gan.clipping_parameter));
    }
    if gan.policy.penalizes_gradient() {
        lines.push(format!("  Lambda: {}", gan.lambda));
    }
    if let Some(seed) = gan.seed {
        lines.push(format!("  Seed: {seed}"));
    }
    lines.push(format!("  Init: {}", spec.init.name()));
    lines.join("\n")
}

fn format_layer(layer: &LayerSpec) -> String {
    match layer {
        LayerSpec::Linear { inputs, outputs } => format!("linear({inputs} -> {outputs})"),
        LayerSpec::LeakyRelu { alpha } => format!("leaky_relu({alpha})"),
        LayerSpec::Dropout { ratio } => format!("dropout({ratio})"),
        other => other.name().to_string(),
    }
}

/// Format one network as a string
pub fn format_network_info(role: &str, network: &NetworkSpec, output: &str) -> String {
    let layers: Vec<String> = network.layers.iter().map(format_layer).collect();
    format!(
        "  {role}:\n    Layers: {}\n    Output: {output}\n    Weights: {}",
        layers.join(", "),
        network.weight_count()
    )
}

/// Print detailed configuration summary
pub fn print_detailed_summary(spec: &GanSpec) {
    println!();
    println!("Configuration Summary:");
    println!("{}", format_gan_info(spec));
    println!();
    println!(
        "{}",
        format_network_info("Generator", &spec.generator, spec.generator_output().name())
    );
    println!();
    println!(
        "{}",
        format_network_info(
            "Discriminator",
            &spec.discriminator,
            spec.discriminator_output().name()
        )
    );
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    let spec = load_spec(&args.config).map_err(|e| format!("Validation failed: {e}"))?;

    log(level, LogLevel::Normal, "Configuration is valid");

    if args.detailed {
        print_detailed_summary(&spec);
    }

    Ok(())
}
