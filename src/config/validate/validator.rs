//! Configuration validation logic
//!
//! Validates GAN specifications for correctness before an engine is built.

use super::error::ValidationError;
use crate::config::schema::{GanConfig, GanSpec, NetworkSpec};
use crate::nn::{InitSpec, LayerSpec, OutputSpec};

/// Validate engine settings against the discriminator's loss.
///
/// Checks:
/// - Sizes and the update cadence are positive
/// - Multiplier and labels are finite
/// - The policy accepts the discriminator loss
/// - Clipping (wgan) or lambda (wgan_gp) is positive
pub fn validate_gan_config(
    config: &GanConfig,
    discriminator_output: OutputSpec,
) -> Result<(), ValidationError> {
    if config.batch_size == 0 {
        return Err(ValidationError::InvalidBatchSize(config.batch_size));
    }

    if config.noise_dim == 0 {
        return Err(ValidationError::InvalidNoiseDim(config.noise_dim));
    }

    if config.generator_update_step == 0 {
        return Err(ValidationError::InvalidGeneratorUpdateStep(
            config.generator_update_step,
        ));
    }

    if !config.multiplier.is_finite() {
        return Err(ValidationError::InvalidMultiplier(config.multiplier));
    }

    for label in [config.real_label, config.fake_label] {
        if !label.is_finite() {
            return Err(ValidationError::InvalidLabel(label));
        }
    }

    if !config.policy.accepts_output(discriminator_output) {
        return Err(ValidationError::IncompatibleOutput {
            policy: config.policy.name().to_string(),
            output: discriminator_output.name().to_string(),
        });
    }

    // NaN fails both comparisons below
    if config.policy.clips_weights() && !(config.clipping_parameter > 0.0) {
        return Err(ValidationError::InvalidClipping(config.clipping_parameter));
    }

    if config.policy.penalizes_gradient() && !(config.lambda > 0.0) {
        return Err(ValidationError::InvalidLambda(config.lambda));
    }

    Ok(())
}

/// Validate one layer chain: linear widths agree and per-layer parameters
/// are in range.
pub fn validate_layers(network: &str, layers: &[LayerSpec]) -> Result<(), ValidationError> {
    let mut width: Option<usize> = None;
    for (index, layer) in layers.iter().enumerate() {
        match *layer {
            LayerSpec::Linear { inputs, outputs } => {
                if inputs == 0 || outputs == 0 {
                    return Err(ValidationError::EmptyLayer {
                        network: network.to_string(),
                        index,
                    });
                }
                if let Some(found) = width {
                    if found != inputs {
                        return Err(ValidationError::LayerChain {
                            network: network.to_string(),
                            index,
                            expected: inputs,
                            found,
                        });
                    }
                }
                width = Some(outputs);
            }
            LayerSpec::Dropout { ratio } => {
                if !(0.0..1.0).contains(&ratio) {
                    return Err(ValidationError::InvalidDropout {
                        network: network.to_string(),
                        index,
                        ratio,
                    });
                }
            }
            LayerSpec::LeakyRelu { alpha } => {
                if !(alpha >= 0.0 && alpha.is_finite()) {
                    return Err(ValidationError::InvalidLeakyAlpha {
                        network: network.to_string(),
                        index,
                        alpha,
                    });
                }
            }
            LayerSpec::Identity | LayerSpec::Sigmoid | LayerSpec::Tanh => {}
        }
    }
    Ok(())
}

fn network_dims(name: &str, network: &NetworkSpec) -> Result<(usize, usize), ValidationError> {
    validate_layers(name, &network.layers)?;
    match (network.input_dim(), network.output_dim()) {
        (Some(input), Some(output)) => Ok((input, output)),
        _ => Err(ValidationError::NoLinearLayer(name.to_string())),
    }
}

/// Validate a complete GAN specification
///
/// Checks everything [`validate_gan_config`] and [`validate_layers`] check,
/// plus:
/// - Generator input width equals `noise_dim`
/// - Generator output width equals discriminator input width
/// - Discriminator produces one score per sample
/// - Gaussian init has a positive std
pub fn validate_spec(spec: &GanSpec) -> Result<(), ValidationError> {
    validate_gan_config(&spec.gan, spec.discriminator_output())?;

    if let InitSpec::Gaussian { std, .. } = spec.init {
        if !(std > 0.0 && std.is_finite()) {
            return Err(ValidationError::InvalidInitStd(std));
        }
    }

    let (gen_in, gen_out) = network_dims("generator", &spec.generator)?;
    let (disc_in, disc_out) = network_dims("discriminator", &spec.discriminator)?;

    if gen_in != spec.gan.noise_dim {
        return Err(ValidationError::NoiseDimMismatch {
            noise_dim: spec.gan.noise_dim,
            input: gen_in,
        });
    }

    if gen_out != disc_in {
        return Err(ValidationError::SampleDimMismatch {
            generator: gen_out,
            discriminator: disc_in,
        });
    }

    if disc_out != 1 {
        return Err(ValidationError::InvalidCriticWidth(disc_out));
    }

    Ok(())
}
