//! Build an engine from a specification

use super::schema::GanSpec;
use super::validate::validate_spec;
use crate::error::Result;
use crate::gan::{Gan, StandardNormalNoise};
use crate::nn::FeedForward;

/// Per-component seed offsets from the spec's base seed
const GENERATOR_SEED: u64 = 0;
const DISCRIMINATOR_SEED: u64 = 1;
const INIT_SEED: u64 = 2;
const NOISE_SEED: u64 = 3;

/// Build both networks from a specification.
pub fn build_networks(spec: &GanSpec, seed: u64) -> Result<(FeedForward, FeedForward)> {
    let generator = FeedForward::new(
        spec.generator.layers.clone(),
        spec.generator_output(),
        seed.wrapping_add(GENERATOR_SEED),
    )?;
    let discriminator = FeedForward::new(
        spec.discriminator.layers.clone(),
        spec.discriminator_output(),
        seed.wrapping_add(DISCRIMINATOR_SEED),
    )?;
    Ok((generator, discriminator))
}

/// Build a ready-to-train engine with a standard normal noise source.
///
/// Components are seeded from `spec.gan.seed`, or from OS entropy when it
/// is absent.
pub fn build_gan(spec: &GanSpec) -> Result<Gan> {
    validate_spec(spec)?;
    let seed = spec.gan.seed.unwrap_or_else(rand::random);
    let (generator, discriminator) = build_networks(spec, seed)?;
    let init = spec.init.build(seed.wrapping_add(INIT_SEED))?;
    let noise = StandardNormalNoise::new(seed.wrapping_add(NOISE_SEED));
    Gan::new(
        generator,
        discriminator,
        init,
        Box::new(noise),
        spec.gan.clone(),
    )
}
