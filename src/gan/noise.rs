//! Noise sources for the generator's latent input.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

/// Zero-argument sampler producing one latent coordinate per call.
///
/// Any `FnMut() -> f64` closure is a noise source.
pub trait NoiseSource {
    fn sample(&mut self) -> f64;
}

impl<F: FnMut() -> f64> NoiseSource for F {
    fn sample(&mut self) -> f64 {
        self()
    }
}

/// Standard normal draws from a seeded generator.
#[derive(Debug, Clone)]
pub struct StandardNormalNoise {
    rng: StdRng,
}

impl StandardNormalNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl NoiseSource for StandardNormalNoise {
    fn sample(&mut self) -> f64 {
        StandardNormal.sample(&mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_noise_source() {
        let mut counter = 0.0;
        let mut source = move || {
            counter += 1.0;
            counter
        };
        assert_eq!(NoiseSource::sample(&mut source), 1.0);
        assert_eq!(NoiseSource::sample(&mut source), 2.0);
    }

    #[test]
    fn test_standard_normal_is_seeded() {
        let mut a = StandardNormalNoise::new(9);
        let mut b = StandardNormalNoise::new(9);
        let xs: Vec<f64> = (0..8).map(|_| a.sample()).collect();
        let ys: Vec<f64> = (0..8).map(|_| b.sample()).collect();
        assert_eq!(xs, ys);
    }
}
