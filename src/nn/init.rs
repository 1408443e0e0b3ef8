//! Weight initialization rules

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Fills one layer's weight block.
pub trait InitRule {
    /// Initialize `weights` for a layer with the given fan-in and fan-out.
    fn initialize(&mut self, weights: &mut [f64], fan_in: usize, fan_out: usize);
}

/// Independent draws from `N(mean, std²)`.
#[derive(Debug, Clone)]
pub struct GaussianInit {
    dist: Normal<f64>,
    rng: StdRng,
}

impl GaussianInit {
    /// Create a Gaussian initializer.
    ///
    /// # Errors
    ///
    /// Returns an error if `std` is negative or not finite.
    pub fn new(mean: f64, std: f64, seed: u64) -> Result<Self> {
        let dist = Normal::new(mean, std)
            .map_err(|e| Error::ConfigError(format!("gaussian init: {e}")))?;
        Ok(Self {
            dist,
            rng: StdRng::seed_from_u64(seed),
        })
    }
}

impl InitRule for GaussianInit {
    fn initialize(&mut self, weights: &mut [f64], _fan_in: usize, _fan_out: usize) {
        for w in weights.iter_mut() {
            *w = self.dist.sample(&mut self.rng);
        }
    }
}

/// Glorot/Xavier uniform: `U(-a, a)` with `a = sqrt(6 / (fan_in + fan_out))`.
#[derive(Debug, Clone)]
pub struct GlorotInit {
    rng: StdRng,
}

impl GlorotInit {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl InitRule for GlorotInit {
    fn initialize(&mut self, weights: &mut [f64], fan_in: usize, fan_out: usize) {
        let fan = (fan_in + fan_out).max(1) as f64;
        let bound = (6.0 / fan).sqrt();
        for w in weights.iter_mut() {
            *w = self.rng.random_range(-bound..=bound);
        }
    }
}

/// Serializable choice of initialization rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InitSpec {
    Gaussian {
        #[serde(default)]
        mean: f64,
        #[serde(default = "default_std")]
        std: f64,
    },
    Glorot,
}

fn default_std() -> f64 {
    0.1
}

impl Default for InitSpec {
    fn default() -> Self {
        Self::Gaussian {
            mean: 0.0,
            std: default_std(),
        }
    }
}

impl InitSpec {
    /// Instantiate the rule with its own random stream.
    pub fn build(&self, seed: u64) -> Result<Box<dyn InitRule>> {
        Ok(match *self {
            Self::Gaussian { mean, std } => Box::new(GaussianInit::new(mean, std, seed)?),
            Self::Glorot => Box::new(GlorotInit::new(seed)),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Gaussian { .. } => "gaussian",
            Self::Glorot => "glorot",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaussian_is_seeded() {
        let mut a = GaussianInit::new(0.0, 1.0, 3).unwrap();
        let mut b = GaussianInit::new(0.0, 1.0, 3).unwrap();
        let mut wa = [0.0; 16];
        let mut wb = [0.0; 16];
        a.initialize(&mut wa, 4, 4);
        b.initialize(&mut wb, 4, 4);
        assert_eq!(wa, wb);
        assert!(wa.iter().any(|&w| w != 0.0));
    }

    #[test]
    fn test_gaussian_rejects_bad_std() {
        assert!(GaussianInit::new(0.0, f64::NAN, 0).is_err());
    }

    #[test]
    fn test_glorot_within_bound() {
        let mut rule = GlorotInit::new(11);
        let mut w = [0.0; 64];
        rule.initialize(&mut w, 8, 4);
        let bound = (6.0f64 / 12.0).sqrt();
        assert!(w.iter().all(|v| v.abs() <= bound));
    }

    #[test]
    fn test_init_spec_default_yaml() {
        let spec: InitSpec = serde_yaml::from_str("type: gaussian").unwrap();
        assert_eq!(spec, InitSpec::default());
        assert_eq!(spec.name(), "gaussian");
    }
}
