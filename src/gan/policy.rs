//! Training policies
//!
//! A closed set: each variant fixes the label convention, the
//! discriminator losses it can be paired with, and whether weights are
//! clipped or the critic's input gradient is penalized.

use serde::{Deserialize, Serialize};

use crate::nn::OutputSpec;

/// Adversarial training policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GanPolicy {
    /// Non-saturating minimax GAN
    #[default]
    Standard,
    /// Deep convolutional GAN; same numerics as `Standard`
    Dcgan,
    /// Wasserstein GAN with weight clipping
    Wgan,
    /// Wasserstein GAN with gradient penalty
    WganGp,
}

impl GanPolicy {
    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Dcgan => "dcgan",
            Self::Wgan => "wgan",
            Self::WganGp => "wgan_gp",
        }
    }

    pub fn is_wasserstein(self) -> bool {
        matches!(self, Self::Wgan | Self::WganGp)
    }

    /// Effective `(real, fake)` labels. Wasserstein critics always use
    /// `(+1, -1)` so the earth mover loss scores the gap.
    pub fn labels(self, real: f64, fake: f64) -> (f64, f64) {
        if self.is_wasserstein() {
            (1.0, -1.0)
        } else {
            (real, fake)
        }
    }

    pub fn clips_weights(self) -> bool {
        self == Self::Wgan
    }

    pub fn penalizes_gradient(self) -> bool {
        self == Self::WganGp
    }

    /// Discriminator loss used when none is configured.
    pub fn default_output(self) -> OutputSpec {
        if self.is_wasserstein() {
            OutputSpec::EarthMoverDistance
        } else {
            OutputSpec::SigmoidCrossEntropy
        }
    }

    /// Whether a discriminator trained with `output` is valid for this policy.
    pub fn accepts_output(self, output: OutputSpec) -> bool {
        match output {
            OutputSpec::EarthMoverDistance => self.is_wasserstein(),
            OutputSpec::SigmoidCrossEntropy | OutputSpec::MeanSquaredError => {
                !self.is_wasserstein()
            }
        }
    }
}

impl std::fmt::Display for GanPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(GanPolicy::Standard.labels(0.9, 0.1), (0.9, 0.1));
        assert_eq!(GanPolicy::Dcgan.labels(1.0, 0.0), (1.0, 0.0));
        assert_eq!(GanPolicy::Wgan.labels(1.0, 0.0), (1.0, -1.0));
        assert_eq!(GanPolicy::WganGp.labels(0.9, 0.1), (1.0, -1.0));
    }

    #[test]
    fn test_refinements() {
        assert!(GanPolicy::Wgan.clips_weights());
        assert!(!GanPolicy::WganGp.clips_weights());
        assert!(GanPolicy::WganGp.penalizes_gradient());
        assert!(!GanPolicy::Standard.penalizes_gradient());
    }

    #[test]
    fn test_output_pairing() {
        for policy in [GanPolicy::Standard, GanPolicy::Dcgan, GanPolicy::Wgan, GanPolicy::WganGp] {
            assert!(policy.accepts_output(policy.default_output()));
        }
        assert!(!GanPolicy::Wgan.accepts_output(OutputSpec::SigmoidCrossEntropy));
        assert!(!GanPolicy::Standard.accepts_output(OutputSpec::EarthMoverDistance));
        assert!(GanPolicy::Dcgan.accepts_output(OutputSpec::MeanSquaredError));
    }

    #[test]
    fn test_serde_names() {
        let policy: GanPolicy = serde_yaml::from_str("wgan_gp").unwrap();
        assert_eq!(policy, GanPolicy::WganGp);
        assert_eq!(policy.to_string(), "wgan_gp");
    }
}
