//! YAML schema definitions for declarative GAN configuration

use serde::{Deserialize, Serialize};

use crate::gan::GanPolicy;
use crate::nn::{InitSpec, LayerSpec, OutputSpec};

/// Complete GAN specification: engine knobs plus both networks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanSpec {
    /// Engine configuration
    #[serde(default)]
    pub gan: GanConfig,

    /// Weight initialization rule shared by both networks
    #[serde(default)]
    pub init: InitSpec,

    /// Generator network; maps `noise_dim` to the sample width
    pub generator: NetworkSpec,

    /// Discriminator network; maps the sample width to one score
    pub discriminator: NetworkSpec,
}

/// Layer graph plus the loss applied to its output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub layers: Vec<LayerSpec>,

    /// Output (loss) layer; defaults by role when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputSpec>,
}

impl NetworkSpec {
    /// Width of the first linear layer's input.
    pub fn input_dim(&self) -> Option<usize> {
        self.layers.iter().find_map(LayerSpec::dims).map(|(i, _)| i)
    }

    /// Width of the last linear layer's output.
    pub fn output_dim(&self) -> Option<usize> {
        self.layers.iter().rev().find_map(LayerSpec::dims).map(|(_, o)| o)
    }

    /// Total trainable weights.
    pub fn weight_count(&self) -> usize {
        self.layers.iter().map(LayerSpec::weight_count).sum()
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanConfig {
    /// Training policy
    #[serde(default)]
    pub policy: GanPolicy,

    /// Rows of the noise matrix (generator input width)
    #[serde(default = "default_noise_dim")]
    pub noise_dim: usize,

    /// Columns per real and generated minibatch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// The generator is updated every this many calls
    #[serde(default = "default_generator_update_step")]
    pub generator_update_step: usize,

    /// Number of discriminator-only calls before the generator trains
    #[serde(default)]
    pub pre_train_size: usize,

    /// Scale applied to the generator gradient
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// WGAN weight clipping bound
    #[serde(default = "default_clipping")]
    pub clipping_parameter: f64,

    /// WGAN-GP penalty coefficient
    #[serde(default = "default_lambda")]
    pub lambda: f64,

    /// Label for real samples (ignored by Wasserstein policies)
    #[serde(default = "default_real_label")]
    pub real_label: f64,

    /// Label for generated samples (ignored by Wasserstein policies)
    #[serde(default)]
    pub fake_label: f64,

    /// Seed for shuffling, interpolation and network construction;
    /// OS entropy when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_noise_dim() -> usize {
    100
}

fn default_batch_size() -> usize {
    32
}

fn default_generator_update_step() -> usize {
    1
}

fn default_multiplier() -> f64 {
    1.0
}

fn default_clipping() -> f64 {
    0.01
}

fn default_lambda() -> f64 {
    10.0
}

fn default_real_label() -> f64 {
    1.0
}

impl Default for GanConfig {
    fn default() -> Self {
        Self {
            policy: GanPolicy::default(),
            noise_dim: default_noise_dim(),
            batch_size: default_batch_size(),
            generator_update_step: default_generator_update_step(),
            pre_train_size: 0,
            multiplier: default_multiplier(),
            clipping_parameter: default_clipping(),
            lambda: default_lambda(),
            real_label: default_real_label(),
            fake_label: 0.0,
            seed: None,
        }
    }
}

impl GanSpec {
    /// Discriminator loss after applying the policy default.
    pub fn discriminator_output(&self) -> OutputSpec {
        self.discriminator
            .output
            .unwrap_or_else(|| self.gan.policy.default_output())
    }

    /// Generator loss after applying the default. Only its presence matters
    /// to the engine; generator gradients come from the discriminator.
    pub fn generator_output(&self) -> OutputSpec {
        self.generator
            .output
            .unwrap_or(OutputSpec::MeanSquaredError)
    }
}
