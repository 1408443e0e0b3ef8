//! Validation error types
//!
//! Defines all validation error variants for GAN specifications.

/// Validation error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid batch size: {0} (must be > 0)")]
    InvalidBatchSize(usize),

    #[error("Invalid noise dimension: {0} (must be > 0)")]
    InvalidNoiseDim(usize),

    #[error("Invalid generator update step: {0} (must be > 0)")]
    InvalidGeneratorUpdateStep(usize),

    #[error("Invalid generator gradient multiplier: {0} (must be finite)")]
    InvalidMultiplier(f64),

    #[error("Invalid clipping parameter: {0} (must be > 0.0 for wgan)")]
    InvalidClipping(f64),

    #[error("Invalid gradient penalty lambda: {0} (must be > 0.0 for wgan_gp)")]
    InvalidLambda(f64),

    #[error("Invalid label: {0} (must be finite)")]
    InvalidLabel(f64),

    #[error("Policy {policy} cannot train a discriminator with {output} loss")]
    IncompatibleOutput { policy: String, output: String },

    #[error("Invalid initialization std: {0} (must be > 0.0)")]
    InvalidInitStd(f64),

    #[error("{network} layer {index}: expected {expected} inputs, previous layer produces {found}")]
    LayerChain {
        network: String,
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("{network} layer {index}: linear layer sizes must be > 0")]
    EmptyLayer { network: String, index: usize },

    #[error("{network} layer {index}: invalid dropout ratio {ratio} (must be in [0.0, 1.0))")]
    InvalidDropout {
        network: String,
        index: usize,
        ratio: f64,
    },

    #[error("{network} layer {index}: invalid leaky_relu alpha {alpha} (must be finite and >= 0.0)")]
    InvalidLeakyAlpha {
        network: String,
        index: usize,
        alpha: f64,
    },

    #[error("{0} network has no linear layer")]
    NoLinearLayer(String),

    #[error("Generator input width {input} does not match noise dimension {noise_dim}")]
    NoiseDimMismatch { noise_dim: usize, input: usize },

    #[error("Generator output width {generator} does not match discriminator input width {discriminator}")]
    SampleDimMismatch { generator: usize, discriminator: usize },

    #[error("Discriminator must produce 1 output per sample, got {0}")]
    InvalidCriticWidth(usize),
}
