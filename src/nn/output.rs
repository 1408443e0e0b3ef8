//! Output (loss) layers
//!
//! Losses are summed over the batch, not averaged: the gradient of a
//! minibatch is the sum of its per-sample gradients.

use std::fmt;

use ndarray::{Array2, ArrayView2, Zip};
use serde::{Deserialize, Serialize};

/// Numerically stable logistic sigmoid.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Loss applied to the last layer's output.
pub trait OutputLayer: fmt::Debug {
    /// Scalar loss of `input` against `target` (same shape).
    fn forward(&self, input: ArrayView2<'_, f64>, target: ArrayView2<'_, f64>) -> f64;

    /// Gradient of the loss w.r.t. `input`.
    fn backward(&self, input: ArrayView2<'_, f64>, target: ArrayView2<'_, f64>) -> Array2<f64>;
}

/// Binary cross-entropy on logits.
///
/// `max(x, 0) - x*t + ln(1 + exp(-|x|))` per element, summed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SigmoidCrossEntropy;

impl OutputLayer for SigmoidCrossEntropy {
    fn forward(&self, input: ArrayView2<'_, f64>, target: ArrayView2<'_, f64>) -> f64 {
        Zip::from(&input)
            .and(&target)
            .fold(0.0, |acc, &x, &t| acc + x.max(0.0) - x * t + (-x.abs()).exp().ln_1p())
    }

    fn backward(&self, input: ArrayView2<'_, f64>, target: ArrayView2<'_, f64>) -> Array2<f64> {
        Zip::from(&input)
            .and(&target)
            .map_collect(|&x, &t| sigmoid(x) - t)
    }
}

/// Squared error summed over features, averaged over samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanSquaredError;

impl OutputLayer for MeanSquaredError {
    fn forward(&self, input: ArrayView2<'_, f64>, target: ArrayView2<'_, f64>) -> f64 {
        let n = input.ncols().max(1) as f64;
        Zip::from(&input)
            .and(&target)
            .fold(0.0, |acc, &x, &t| acc + (x - t) * (x - t))
            / n
    }

    fn backward(&self, input: ArrayView2<'_, f64>, target: ArrayView2<'_, f64>) -> Array2<f64> {
        let n = input.ncols().max(1) as f64;
        Zip::from(&input)
            .and(&target)
            .map_collect(|&x, &t| 2.0 * (x - t) / n)
    }
}

/// Wasserstein critic loss `-Σ t·x`.
///
/// With targets `+1` for real and `-1` for generated samples, minimizing
/// this maximizes the critic's score gap.
#[derive(Debug, Clone, Copy, Default)]
pub struct EarthMoverDistance;

impl OutputLayer for EarthMoverDistance {
    fn forward(&self, input: ArrayView2<'_, f64>, target: ArrayView2<'_, f64>) -> f64 {
        -Zip::from(&input)
            .and(&target)
            .fold(0.0, |acc, &x, &t| acc + x * t)
    }

    fn backward(&self, input: ArrayView2<'_, f64>, target: ArrayView2<'_, f64>) -> Array2<f64> {
        Zip::from(&input).and(&target).map_collect(|_, &t| -t)
    }
}

/// Serializable choice of output layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputSpec {
    #[default]
    SigmoidCrossEntropy,
    MeanSquaredError,
    EarthMoverDistance,
}

impl OutputSpec {
    /// Instantiate the loss.
    pub fn build(self) -> Box<dyn OutputLayer> {
        match self {
            Self::SigmoidCrossEntropy => Box::new(SigmoidCrossEntropy),
            Self::MeanSquaredError => Box::new(MeanSquaredError),
            Self::EarthMoverDistance => Box::new(EarthMoverDistance),
        }
    }

    /// Config-facing name
    pub fn name(self) -> &'static str {
        match self {
            Self::SigmoidCrossEntropy => "sigmoid_cross_entropy",
            Self::MeanSquaredError => "mean_squared_error",
            Self::EarthMoverDistance => "earth_mover_distance",
        }
    }
}
