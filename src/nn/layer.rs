//! Uniform layer interface
//!
//! Layers never own their weights. Each layer reads a contiguous block of the
//! owning sub-model's parameter segment, so a single optimizer step on the
//! shared arena updates every layer in place.

use std::fmt;

use ndarray::{Array2, ArrayView2};

use super::init::InitRule;

/// A single stage of a feed-forward layer graph.
///
/// Activations are column-major in the sense of the engine: shape
/// `[features, samples]`, one sample per column.
pub trait Layer: fmt::Debug {
    /// Number of weights this layer reads from its parameter block.
    fn weight_count(&self) -> usize {
        0
    }

    /// Fill this layer's parameter block using `rule`.
    fn initialize(&self, _rule: &mut dyn InitRule, _weights: &mut [f64]) {}

    /// Forward pass; the result is cached and available via [`Layer::output`].
    fn forward(&mut self, weights: &[f64], input: ArrayView2<'_, f64>);

    /// Backward pass given the error w.r.t. this layer's output.
    ///
    /// Caches the error w.r.t. this layer's input, available via
    /// [`Layer::delta`]. Relies on state cached by the last forward pass.
    fn backward(&mut self, weights: &[f64], error: ArrayView2<'_, f64>);

    /// Write the parameter gradient for this layer's block.
    ///
    /// `input` is what the layer saw in the forward pass, `error` is the
    /// error w.r.t. its output. Layers without weights do nothing.
    fn gradient(
        &self,
        _input: ArrayView2<'_, f64>,
        _error: ArrayView2<'_, f64>,
        _gradient: &mut [f64],
    ) {
    }

    /// Output of the last forward pass.
    fn output(&self) -> &Array2<f64>;

    /// Error w.r.t. the input, from the last backward pass.
    fn delta(&self) -> &Array2<f64>;

    /// Switch between training (stochastic) and inference behavior.
    fn set_deterministic(&mut self, _deterministic: bool) {}
}
