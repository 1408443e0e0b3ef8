//! Contract the GAN engine needs from each of its two networks.

use ndarray::{Array2, ArrayView2};

use super::init::InitRule;
use super::output::OutputSpec;
use crate::gan::arena::Segment;

/// A trainable network whose weights live in a segment of a shared arena.
///
/// Every method that touches weights takes the segment's slice explicitly;
/// the model keeps only the [`Segment`] handle, never a copy.
pub trait SubModel {
    /// Total number of trainable weights.
    fn weight_count(&self) -> usize;

    /// The arena range this model was bound to.
    fn segment(&self) -> Segment;

    /// Record the arena range holding this model's weights.
    fn bind(&mut self, segment: Segment);

    /// Initialize every layer's block of `params` (this model's segment).
    fn initialize(&self, rule: &mut dyn InitRule, params: &mut [f64]);

    /// Prepend a pass-through layer so the error w.r.t. the network input
    /// can be read via [`SubModel::input_error`]. Idempotent.
    fn insert_input_join(&mut self);

    /// Loss applied to the final layer.
    fn loss_kind(&self) -> OutputSpec;

    fn deterministic(&self) -> bool;

    fn set_deterministic(&mut self, deterministic: bool);

    /// Run the layer graph; the result is available via [`SubModel::output`].
    fn forward(&mut self, params: &[f64], input: ArrayView2<'_, f64>);

    /// Output of the last forward pass.
    fn output(&self) -> &Array2<f64>;

    /// Loss of `input` against `target`.
    fn evaluate(
        &mut self,
        params: &[f64],
        input: ArrayView2<'_, f64>,
        target: ArrayView2<'_, f64>,
    ) -> f64;

    /// Loss plus its parameter gradient, written (not added) into `gradient`.
    fn evaluate_with_gradient(
        &mut self,
        params: &[f64],
        input: ArrayView2<'_, f64>,
        target: ArrayView2<'_, f64>,
        gradient: &mut [f64],
    ) -> f64;

    /// Parameter gradient only.
    fn gradient(
        &mut self,
        params: &[f64],
        input: ArrayView2<'_, f64>,
        target: ArrayView2<'_, f64>,
        gradient: &mut [f64],
    ) {
        self.evaluate_with_gradient(params, input, target, gradient);
    }

    /// Back-propagate an externally supplied output error through the
    /// activations of the last forward pass and write the parameter gradient.
    fn backward_with_error(
        &mut self,
        params: &[f64],
        error: ArrayView2<'_, f64>,
        gradient: &mut [f64],
    );

    /// Zero a gradient buffer laid out like this model's segment.
    fn reset_gradients(&self, gradient: &mut [f64]) {
        gradient.fill(0.0);
    }

    /// Error w.r.t. the network input from the last backward pass.
    fn input_error(&self) -> &Array2<f64>;

    fn predictors(&self) -> &Array2<f64>;

    fn predictors_mut(&mut self) -> &mut Array2<f64>;

    fn responses(&self) -> &Array2<f64>;

    fn responses_mut(&mut self) -> &mut Array2<f64>;
}
