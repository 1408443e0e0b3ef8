//! Separable objective consumed by minibatch optimizers

use ndarray::Array1;

/// A differentiable objective that is a sum of `num_functions` terms,
/// evaluated one minibatch at a time.
///
/// Implementors own their parameters; optimizers update them in place
/// through [`Objective::parameters_mut`].
pub trait Objective {
    /// Number of separable terms (e.g. training samples).
    fn num_functions(&self) -> usize;

    fn parameters(&self) -> &Array1<f64>;

    /// Mutable parameters. Optimizers must not change the length.
    fn parameters_mut(&mut self) -> &mut Array1<f64>;

    /// Objective over terms `[begin, begin + batch_size)`.
    fn evaluate(&mut self, begin: usize, batch_size: usize) -> f64;

    /// Objective plus gradient. `gradient` is resized to the parameter
    /// count if needed and overwritten.
    fn evaluate_with_gradient(
        &mut self,
        begin: usize,
        gradient: &mut Array1<f64>,
        batch_size: usize,
    ) -> f64;

    /// Gradient only.
    fn gradient(&mut self, begin: usize, gradient: &mut Array1<f64>, batch_size: usize) {
        self.evaluate_with_gradient(begin, gradient, batch_size);
    }

    /// Reorder the terms; called by optimizers between passes.
    fn shuffle(&mut self) {}

    /// Project the parameters back onto the feasible set after a step.
    fn constrain(&mut self) {}
}
