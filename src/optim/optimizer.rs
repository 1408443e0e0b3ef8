//! Optimizer trait

use super::objective::Objective;
use crate::error::Result;

/// Trait for optimization algorithms
///
/// An optimizer drives an [`Objective`]: it requests minibatch gradients,
/// updates [`Objective::parameters_mut`] in place, and calls
/// [`Objective::constrain`] after each step.
pub trait Optimizer {
    /// Run to completion and return the final objective value.
    fn optimize<F: Objective + ?Sized>(&mut self, objective: &mut F) -> Result<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{arr1, Array1};

    /// Σ_i (x - t_i)² over targets; minimized at the mean of the targets
    struct Quadratic {
        x: Array1<f64>,
        targets: Vec<f64>,
        shuffles: usize,
        bound: Option<f64>,
    }

    impl Objective for Quadratic {
        fn num_functions(&self) -> usize {
            self.targets.len()
        }

        fn parameters(&self) -> &Array1<f64> {
            &self.x
        }

        fn parameters_mut(&mut self) -> &mut Array1<f64> {
            &mut self.x
        }

        fn evaluate(&mut self, begin: usize, batch_size: usize) -> f64 {
            let x = self.x[0];
            self.targets[begin..(begin + batch_size).min(self.targets.len())]
                .iter()
                .map(|t| (x - t).powi(2))
                .sum()
        }

        fn evaluate_with_gradient(
            &mut self,
            begin: usize,
            gradient: &mut Array1<f64>,
            batch_size: usize,
        ) -> f64 {
            let x = self.x[0];
            let batch = &self.targets[begin..(begin + batch_size).min(self.targets.len())];
            *gradient = arr1(&[batch.iter().map(|t| 2.0 * (x - t)).sum()]);
            batch.iter().map(|t| (x - t).powi(2)).sum()
        }

        fn shuffle(&mut self) {
            self.shuffles += 1;
        }

        fn constrain(&mut self) {
            if let Some(bound) = self.bound {
                self.x.mapv_inplace(|v| v.clamp(-bound, bound));
            }
        }
    }

    /// Minimal fixed-step descent driver for exercising the trait
    struct Descent {
        step: f64,
        epochs: usize,
        batch_size: usize,
    }

    impl Optimizer for Descent {
        fn optimize<F: Objective + ?Sized>(&mut self, objective: &mut F) -> Result<f64> {
            let mut gradient = Array1::zeros(0);
            for _ in 0..self.epochs {
                objective.shuffle();
                let mut begin = 0;
                while begin < objective.num_functions() {
                    objective.gradient(begin, &mut gradient, self.batch_size);
                    objective.parameters_mut().scaled_add(-self.step, &gradient);
                    objective.constrain();
                    begin += self.batch_size;
                }
            }
            Ok(objective.evaluate(0, objective.num_functions()))
        }
    }

    fn quadratic(bound: Option<f64>) -> Quadratic {
        Quadratic {
            x: arr1(&[0.0]),
            targets: vec![1.0, 2.0, 3.0, 4.0],
            shuffles: 0,
            bound,
        }
    }

    #[test]
    fn test_descent_converges() {
        let mut f = quadratic(None);
        let mut opt = Descent { step: 0.05, epochs: 200, batch_size: 2 };
        let value = opt.optimize(&mut f).unwrap();
        assert_abs_diff_eq!(f.x[0], 2.5, epsilon = 0.15);
        assert!(value < 5.5);
        assert_eq!(f.shuffles, 200);
    }

    #[test]
    fn test_constrain_applied_after_each_step() {
        let mut f = quadratic(Some(0.5));
        let mut opt = Descent { step: 0.1, epochs: 5, batch_size: 1 };
        opt.optimize(&mut f).unwrap();
        assert_abs_diff_eq!(f.x[0], 0.5);
    }

    #[test]
    fn test_default_gradient_delegates() {
        let mut f = quadratic(None);
        let mut gradient = Array1::zeros(3);
        f.gradient(0, &mut gradient, 4);
        assert_eq!(gradient, arr1(&[-20.0]));
    }
}
