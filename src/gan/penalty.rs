//! WGAN-GP gradient penalty
//!
//! `P(θ) = λ Σ_j (‖∇ₓD(x̂_j)‖₂ − 1)²` over interpolates
//! `x̂_j = ε_j x_real_j + (1 − ε_j) x_fake_j`.
//!
//! The parameter gradient needs a mixed second derivative. With
//! `c_j = 2λ(‖g_j‖ − 1)` and `u_j = g_j / ‖g_j‖`,
//! `∂P/∂θ = Σ_j c_j ∂/∂θ [u_jᵀ ∇ₓD(x̂_j)]`, and the directional derivative
//! is taken by central differences along `u_j`:
//! `(∇θ Σ c_j D(x̂_j + h u_j) − ∇θ Σ c_j D(x̂_j − h u_j)) / 2h`.
//! Each term is one backward pass with output error `c`.

use ndarray::{s, Array2, ArrayView2, Axis};
use rand::Rng;

use crate::nn::SubModel;

/// Step used for the directional derivative.
const DIRECTION_STEP: f64 = 1e-5;

/// Norms below this are treated as zero (no well-defined direction).
const MIN_NORM: f64 = 1e-12;

/// Per-column random interpolation between real and generated samples.
///
/// Uses the leading `min(real, fake)` columns of each.
pub fn interpolate<R: Rng + ?Sized>(
    real: ArrayView2<'_, f64>,
    fake: ArrayView2<'_, f64>,
    rng: &mut R,
) -> Array2<f64> {
    let n = real.ncols().min(fake.ncols());
    let mut out = fake.slice(s![.., ..n]).to_owned();
    for (j, mut col) in out.axis_iter_mut(Axis(1)).enumerate() {
        let eps: f64 = rng.random();
        col.zip_mut_with(&real.column(j), |f, &r| *f = eps * r + (1.0 - eps) * *f);
    }
    out
}

/// Column-wise `∇ₓD` at `points`, read from the critic's input-error tap.
fn input_gradients<M: SubModel>(
    critic: &mut M,
    params: &[f64],
    points: ArrayView2<'_, f64>,
    scratch: &mut [f64],
) -> Array2<f64> {
    critic.forward(params, points);
    let ones = Array2::ones(critic.output().raw_dim());
    critic.backward_with_error(params, ones.view(), scratch);
    critic.input_error().clone()
}

fn column_norms(grads: &Array2<f64>) -> Vec<f64> {
    grads
        .axis_iter(Axis(1))
        .map(|col| col.dot(&col).sqrt())
        .collect()
}

/// Run `f` with the critic in deterministic mode, restoring its mode after.
fn deterministic<M: SubModel, T>(critic: &mut M, f: impl FnOnce(&mut M) -> T) -> T {
    let previous = critic.deterministic();
    critic.set_deterministic(true);
    let out = f(critic);
    critic.set_deterministic(previous);
    out
}

/// Penalty value only.
pub fn penalty_value<M: SubModel>(
    critic: &mut M,
    params: &[f64],
    points: ArrayView2<'_, f64>,
    lambda: f64,
) -> f64 {
    let mut scratch = vec![0.0; params.len()];
    deterministic(critic, |critic| {
        let grads = input_gradients(critic, params, points, &mut scratch);
        column_norms(&grads)
            .iter()
            .map(|norm| lambda * (norm - 1.0).powi(2))
            .sum::<f64>()
    })
}

/// Penalty value; its parameter gradient is added into `gradient`.
pub fn gradient_penalty<M: SubModel>(
    critic: &mut M,
    params: &[f64],
    points: ArrayView2<'_, f64>,
    lambda: f64,
    gradient: &mut [f64],
) -> f64 {
    let mut scratch = vec![0.0; params.len()];
    deterministic(critic, |critic| {
        let grads = input_gradients(critic, params, points, &mut scratch);
        let norms = column_norms(&grads);
        let value: f64 = norms
            .iter()
            .map(|norm| lambda * (norm - 1.0).powi(2))
            .sum();

        let mut directions = Array2::zeros(grads.raw_dim());
        let mut coefficients = Array2::zeros((1, grads.ncols()));
        for (j, &norm) in norms.iter().enumerate() {
            if norm > MIN_NORM {
                directions
                    .column_mut(j)
                    .assign(&(&grads.column(j) / norm));
                coefficients[[0, j]] = 2.0 * lambda * (norm - 1.0);
            }
        }

        let h = DIRECTION_STEP;
        let mut plus = vec![0.0; params.len()];
        let forward_points = &points + &(&directions * h);
        critic.forward(params, forward_points.view());
        critic.backward_with_error(params, coefficients.view(), &mut plus);

        let mut minus = vec![0.0; params.len()];
        let backward_points = &points - &(&directions * h);
        critic.forward(params, backward_points.view());
        critic.backward_with_error(params, coefficients.view(), &mut minus);

        for ((g, p), m) in gradient.iter_mut().zip(&plus).zip(&minus) {
            *g += (p - m) / (2.0 * h);
        }
        value
    })
}
