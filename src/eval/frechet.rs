//! Fréchet distance between two sample sets
//!
//! Both sets are modelled as Gaussians fitted by their sample mean and
//! covariance (`n - 1` normalization). The distance is
//!
//! ```text
//! ‖μp − μq‖₂ + tr(Cp) + tr(Cq) − 2·tr(sqrtm(Cp·Cq))
//! ```
//!
//! `tr(sqrtm(Cp·Cq))` is evaluated as the sum of square roots of the
//! eigenvalues of the symmetric matrix `sqrt(Cp)·Cq·sqrt(Cp)`, which has the
//! same spectrum and avoids a non-symmetric matrix square root.

use nalgebra::{DMatrix, DVector, SymmetricEigen};
use ndarray::ArrayView2;

/// Fréchet distance between `p` and `q`, both `[features, samples]`.
///
/// Sets with fewer than two samples get a zero covariance.
///
/// # Panics
///
/// Panics if `p` and `q` have a different number of rows.
pub fn frechet_distance(p: ArrayView2<'_, f64>, q: ArrayView2<'_, f64>) -> f64 {
    assert_eq!(
        p.nrows(),
        q.nrows(),
        "sample sets must have the same feature dimension"
    );

    let (mean_p, cov_p) = moments(p);
    let (mean_q, cov_q) = moments(q);

    let mean_term = (&mean_p - &mean_q).norm();

    let sqrt_p = psd_sqrt(&cov_p);
    let inner = &sqrt_p * &cov_q * &sqrt_p;
    // Symmetrize away rounding before the eigensolve
    let inner = (&inner + inner.transpose()) * 0.5;
    let cross: f64 = SymmetricEigen::new(inner)
        .eigenvalues
        .iter()
        .map(|&l| l.max(0.0).sqrt())
        .sum();

    let distance = mean_term + cov_p.trace() + cov_q.trace() - 2.0 * cross;
    distance.max(0.0)
}

/// Sample mean and covariance of a `[features, samples]` matrix
fn moments(samples: ArrayView2<'_, f64>) -> (DVector<f64>, DMatrix<f64>) {
    let (features, n) = samples.dim();
    let data = DMatrix::from_fn(features, n, |i, j| samples[[i, j]]);
    if n == 0 {
        return (DVector::zeros(features), DMatrix::zeros(features, features));
    }

    let mean = data.column_mean();
    if n < 2 {
        return (mean, DMatrix::zeros(features, features));
    }

    let mut centered = data;
    for mut column in centered.column_iter_mut() {
        column -= &mean;
    }
    let cov = &centered * centered.transpose() / (n - 1) as f64;
    (mean, cov)
}

/// Principal square root of a symmetric positive semi-definite matrix
fn psd_sqrt(matrix: &DMatrix<f64>) -> DMatrix<f64> {
    let eigen = SymmetricEigen::new(matrix.clone());
    let roots = eigen.eigenvalues.map(|l| l.max(0.0).sqrt());
    &eigen.eigenvectors * DMatrix::from_diagonal(&roots) * eigen.eigenvectors.transpose()
}
