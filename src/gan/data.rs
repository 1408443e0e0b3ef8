//! Fused real + generated sample storage lent to the discriminator.

use std::ops::Range;

use ndarray::{s, Array2, ArrayView1, ArrayView2, Axis};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};

/// Real samples followed by one batch-sized region for generated samples.
///
/// Predictors are `[features, num_real + batch_size]`; responses are
/// `[1, num_real + batch_size]` with the real-label block first and the
/// fake-label block last.
#[derive(Debug, Clone)]
pub struct SampleStore {
    predictors: Array2<f64>,
    responses: Array2<f64>,
    num_real: usize,
    batch_size: usize,
}

impl Default for SampleStore {
    fn default() -> Self {
        Self {
            predictors: Array2::zeros((0, 0)),
            responses: Array2::zeros((1, 0)),
            num_real: 0,
            batch_size: 0,
        }
    }
}

impl SampleStore {
    /// Build the fused buffers from `samples` (`[features, n]`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] if `samples` has no rows or no columns.
    pub fn new(
        samples: ArrayView2<'_, f64>,
        batch_size: usize,
        real_label: f64,
        fake_label: f64,
    ) -> Result<Self> {
        let (features, num_real) = samples.dim();
        if features == 0 || num_real == 0 {
            return Err(Error::EmptyData(format!(
                "sample matrix is {features}x{num_real}"
            )));
        }

        let mut predictors = Array2::zeros((features, num_real + batch_size));
        predictors.slice_mut(s![.., ..num_real]).assign(&samples);

        let mut responses = Array2::from_elem((1, num_real + batch_size), real_label);
        responses.slice_mut(s![.., num_real..]).fill(fake_label);

        Ok(Self {
            predictors,
            responses,
            num_real,
            batch_size,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.num_real == 0
    }

    pub fn num_real(&self) -> usize {
        self.num_real
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn feature_dim(&self) -> usize {
        self.predictors.nrows()
    }

    pub fn predictors(&self) -> &Array2<f64> {
        &self.predictors
    }

    pub fn responses(&self) -> &Array2<f64> {
        &self.responses
    }

    /// Columns of the real minibatch starting at `begin`, clamped to the
    /// real region.
    pub fn real_range(&self, begin: usize) -> Range<usize> {
        let start = begin.min(self.num_real);
        let end = begin.saturating_add(self.batch_size).min(self.num_real);
        start..end
    }

    pub fn real_predictors(&self, begin: usize) -> ArrayView2<'_, f64> {
        let cols = self.real_range(begin);
        self.predictors.slice(s![.., cols])
    }

    pub fn real_responses(&self, begin: usize) -> ArrayView2<'_, f64> {
        let cols = self.real_range(begin);
        self.responses.slice(s![.., cols])
    }

    pub fn generated_predictors(&self) -> ArrayView2<'_, f64> {
        self.predictors.slice(s![.., self.num_real..])
    }

    pub fn generated_responses(&self) -> ArrayView2<'_, f64> {
        self.responses.slice(s![.., self.num_real..])
    }

    /// Labels currently attached to the generated region.
    pub fn generated_labels(&self) -> ArrayView1<'_, f64> {
        self.responses.row(0).slice_move(s![self.num_real..])
    }

    /// Overwrite the generated region with a batch of generator output.
    pub fn write_generated(&mut self, samples: ArrayView2<'_, f64>) {
        self.predictors
            .slice_mut(s![.., self.num_real..])
            .assign(&samples);
    }

    pub fn label_generated(&mut self, label: f64) {
        self.responses.slice_mut(s![.., self.num_real..]).fill(label);
    }

    /// Randomly permute the real columns; the generated region is untouched.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut order: Vec<usize> = (0..self.num_real).collect();
        order.shuffle(rng);
        let permuted = self
            .predictors
            .slice(s![.., ..self.num_real])
            .select(Axis(1), &order);
        self.predictors
            .slice_mut(s![.., ..self.num_real])
            .assign(&permuted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn store() -> SampleStore {
        let samples = array![[1.0, 2.0, 3.0, 4.0, 5.0], [10.0, 20.0, 30.0, 40.0, 50.0]];
        SampleStore::new(samples.view(), 2, 1.0, 0.0).unwrap()
    }

    #[test]
    fn test_layout() {
        let store = store();
        assert_eq!(store.predictors().dim(), (2, 7));
        assert_eq!(store.responses().row(0).to_vec(), vec![1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0]);
        assert_eq!(store.feature_dim(), 2);
    }

    #[test]
    fn test_empty_rejected() {
        let empty = Array2::<f64>::zeros((2, 0));
        let err = SampleStore::new(empty.view(), 2, 1.0, 0.0).unwrap_err();
        assert!(matches!(err, Error::EmptyData(_)));
    }

    #[test]
    fn test_real_slice_is_clamped() {
        let store = store();
        assert_eq!(store.real_range(0), 0..2);
        assert_eq!(store.real_range(4), 4..5);
        assert_eq!(store.real_range(9), 5..5);
        assert_eq!(store.real_predictors(4), array![[5.0], [50.0]]);
    }

    #[test]
    fn test_write_and_label_generated() {
        let mut store = store();
        store.write_generated(array![[7.0, 8.0], [70.0, 80.0]].view());
        store.label_generated(1.0);
        assert_eq!(store.generated_predictors(), array![[7.0, 8.0], [70.0, 80.0]]);
        assert_eq!(store.generated_labels().to_vec(), vec![1.0, 1.0]);
        // real block unchanged
        assert_eq!(store.real_predictors(0), array![[1.0, 2.0], [10.0, 20.0]]);
    }

    #[test]
    fn test_shuffle_permutes_real_columns_only() {
        let mut store = store();
        store.write_generated(array![[7.0, 8.0], [70.0, 80.0]].view());
        let mut rng = StdRng::seed_from_u64(1);
        store.shuffle(&mut rng);

        let mut firsts: Vec<f64> = store.predictors().row(0).iter().take(5).copied().collect();
        // Columns move together
        for c in 0..5 {
            assert_eq!(store.predictors()[[1, c]], store.predictors()[[0, c]] * 10.0);
        }
        firsts.sort_by(f64::total_cmp);
        assert_eq!(firsts, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(store.generated_predictors(), array![[7.0, 8.0], [70.0, 80.0]]);
    }
}
