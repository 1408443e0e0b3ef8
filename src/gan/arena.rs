//! Shared parameter storage for the generator and discriminator.
//!
//! One contiguous buffer holds every trainable weight. The generator owns
//! `[0, gen)`, the discriminator `[gen, gen + disc)`. Sub-models only keep a
//! [`Segment`] and are handed slices on each call, so an optimizer step on
//! the whole buffer is seen by both networks without copying.

use std::ops::Range;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// A half-open range of the parameter buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub offset: usize,
    pub len: usize,
}

impl Segment {
    pub fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    pub fn end(self) -> usize {
        self.offset + self.len
    }

    pub fn range(self) -> Range<usize> {
        self.offset..self.end()
    }

    /// This segment's view of `buffer`.
    pub fn of(self, buffer: &[f64]) -> &[f64] {
        &buffer[self.range()]
    }

    pub fn of_mut(self, buffer: &mut [f64]) -> &mut [f64] {
        &mut buffer[self.range()]
    }
}

/// Contiguous parameter buffer split into generator and discriminator halves.
#[derive(Debug, Clone)]
pub struct ParameterArena {
    buffer: Array1<f64>,
    generator: Segment,
    discriminator: Segment,
}

impl Default for ParameterArena {
    fn default() -> Self {
        Self::allocate(0, 0)
    }
}

impl ParameterArena {
    /// Zero-filled arena for the given weight counts.
    pub fn allocate(gen_weights: usize, disc_weights: usize) -> Self {
        Self {
            buffer: Array1::zeros(gen_weights + disc_weights),
            generator: Segment::new(0, gen_weights),
            discriminator: Segment::new(gen_weights, disc_weights),
        }
    }

    /// Arena over an existing buffer, e.g. a restored checkpoint.
    ///
    /// Returns `None` unless `buffer.len() == gen_weights + disc_weights`.
    pub fn from_vec(buffer: Vec<f64>, gen_weights: usize, disc_weights: usize) -> Option<Self> {
        (buffer.len() == gen_weights + disc_weights).then(|| Self {
            buffer: Array1::from(buffer),
            generator: Segment::new(0, gen_weights),
            discriminator: Segment::new(gen_weights, disc_weights),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn generator(&self) -> Segment {
        self.generator
    }

    pub fn discriminator(&self) -> Segment {
        self.discriminator
    }

    pub fn as_array(&self) -> &Array1<f64> {
        &self.buffer
    }

    /// Mutable access for optimizers. The length must not change.
    pub fn as_array_mut(&mut self) -> &mut Array1<f64> {
        &mut self.buffer
    }

    /// Copy the buffer back into standard layout if a caller replaced it
    /// through [`as_array_mut`](Self::as_array_mut) with a strided array.
    pub fn normalize_layout(&mut self) {
        if !self.buffer.is_standard_layout() {
            self.buffer = self.buffer.as_standard_layout().into_owned();
        }
    }

    /// Contiguous view of the buffer.
    ///
    /// # Panics
    ///
    /// Panics if a strided array was installed through `as_array_mut` and
    /// [`normalize_layout`](Self::normalize_layout) has not run since.
    #[allow(clippy::expect_used)]
    pub fn as_slice(&self) -> &[f64] {
        self.buffer
            .as_slice()
            .expect("arena buffer is normalized before slicing")
    }

    pub fn as_slice_mut(&mut self) -> &mut [f64] {
        self.normalize_layout();
        match self.buffer.as_slice_mut() {
            Some(slice) => slice,
            None => unreachable!("normalize_layout leaves a contiguous buffer"),
        }
    }

    /// Generator and discriminator views.
    pub fn split(&self) -> (&[f64], &[f64]) {
        let gen_len = self.generator.len;
        self.as_slice().split_at(gen_len)
    }

    /// Disjoint mutable generator and discriminator views.
    pub fn split_mut(&mut self) -> (&mut [f64], &mut [f64]) {
        let gen_len = self.generator.len;
        self.as_slice_mut().split_at_mut(gen_len)
    }

    /// Clamp every discriminator weight into `[-bound, bound]`.
    pub fn clamp_discriminator(&mut self, bound: f64) {
        let segment = self.discriminator;
        for w in segment.of_mut(self.as_slice_mut()) {
            *w = w.clamp(-bound, bound);
        }
    }
}
