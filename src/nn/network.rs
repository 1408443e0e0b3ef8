//! Sequential feed-forward network bound to an arena segment.

use ndarray::{Array2, ArrayView2};

use super::init::InitRule;
use super::layer::Layer;
use super::layers::{Identity, LayerSpec};
use super::model::SubModel;
use super::output::{OutputLayer, OutputSpec};
use crate::config::validate_layers;
use crate::error::Result;
use crate::gan::arena::Segment;

/// A chain of layers followed by an output (loss) layer.
///
/// Layer `i` reads weights `params[offsets[i]..offsets[i + 1]]` of the
/// segment slice passed to each call.
#[derive(Debug)]
pub struct FeedForward {
    specs: Vec<LayerSpec>,
    layers: Vec<Box<dyn Layer>>,
    output_spec: OutputSpec,
    output_layer: Box<dyn OutputLayer>,
    offsets: Vec<usize>,
    segment: Segment,
    seed: u64,
    joined: bool,
    deterministic: bool,
    /// Input of the last forward pass
    input: Array2<f64>,
    /// Error w.r.t. the network output, from the last backward pass
    error: Array2<f64>,
    predictors: Array2<f64>,
    responses: Array2<f64>,
}

impl FeedForward {
    /// Build a network from layer specs.
    ///
    /// # Errors
    ///
    /// Returns an error if consecutive linear layers disagree on width or a
    /// layer parameter is out of range.
    pub fn new(specs: Vec<LayerSpec>, output: OutputSpec, seed: u64) -> Result<Self> {
        validate_layers("network", &specs)?;
        let layers = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| spec.build(seed.wrapping_add(i as u64)))
            .collect();
        let offsets = offsets_of(&specs);
        Ok(Self {
            specs,
            layers,
            output_spec: output,
            output_layer: output.build(),
            offsets,
            segment: Segment::default(),
            seed,
            joined: false,
            deterministic: false,
            input: Array2::zeros((0, 0)),
            error: Array2::zeros((0, 0)),
            predictors: Array2::zeros((0, 0)),
            responses: Array2::zeros((0, 0)),
        })
    }

    /// Layer specs in execution order, including the input join if present.
    pub fn specs(&self) -> &[LayerSpec] {
        &self.specs
    }

    /// Layer specs as originally supplied, without the input join.
    pub fn user_specs(&self) -> &[LayerSpec] {
        &self.specs[usize::from(self.joined)..]
    }

    pub fn output_spec(&self) -> OutputSpec {
        self.output_spec
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_joined(&self) -> bool {
        self.joined
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Same as [`SubModel::weight_count`], without the trait import.
    pub fn num_weights(&self) -> usize {
        SubModel::weight_count(self)
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Width of the first linear layer's input, if any.
    pub fn input_dim(&self) -> Option<usize> {
        self.specs.iter().find_map(LayerSpec::dims).map(|(i, _)| i)
    }

    /// Width of the last linear layer's output, if any.
    pub fn output_dim(&self) -> Option<usize> {
        self.specs.iter().rev().find_map(LayerSpec::dims).map(|(_, o)| o)
    }

    fn block<'a>(&self, params: &'a [f64], i: usize) -> &'a [f64] {
        &params[self.offsets[i]..self.offsets[i + 1]]
    }

    /// Propagate `self.error` backwards, stopping at the first layer whose
    /// delta is read (the join's own delta is never needed).
    fn backward(&mut self, params: &[f64]) {
        let stop = usize::from(self.joined);
        for i in (stop..self.layers.len()).rev() {
            let weights = self.block(params, i);
            let (head, tail) = self.layers.split_at_mut(i + 1);
            let error = match tail.first() {
                Some(next) => next.delta().view(),
                None => self.error.view(),
            };
            head[i].backward(weights, error);
        }
    }

    /// Overwrite every layer's gradient block from cached activations.
    fn write_gradient(&self, gradient: &mut [f64]) {
        for (i, layer) in self.layers.iter().enumerate() {
            let input = match i.checked_sub(1) {
                Some(prev) => self.layers[prev].output().view(),
                None => self.input.view(),
            };
            let error = match self.layers.get(i + 1) {
                Some(next) => next.delta().view(),
                None => self.error.view(),
            };
            layer.gradient(
                input,
                error,
                &mut gradient[self.offsets[i]..self.offsets[i + 1]],
            );
        }
    }
}

fn offsets_of(specs: &[LayerSpec]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(specs.len() + 1);
    let mut total = 0;
    offsets.push(0);
    for spec in specs {
        total += spec.weight_count();
        offsets.push(total);
    }
    offsets
}

impl SubModel for FeedForward {
    fn weight_count(&self) -> usize {
        self.offsets.last().copied().unwrap_or(0)
    }

    fn segment(&self) -> Segment {
        self.segment
    }

    fn bind(&mut self, segment: Segment) {
        debug_assert_eq!(segment.len, self.weight_count());
        self.segment = segment;
    }

    fn initialize(&self, rule: &mut dyn InitRule, params: &mut [f64]) {
        for (i, layer) in self.layers.iter().enumerate() {
            layer.initialize(rule, &mut params[self.offsets[i]..self.offsets[i + 1]]);
        }
    }

    fn insert_input_join(&mut self) {
        if self.joined {
            return;
        }
        self.specs.insert(0, LayerSpec::Identity);
        self.layers.insert(0, Box::new(Identity::default()));
        self.offsets.insert(0, 0);
        self.joined = true;
    }

    fn loss_kind(&self) -> OutputSpec {
        self.output_spec
    }

    fn deterministic(&self) -> bool {
        self.deterministic
    }

    fn set_deterministic(&mut self, deterministic: bool) {
        self.deterministic = deterministic;
        for layer in &mut self.layers {
            layer.set_deterministic(deterministic);
        }
    }

    fn forward(&mut self, params: &[f64], input: ArrayView2<'_, f64>) {
        self.input = input.to_owned();
        for i in 0..self.layers.len() {
            let weights = self.block(params, i);
            let (done, rest) = self.layers.split_at_mut(i);
            let layer_input = match done.last() {
                Some(prev) => prev.output().view(),
                None => self.input.view(),
            };
            rest[0].forward(weights, layer_input);
        }
    }

    fn output(&self) -> &Array2<f64> {
        self.layers.last().map_or(&self.input, |layer| layer.output())
    }

    fn evaluate(
        &mut self,
        params: &[f64],
        input: ArrayView2<'_, f64>,
        target: ArrayView2<'_, f64>,
    ) -> f64 {
        self.forward(params, input);
        self.output_layer.forward(self.output().view(), target)
    }

    fn evaluate_with_gradient(
        &mut self,
        params: &[f64],
        input: ArrayView2<'_, f64>,
        target: ArrayView2<'_, f64>,
        gradient: &mut [f64],
    ) -> f64 {
        self.forward(params, input);
        let loss = self.output_layer.forward(self.output().view(), target);
        self.error = self.output_layer.backward(self.output().view(), target);
        self.backward(params);
        self.write_gradient(gradient);
        loss
    }

    fn backward_with_error(
        &mut self,
        params: &[f64],
        error: ArrayView2<'_, f64>,
        gradient: &mut [f64],
    ) {
        self.error = error.to_owned();
        self.backward(params);
        self.write_gradient(gradient);
    }

    fn input_error(&self) -> &Array2<f64> {
        let tap = usize::from(self.joined);
        self.layers.get(tap).map_or(&self.error, |layer| layer.delta())
    }

    fn predictors(&self) -> &Array2<f64> {
        &self.predictors
    }

    fn predictors_mut(&mut self) -> &mut Array2<f64> {
        &mut self.predictors
    }

    fn responses(&self) -> &Array2<f64> {
        &self.responses
    }

    fn responses_mut(&mut self) -> &mut Array2<f64> {
        &mut self.responses
    }
}
