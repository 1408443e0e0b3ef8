//! The layer set needed to assemble generators and discriminators.

use ndarray::{Array2, ArrayView1, ArrayView2, ArrayViewMut1, ArrayViewMut2, Axis, Zip};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::init::InitRule;
use super::layer::Layer;
use super::output::sigmoid;

/// Declarative description of a layer, used by configs and checkpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerSpec {
    /// Pass-through; prepended to the discriminator as the join point
    Identity,
    /// Fully connected: `y = W x + b`
    Linear { inputs: usize, outputs: usize },
    /// `max(x, alpha * x)`
    LeakyRelu {
        #[serde(default = "default_leaky_alpha")]
        alpha: f64,
    },
    /// Logistic sigmoid
    Sigmoid,
    /// Hyperbolic tangent
    Tanh,
    /// Inverted dropout; inactive in deterministic mode
    Dropout { ratio: f64 },
}

fn default_leaky_alpha() -> f64 {
    0.03
}

impl LayerSpec {
    /// Instantiate the layer. `seed` feeds stochastic layers.
    pub fn build(&self, seed: u64) -> Box<dyn Layer> {
        match *self {
            Self::Identity => Box::new(Identity::default()),
            Self::Linear { inputs, outputs } => Box::new(Linear::new(inputs, outputs)),
            Self::LeakyRelu { alpha } => Box::new(LeakyRelu::new(alpha)),
            Self::Sigmoid => Box::new(Sigmoid::default()),
            Self::Tanh => Box::new(Tanh::default()),
            Self::Dropout { ratio } => Box::new(Dropout::new(ratio, seed)),
        }
    }

    /// Number of weights the built layer will read.
    pub fn weight_count(&self) -> usize {
        match *self {
            Self::Linear { inputs, outputs } => inputs * outputs + outputs,
            _ => 0,
        }
    }

    /// `(inputs, outputs)` for layers that change the feature width.
    pub fn dims(&self) -> Option<(usize, usize)> {
        match *self {
            Self::Linear { inputs, outputs } => Some((inputs, outputs)),
            _ => None,
        }
    }

    /// Short human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Linear { .. } => "linear",
            Self::LeakyRelu { .. } => "leaky_relu",
            Self::Sigmoid => "sigmoid",
            Self::Tanh => "tanh",
            Self::Dropout { .. } => "dropout",
        }
    }
}

/// Identity layer
#[derive(Debug, Default)]
pub struct Identity {
    output: Array2<f64>,
    delta: Array2<f64>,
}

impl Layer for Identity {
    fn forward(&mut self, _weights: &[f64], input: ArrayView2<'_, f64>) {
        self.output = input.to_owned();
    }

    fn backward(&mut self, _weights: &[f64], error: ArrayView2<'_, f64>) {
        self.delta = error.to_owned();
    }

    fn output(&self) -> &Array2<f64> {
        &self.output
    }

    fn delta(&self) -> &Array2<f64> {
        &self.delta
    }
}

/// Fully connected layer.
///
/// Parameter block layout: `outputs x inputs` weight matrix (row-major)
/// followed by `outputs` biases.
#[derive(Debug)]
pub struct Linear {
    inputs: usize,
    outputs: usize,
    output: Array2<f64>,
    delta: Array2<f64>,
}

impl Linear {
    /// Create a linear layer mapping `inputs` features to `outputs`.
    pub fn new(inputs: usize, outputs: usize) -> Self {
        Self {
            inputs,
            outputs,
            output: Array2::zeros((0, 0)),
            delta: Array2::zeros((0, 0)),
        }
    }

    fn matrix_len(&self) -> usize {
        self.inputs * self.outputs
    }

    /// Panics if `weights` is shorter than `weight_count()`.
    #[allow(clippy::expect_used)]
    fn split<'a>(&self, weights: &'a [f64]) -> (ArrayView2<'a, f64>, ArrayView1<'a, f64>) {
        let (w, b) = weights.split_at(self.matrix_len());
        let w = ArrayView2::from_shape((self.outputs, self.inputs), w)
            .expect("linear weight block is sized by weight_count");
        (w, ArrayView1::from(b))
    }
}

impl Layer for Linear {
    fn weight_count(&self) -> usize {
        self.matrix_len() + self.outputs
    }

    fn initialize(&self, rule: &mut dyn InitRule, weights: &mut [f64]) {
        let (w, b) = weights.split_at_mut(self.matrix_len());
        rule.initialize(w, self.inputs, self.outputs);
        b.fill(0.0);
    }

    fn forward(&mut self, weights: &[f64], input: ArrayView2<'_, f64>) {
        let (w, b) = self.split(weights);
        let mut out = w.dot(&input);
        out += &b.insert_axis(Axis(1));
        self.output = out;
    }

    fn backward(&mut self, weights: &[f64], error: ArrayView2<'_, f64>) {
        let (w, _) = self.split(weights);
        self.delta = w.t().dot(&error);
    }

    #[allow(clippy::expect_used)]
    fn gradient(
        &self,
        input: ArrayView2<'_, f64>,
        error: ArrayView2<'_, f64>,
        gradient: &mut [f64],
    ) {
        let (gw, gb) = gradient.split_at_mut(self.matrix_len());
        let mut gw = ArrayViewMut2::from_shape((self.outputs, self.inputs), gw)
            .expect("linear gradient block is sized by weight_count");
        gw.assign(&error.dot(&input.t()));
        ArrayViewMut1::from(gb).assign(&error.sum_axis(Axis(1)));
    }

    fn output(&self) -> &Array2<f64> {
        &self.output
    }

    fn delta(&self) -> &Array2<f64> {
        &self.delta
    }
}

/// Leaky rectified linear unit
#[derive(Debug)]
pub struct LeakyRelu {
    alpha: f64,
    /// Input of the last forward pass; the slope is chosen by its sign
    input: Array2<f64>,
    output: Array2<f64>,
    delta: Array2<f64>,
}

impl LeakyRelu {
    /// Create with negative-side slope `alpha`.
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            input: Array2::zeros((0, 0)),
            output: Array2::zeros((0, 0)),
            delta: Array2::zeros((0, 0)),
        }
    }
}

impl Layer for LeakyRelu {
    fn forward(&mut self, _weights: &[f64], input: ArrayView2<'_, f64>) {
        let alpha = self.alpha;
        self.input = input.to_owned();
        self.output = input.mapv(|x| if x > 0.0 { x } else { alpha * x });
    }

    fn backward(&mut self, _weights: &[f64], error: ArrayView2<'_, f64>) {
        let alpha = self.alpha;
        self.delta = Zip::from(&error)
            .and(&self.input)
            .map_collect(|&e, &x| if x > 0.0 { e } else { alpha * e });
    }

    fn output(&self) -> &Array2<f64> {
        &self.output
    }

    fn delta(&self) -> &Array2<f64> {
        &self.delta
    }
}

/// Logistic sigmoid activation
#[derive(Debug, Default)]
pub struct Sigmoid {
    output: Array2<f64>,
    delta: Array2<f64>,
}

impl Layer for Sigmoid {
    fn forward(&mut self, _weights: &[f64], input: ArrayView2<'_, f64>) {
        self.output = input.mapv(sigmoid);
    }

    fn backward(&mut self, _weights: &[f64], error: ArrayView2<'_, f64>) {
        self.delta = Zip::from(&error)
            .and(&self.output)
            .map_collect(|&e, &y| e * y * (1.0 - y));
    }

    fn output(&self) -> &Array2<f64> {
        &self.output
    }

    fn delta(&self) -> &Array2<f64> {
        &self.delta
    }
}

/// Hyperbolic tangent activation
#[derive(Debug, Default)]
pub struct Tanh {
    output: Array2<f64>,
    delta: Array2<f64>,
}

impl Layer for Tanh {
    fn forward(&mut self, _weights: &[f64], input: ArrayView2<'_, f64>) {
        self.output = input.mapv(f64::tanh);
    }

    fn backward(&mut self, _weights: &[f64], error: ArrayView2<'_, f64>) {
        self.delta = Zip::from(&error)
            .and(&self.output)
            .map_collect(|&e, &y| e * (1.0 - y * y));
    }

    fn output(&self) -> &Array2<f64> {
        &self.output
    }

    fn delta(&self) -> &Array2<f64> {
        &self.delta
    }
}

/// Inverted dropout.
///
/// In training mode each unit is zeroed with probability `ratio` and the
/// survivors are scaled by `1 / (1 - ratio)`; in deterministic mode the layer
/// is the identity.
#[derive(Debug)]
pub struct Dropout {
    ratio: f64,
    deterministic: bool,
    rng: StdRng,
    mask: Option<Array2<f64>>,
    output: Array2<f64>,
    delta: Array2<f64>,
}

impl Dropout {
    /// Create with drop probability `ratio` in `[0, 1)`.
    pub fn new(ratio: f64, seed: u64) -> Self {
        Self {
            ratio,
            deterministic: false,
            rng: StdRng::seed_from_u64(seed),
            mask: None,
            output: Array2::zeros((0, 0)),
            delta: Array2::zeros((0, 0)),
        }
    }
}

impl Layer for Dropout {
    fn forward(&mut self, _weights: &[f64], input: ArrayView2<'_, f64>) {
        if self.deterministic || self.ratio <= 0.0 {
            self.mask = None;
            self.output = input.to_owned();
            return;
        }

        let scale = 1.0 / (1.0 - self.ratio);
        let ratio = self.ratio;
        let rng = &mut self.rng;
        let mask = Array2::from_shape_simple_fn(input.raw_dim(), || {
            if rng.random::<f64>() < ratio {
                0.0
            } else {
                scale
            }
        });
        self.output = &input * &mask;
        self.mask = Some(mask);
    }

    fn backward(&mut self, _weights: &[f64], error: ArrayView2<'_, f64>) {
        self.delta = match &self.mask {
            Some(mask) => &error * mask,
            None => error.to_owned(),
        };
    }

    fn output(&self) -> &Array2<f64> {
        &self.output
    }

    fn delta(&self) -> &Array2<f64> {
        &self.delta
    }

    fn set_deterministic(&mut self, deterministic: bool) {
        self.deterministic = deterministic;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_linear_forward() {
        let mut layer = Linear::new(2, 1);
        // W = [1, 2], b = [0.5]
        let weights = [1.0, 2.0, 0.5];
        layer.forward(&weights, array![[1.0, 0.0], [1.0, 3.0]].view());
        assert_eq!(layer.output(), &array![[3.5, 6.5]]);
    }

    #[test]
    fn test_linear_gradient_matches_finite_difference() {
        let mut layer = Linear::new(3, 2);
        let weights: Vec<f64> = (0..layer.weight_count()).map(|i| 0.1 * i as f64 - 0.3).collect();
        let input = array![[0.5, -1.0], [2.0, 0.25], [-0.75, 1.5]];

        // Loss = sum(output)
        layer.forward(&weights, input.view());
        let error = Array2::ones(layer.output().raw_dim());
        let mut grad = vec![0.0; weights.len()];
        layer.gradient(input.view(), error.view(), &mut grad);

        let h = 1e-6;
        for k in 0..weights.len() {
            let mut plus = weights.clone();
            plus[k] += h;
            let mut minus = weights.clone();
            minus[k] -= h;
            layer.forward(&plus, input.view());
            let f_plus = layer.output().sum();
            layer.forward(&minus, input.view());
            let f_minus = layer.output().sum();
            assert_abs_diff_eq!(grad[k], (f_plus - f_minus) / (2.0 * h), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_linear_backward_is_transpose() {
        let mut layer = Linear::new(2, 2);
        let weights = [1.0, 2.0, 3.0, 4.0, 0.0, 0.0];
        layer.forward(&weights, array![[1.0], [1.0]].view());
        layer.backward(&weights, array![[1.0], [0.0]].view());
        assert_eq!(layer.delta(), &array![[1.0], [2.0]]);
    }

    #[test]
    fn test_leaky_relu() {
        let mut layer = LeakyRelu::new(0.1);
        layer.forward(&[], array![[-2.0, 3.0]].view());
        assert_abs_diff_eq!(layer.output()[[0, 0]], -0.2, epsilon = 1e-12);
        layer.backward(&[], array![[1.0, 1.0]].view());
        assert_eq!(layer.delta(), &array![[0.1, 1.0]]);
    }

    #[test]
    fn test_leaky_relu_slope_follows_input_sign() {
        let mut layer = LeakyRelu::new(-0.5);
        layer.forward(&[], array![[-2.0, 3.0]].view());
        assert_eq!(layer.output(), &array![[1.0, 3.0]]);
        layer.backward(&[], array![[1.0, 1.0]].view());
        assert_eq!(layer.delta(), &array![[-0.5, 1.0]]);
    }

    #[test]
    fn test_sigmoid_and_tanh_derivatives() {
        let mut s = Sigmoid::default();
        s.forward(&[], array![[0.0]].view());
        s.backward(&[], array![[1.0]].view());
        assert_abs_diff_eq!(s.delta()[[0, 0]], 0.25, epsilon = 1e-12);

        let mut t = Tanh::default();
        t.forward(&[], array![[0.0]].view());
        t.backward(&[], array![[2.0]].view());
        assert_abs_diff_eq!(t.delta()[[0, 0]], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_dropout_deterministic_is_identity() {
        let mut layer = Dropout::new(0.5, 7);
        layer.set_deterministic(true);
        let input = array![[1.0, 2.0], [3.0, 4.0]];
        layer.forward(&[], input.view());
        assert_eq!(layer.output(), &input);
    }

    #[test]
    fn test_dropout_training_masks_and_scales() {
        let mut layer = Dropout::new(0.5, 7);
        let input = Array2::ones((20, 20));
        layer.forward(&[], input.view());
        assert!(layer.output().iter().all(|&v| v == 0.0 || v == 2.0));
        assert!(layer.output().iter().any(|&v| v == 0.0));

        layer.backward(&[], input.view());
        assert_eq!(layer.delta(), layer.output());
    }

    #[test]
    fn test_layer_spec_yaml() {
        let yaml = "- type: linear\n  inputs: 4\n  outputs: 8\n- type: leaky_relu\n- type: dropout\n  ratio: 0.2\n";
        let specs: Vec<LayerSpec> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(specs[0], LayerSpec::Linear { inputs: 4, outputs: 8 });
        assert_eq!(specs[1], LayerSpec::LeakyRelu { alpha: 0.03 });
        assert_eq!(specs[0].weight_count(), 40);
        assert_eq!(specs[2].name(), "dropout");
    }
}
