//! GAN engine and training step logic.

use ndarray::{Array1, Array2, ArrayView2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace, warn};

use super::arena::ParameterArena;
use super::data::SampleStore;
use super::noise::NoiseSource;
use super::penalty::{gradient_penalty, interpolate, penalty_value};
use super::stats::{GanStats, StepReport};
use crate::config::{validate_gan_config, GanConfig};
use crate::error::Result;
use crate::nn::{FeedForward, InitRule, SubModel};
use crate::optim::{Objective, Optimizer};

/// Generator/discriminator pair trained against each other.
///
/// Both networks read their weights from one [`ParameterArena`]. The engine
/// is an [`Objective`]: each `evaluate_with_gradient` call produces one
/// gradient for the whole arena, with the discriminator half always
/// populated and the generator half populated only on update calls.
pub struct Gan<M: SubModel = FeedForward> {
    generator: M,
    discriminator: M,
    init: Box<dyn InitRule>,
    noise: Box<dyn NoiseSource>,
    config: GanConfig,
    arena: ParameterArena,
    data: SampleStore,
    /// `[noise_dim, batch_size]`, refilled on every evaluation
    noise_batch: Array2<f64>,
    /// Discriminator-sized gradient for the generated-batch term
    scratch: Vec<f64>,
    current_batch: usize,
    pre_train_remaining: usize,
    reset: bool,
    deterministic: bool,
    real_label: f64,
    fake_label: f64,
    rng: StdRng,
    stats: GanStats,
}

impl<M: SubModel> std::fmt::Debug for Gan<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gan")
            .field("config", &self.config)
            .field("parameters", &self.arena.len())
            .field("num_real", &self.data.num_real())
            .field("current_batch", &self.current_batch)
            .field("pre_train_remaining", &self.pre_train_remaining)
            .field("reset", &self.reset)
            .field("deterministic", &self.deterministic)
            .finish_non_exhaustive()
    }
}

impl<M: SubModel> Gan<M> {
    /// Create an engine.
    ///
    /// The discriminator gets a pass-through layer prepended so the error
    /// w.r.t. its input can be handed to the generator. No memory is
    /// allocated until [`Gan::reset`] or the first operation that needs it.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the policy does
    /// not accept the discriminator's loss.
    pub fn new(
        generator: M,
        mut discriminator: M,
        init: Box<dyn InitRule>,
        noise: Box<dyn NoiseSource>,
        config: GanConfig,
    ) -> Result<Self> {
        validate_gan_config(&config, discriminator.loss_kind())?;
        discriminator.insert_input_join();

        let rng = config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let (real_label, fake_label) = config.policy.labels(config.real_label, config.fake_label);

        let mut gan = Self {
            generator,
            discriminator,
            init,
            noise,
            pre_train_remaining: config.pre_train_size,
            config,
            arena: ParameterArena::default(),
            data: SampleStore::default(),
            noise_batch: Array2::zeros((0, 0)),
            scratch: Vec::new(),
            current_batch: 0,
            reset: false,
            deterministic: false,
            real_label,
            fake_label,
            rng,
            stats: GanStats::default(),
        };
        gan.generator.set_deterministic(false);
        gan.discriminator.set_deterministic(false);
        Ok(gan)
    }

    /// Allocate the arena, bind both networks to their segments and
    /// initialize every layer.
    pub fn reset(&mut self) {
        let gen_weights = self.generator.weight_count();
        let disc_weights = self.discriminator.weight_count();
        self.arena = ParameterArena::allocate(gen_weights, disc_weights);
        self.generator.bind(self.arena.generator());
        self.discriminator.bind(self.arena.discriminator());

        let (gen_params, disc_params) = self.arena.split_mut();
        self.generator.initialize(self.init.as_mut(), gen_params);
        self.discriminator.initialize(self.init.as_mut(), disc_params);
        self.reset = true;

        debug!(gen_weights, disc_weights, "allocated parameter arena");
    }

    fn ensure_reset(&mut self) {
        if self.arena.is_empty() {
            self.reset();
        } else {
            self.arena.normalize_layout();
        }
    }

    /// Load training data (`[features, n]`).
    ///
    /// Wasserstein policies replace the given labels with `(+1, -1)`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EmptyData`] if `samples` is empty.
    pub fn reset_data(
        &mut self,
        samples: ArrayView2<'_, f64>,
        real_label: f64,
        fake_label: f64,
    ) -> Result<()> {
        let (real, fake) = self.config.policy.labels(real_label, fake_label);
        if (real, fake) != (real_label, fake_label) {
            warn!(
                policy = %self.config.policy,
                real_label, fake_label, "overriding labels with critic scores (+1, -1)"
            );
        }

        let batch_size = self.config.batch_size;
        let noise_dim = self.config.noise_dim;
        let data = SampleStore::new(samples, batch_size, real, fake)?;

        self.current_batch = 0;
        self.real_label = real;
        self.fake_label = fake;
        self.noise_batch = Array2::zeros((noise_dim, batch_size));
        self.set_deterministic(true);
        *self.generator.predictors_mut() = Array2::zeros((noise_dim, batch_size));
        *self.generator.responses_mut() = Array2::zeros((data.feature_dim(), batch_size));
        self.data = data;

        if !self.reset {
            self.reset();
        }

        info!(
            samples = self.data.num_real(),
            features = self.data.feature_dim(),
            batch_size,
            "loaded training data"
        );
        Ok(())
    }

    /// Switch both networks between training and inference behavior.
    /// A no-op when already in the requested mode.
    pub fn set_deterministic(&mut self, deterministic: bool) {
        if self.deterministic == deterministic {
            return;
        }
        self.generator.set_deterministic(deterministic);
        self.discriminator.set_deterministic(deterministic);
        self.deterministic = deterministic;
    }

    fn fill_noise(&mut self) {
        let noise = &mut self.noise;
        self.noise_batch.mapv_inplace(|_| noise.sample());
    }

    fn clip_discriminator(&mut self) {
        if self.config.policy.clips_weights() {
            self.arena.clamp_discriminator(self.config.clipping_parameter);
        }
    }

    /// Discriminator loss on real batch `begin` plus a freshly generated
    /// batch (plus the gradient penalty for WGAN-GP). Inference mode, no
    /// gradient.
    pub fn evaluate(&mut self, begin: usize, _batch_size: usize) -> f64 {
        self.ensure_reset();
        self.set_deterministic(true);
        self.fill_noise();

        let (gen_params, disc_params) = self.arena.split();
        let real_loss = self.discriminator.evaluate(
            disc_params,
            self.data.real_predictors(begin),
            self.data.real_responses(begin),
        );

        self.generator.forward(gen_params, self.noise_batch.view());
        self.data.write_generated(self.generator.output().view());
        self.data.label_generated(self.fake_label);
        let fake_loss = self.discriminator.evaluate(
            disc_params,
            self.data.generated_predictors(),
            self.data.generated_responses(),
        );

        let mut loss = real_loss + fake_loss;
        if self.config.policy.penalizes_gradient() {
            let points = interpolate(
                self.data.real_predictors(begin),
                self.data.generated_predictors(),
                &mut self.rng,
            );
            loss += penalty_value(
                &mut self.discriminator,
                disc_params,
                points.view(),
                self.config.lambda,
            );
        }
        loss
    }

    /// One training step on real batch `begin`.
    ///
    /// `gradient` is resized to the parameter count if needed and
    /// overwritten. The discriminator half always receives the gradient of
    /// the real and generated terms; the generator half is non-zero only
    /// when `current_batch % generator_update_step == 0` and pretraining is
    /// exhausted.
    pub fn evaluate_with_gradient(
        &mut self,
        begin: usize,
        gradient: &mut Array1<f64>,
        _batch_size: usize,
    ) -> f64 {
        self.ensure_reset();
        self.clip_discriminator();

        let num_params = self.arena.len();
        if gradient.len() != num_params || !gradient.is_standard_layout() {
            *gradient = Array1::zeros(num_params);
        } else {
            gradient.fill(0.0);
        }
        let disc_len = self.arena.discriminator().len;
        self.scratch.clear();
        self.scratch.resize(disc_len, 0.0);

        self.set_deterministic(false);
        self.fill_noise();

        let update_generator = self.current_batch % self.config.generator_update_step == 0
            && self.pre_train_remaining == 0;
        let mut report = StepReport {
            generator_updated: update_generator,
            ..StepReport::default()
        };

        let Some(grad) = gradient.as_slice_mut() else {
            unreachable!("gradient was reallocated in standard layout above");
        };
        let (gen_grad, disc_grad) = grad.split_at_mut(self.arena.generator().len);
        let (gen_params, disc_params) = self.arena.split();

        report.real_loss = self.discriminator.evaluate_with_gradient(
            disc_params,
            self.data.real_predictors(begin),
            self.data.real_responses(begin),
            disc_grad,
        );

        self.generator.forward(gen_params, self.noise_batch.view());
        self.data.write_generated(self.generator.output().view());
        self.data.label_generated(self.fake_label);

        report.fake_loss = self.discriminator.evaluate_with_gradient(
            disc_params,
            self.data.generated_predictors(),
            self.data.generated_responses(),
            &mut self.scratch,
        );
        for (d, s) in disc_grad.iter_mut().zip(&self.scratch) {
            *d += s;
        }

        if self.config.policy.penalizes_gradient() {
            let points = interpolate(
                self.data.real_predictors(begin),
                self.data.generated_predictors(),
                &mut self.rng,
            );
            report.penalty = gradient_penalty(
                &mut self.discriminator,
                disc_params,
                points.view(),
                self.config.lambda,
                disc_grad,
            );
        }

        if update_generator {
            // Score the generated batch as if it were real; the error at the
            // discriminator input is what the generator must reduce.
            self.data.label_generated(self.real_label);
            self.discriminator.gradient(
                disc_params,
                self.data.generated_predictors(),
                self.data.generated_responses(),
                &mut self.scratch,
            );

            *self.generator.predictors_mut() = self.noise_batch.clone();
            self.generator.reset_gradients(gen_grad);
            self.generator.backward_with_error(
                gen_params,
                self.discriminator.input_error().view(),
                gen_grad,
            );
            for g in gen_grad.iter_mut() {
                *g *= self.config.multiplier;
            }
            self.data.label_generated(self.fake_label);
        }

        trace!(
            current_batch = self.current_batch,
            begin,
            loss = report.total(),
            generator_updated = update_generator,
            "gradient step"
        );

        self.current_batch += 1;
        if self.pre_train_remaining > 0 {
            self.pre_train_remaining -= 1;
        }
        self.stats.record(report);
        report.total()
    }

    /// Gradient only; same contract as [`Gan::evaluate_with_gradient`].
    pub fn gradient(&mut self, begin: usize, gradient: &mut Array1<f64>, batch_size: usize) {
        self.evaluate_with_gradient(begin, gradient, batch_size);
    }

    /// Run the generator on `input` and feed its output to the
    /// discriminator. Uses the current mode.
    pub fn forward(&mut self, input: ArrayView2<'_, f64>) {
        self.ensure_reset();
        let (gen_params, disc_params) = self.arena.split();
        self.generator.forward(gen_params, input);
        self.discriminator
            .forward(disc_params, self.generator.output().view());
    }

    /// Discriminator scores for generator inputs, in inference mode.
    pub fn predict(&mut self, input: ArrayView2<'_, f64>) -> Array2<f64> {
        self.set_deterministic(true);
        self.forward(input);
        self.discriminator.output().clone()
    }

    /// Draw `count` samples (`[features, count]`) in inference mode.
    pub fn generate(&mut self, count: usize) -> Array2<f64> {
        self.ensure_reset();
        self.set_deterministic(true);
        let noise = &mut self.noise;
        let latent = Array2::from_shape_simple_fn((self.config.noise_dim, count), || noise.sample());
        let (gen_params, _) = self.arena.split();
        self.generator.forward(gen_params, latent.view());
        self.generator.output().clone()
    }

    /// Randomly permute the real samples.
    pub fn shuffle(&mut self) {
        self.data.shuffle(&mut self.rng);
    }

    /// Load `samples` and hand the engine to `optimizer`.
    ///
    /// Returns the optimizer's final objective value.
    pub fn train<O: Optimizer>(
        &mut self,
        samples: ArrayView2<'_, f64>,
        optimizer: &mut O,
        real_label: f64,
        fake_label: f64,
    ) -> Result<f64> {
        self.reset_data(samples, real_label, fake_label)?;
        info!(
            policy = %self.config.policy,
            parameters = self.arena.len(),
            "starting adversarial training"
        );
        let objective = optimizer.optimize(self)?;
        info!(
            objective,
            steps = self.stats.steps,
            generator_updates = self.stats.generator_updates,
            "training finished"
        );
        Ok(objective)
    }

    pub fn parameters(&self) -> &Array1<f64> {
        self.arena.as_array()
    }

    pub fn parameters_mut(&mut self) -> &mut Array1<f64> {
        self.arena.as_array_mut()
    }

    pub fn arena(&self) -> &ParameterArena {
        &self.arena
    }

    pub fn generator(&self) -> &M {
        &self.generator
    }

    pub fn discriminator(&self) -> &M {
        &self.discriminator
    }

    pub fn config(&self) -> &GanConfig {
        &self.config
    }

    pub fn data(&self) -> &SampleStore {
        &self.data
    }

    pub fn stats(&self) -> &GanStats {
        &self.stats
    }

    pub fn current_batch(&self) -> usize {
        self.current_batch
    }

    pub fn pre_train_remaining(&self) -> usize {
        self.pre_train_remaining
    }

    pub fn is_reset(&self) -> bool {
        self.reset
    }

    pub fn is_deterministic(&self) -> bool {
        self.deterministic
    }

    /// Effective `(real, fake)` labels.
    pub fn labels(&self) -> (f64, f64) {
        (self.real_label, self.fake_label)
    }

    /// Noise batch used by the last evaluation.
    pub fn noise_batch(&self) -> &Array2<f64> {
        &self.noise_batch
    }

    pub(crate) fn restore(&mut self, arena: ParameterArena, reset: bool) {
        self.arena = arena;
        self.generator.bind(self.arena.generator());
        self.discriminator.bind(self.arena.discriminator());
        self.reset = reset;
        self.set_deterministic(true);
    }
}

impl<M: SubModel> Objective for Gan<M> {
    fn num_functions(&self) -> usize {
        self.data.num_real()
    }

    fn parameters(&self) -> &Array1<f64> {
        self.arena.as_array()
    }

    fn parameters_mut(&mut self) -> &mut Array1<f64> {
        self.arena.as_array_mut()
    }

    fn evaluate(&mut self, begin: usize, batch_size: usize) -> f64 {
        Gan::evaluate(self, begin, batch_size)
    }

    fn evaluate_with_gradient(
        &mut self,
        begin: usize,
        gradient: &mut Array1<f64>,
        batch_size: usize,
    ) -> f64 {
        Gan::evaluate_with_gradient(self, begin, gradient, batch_size)
    }

    fn shuffle(&mut self) {
        Gan::shuffle(self);
    }

    fn constrain(&mut self) {
        self.clip_discriminator();
    }
}
