//! JSON checkpoints of a feed-forward engine.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::arena::ParameterArena;
use super::engine::Gan;
use super::noise::NoiseSource;
use crate::config::GanConfig;
use crate::error::{Error, Result};
use crate::nn::{FeedForward, InitRule, LayerSpec, OutputSpec, SubModel};

/// Layer graph of one network as recorded in a checkpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkState {
    /// Layers as supplied, without the discriminator's input join
    pub layers: Vec<LayerSpec>,
    pub output: OutputSpec,
    pub seed: u64,
}

impl NetworkState {
    fn of(network: &FeedForward) -> Self {
        Self {
            layers: network.user_specs().to_vec(),
            output: network.output_spec(),
            seed: network.seed(),
        }
    }

    fn rebuild(&self) -> Result<FeedForward> {
        FeedForward::new(self.layers.clone(), self.output, self.seed)
    }
}

/// Everything needed to restore an engine's parameters and layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanState {
    pub config: GanConfig,
    pub parameters: Vec<f64>,
    pub generator: NetworkState,
    pub discriminator: NetworkState,
    pub reset: bool,
    pub gen_weights: usize,
    pub disc_weights: usize,
}

impl Gan<FeedForward> {
    /// Snapshot of the current parameters and layer graphs.
    pub fn to_state(&self) -> GanState {
        GanState {
            config: self.config().clone(),
            parameters: self.parameters().to_vec(),
            generator: NetworkState::of(self.generator()),
            discriminator: NetworkState::of(self.discriminator()),
            reset: self.is_reset(),
            gen_weights: self.arena().generator().len,
            disc_weights: self.arena().discriminator().len,
        }
    }

    /// Rebuild an engine from a snapshot.
    ///
    /// The restored engine is in inference mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StateMismatch`] if the recorded weight counts do not
    /// match the rebuilt layer graphs, or if the parameter buffer has the
    /// wrong length.
    pub fn from_state(
        state: GanState,
        init: Box<dyn InitRule>,
        noise: Box<dyn NoiseSource>,
    ) -> Result<Self> {
        let generator = state.generator.rebuild()?;
        let discriminator = state.discriminator.rebuild()?;
        let mut gan = Self::new(generator, discriminator, init, noise, state.config)?;

        let gen_weights = gan.generator().weight_count();
        let disc_weights = gan.discriminator().weight_count();
        if (gen_weights, disc_weights) != (state.gen_weights, state.disc_weights) {
            return Err(Error::StateMismatch(format!(
                "checkpoint records {}+{} weights, layer graphs have {}+{}",
                state.gen_weights, state.disc_weights, gen_weights, disc_weights
            )));
        }

        let len = state.parameters.len();
        let arena = ParameterArena::from_vec(state.parameters, gen_weights, disc_weights)
            .ok_or_else(|| {
                Error::StateMismatch(format!(
                    "parameter buffer has {len} values, expected {}",
                    gen_weights + disc_weights
                ))
            })?;
        gan.restore(arena, state.reset);
        Ok(gan)
    }

    /// Write a JSON checkpoint.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&self.to_state())
            .map_err(|e| Error::Serialization(format!("Failed to serialize checkpoint: {e}")))?;
        fs::write(path, json)?;
        info!(path = %path.display(), parameters = self.parameters().len(), "saved checkpoint");
        Ok(())
    }

    /// Read a JSON checkpoint written by [`Gan::save`].
    pub fn load<P: AsRef<Path>>(
        path: P,
        init: Box<dyn InitRule>,
        noise: Box<dyn NoiseSource>,
    ) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let state: GanState = serde_json::from_str(&json)
            .map_err(|e| Error::Serialization(format!("Failed to parse checkpoint: {e}")))?;
        let gan = Self::from_state(state, init, noise)?;
        info!(path = %path.display(), parameters = gan.parameters().len(), "loaded checkpoint");
        Ok(gan)
    }
}
