//! Minimal feed-forward networks for use as generator and discriminator
//!
//! Shapes follow the engine convention `[features, samples]`. Networks
//! read their weights from a caller-supplied slice of the shared parameter
//! arena; see [`SubModel`].

mod init;
mod layer;
mod layers;
mod model;
mod network;
mod output;

pub use init::{GaussianInit, GlorotInit, InitRule, InitSpec};
pub use layer::Layer;
pub use layers::{Dropout, Identity, LayerSpec, LeakyRelu, Linear, Sigmoid, Tanh};
pub use model::SubModel;
pub use network::FeedForward;
pub use output::{
    sigmoid, EarthMoverDistance, MeanSquaredError, OutputLayer, OutputSpec, SigmoidCrossEntropy,
};
