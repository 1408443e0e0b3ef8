//! Adversarial training engine
//!
//! A [`Gan`] owns a generator, a discriminator and the single parameter
//! buffer both of them read from. It implements [`crate::optim::Objective`],
//! so any first-order optimizer can train it.

pub mod arena;
mod data;
mod engine;
mod io;
mod noise;
mod penalty;
mod policy;
mod stats;


pub use arena::{ParameterArena, Segment};
pub use data::SampleStore;
pub use engine::Gan;
pub use io::{GanState, NetworkState};
pub use noise::{NoiseSource, StandardNormalNoise};
pub use penalty::{gradient_penalty, interpolate, penalty_value};
pub use policy::GanPolicy;
pub use stats::{GanStats, StepReport};
