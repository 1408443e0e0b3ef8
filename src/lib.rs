//! Contienda: adversarial training engine
//!
//! A generator and a discriminator share one contiguous parameter buffer
//! and are trained against each other by any first-order optimizer through
//! the [`Objective`] contract. Four policies are supported: standard GAN,
//! DCGAN, WGAN (weight clipping) and WGAN-GP (gradient penalty).
//!
//! # Example
//!
//! ```ignore
//! use contienda::config::{build_gan, load_spec};
//!
//! let spec = load_spec("gan.yaml")?;
//! let mut gan = build_gan(&spec)?;
//! let loss = gan.train(samples.view(), &mut my_optimizer, 1.0, 0.0)?;
//! let drawn = gan.generate(64);
//! println!("FID: {}", contienda::frechet_distance(samples.view(), drawn.view()));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod eval;
pub mod gan;
pub mod nn;
pub mod optim;

pub use config::{GanConfig, GanSpec};
pub use error::{Error, Result};
pub use eval::frechet_distance;
pub use gan::{Gan, GanPolicy};
pub use nn::{FeedForward, SubModel};
pub use optim::{Objective, Optimizer};
