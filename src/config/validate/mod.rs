//! Configuration validation
//!
//! Validates GAN specifications for correctness before an engine is built.

mod error;
mod validator;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod tests;

pub use error::ValidationError;
pub use validator::{validate_gan_config, validate_layers, validate_spec};
