//! Declarative YAML configuration
//!
//! A [`GanSpec`] describes the engine settings and both networks; it is
//! validated before anything is built.

mod builder;
mod cli;
mod loader;
mod schema;
mod validate;

pub use builder::{build_gan, build_networks};
pub use cli::{parse_args, Cli, Command, FidArgs, GenerateArgs, InspectArgs, ValidateArgs};
pub use loader::{load_spec, parse_spec};
pub use schema::{GanConfig, GanSpec, NetworkSpec};
pub use validate::{validate_gan_config, validate_layers, validate_spec, ValidationError};
