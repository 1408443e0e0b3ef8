//! Sample quality evaluation
//!
//! - `frechet`: Fréchet distance between two sample sets
//! - `samples`: CSV sample file IO used by the CLI

mod frechet;
mod samples;

pub use frechet::frechet_distance;
pub use samples::{load_samples, read_samples, write_samples};
