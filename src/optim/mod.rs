//! Optimizer-facing contract
//!
//! The engine implements [`Objective`]; any first-order [`Optimizer`] can
//! drive it. No concrete update rule ships with this crate.

mod objective;
mod optimizer;

pub use objective::Objective;
pub use optimizer::Optimizer;
