//! Signal derivation from indicator output.

pub mod crossover;

pub use crossover::*;
