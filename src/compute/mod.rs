//! Compute module - Matrix type, goal loading, and evolutionary search.

mod goal;
mod matrix;

pub mod evolution;

pub use goal::*;
pub use matrix::*;
