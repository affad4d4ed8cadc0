//! Bitgrid Evo - Genetic search for a binary target pattern.
//!
//! This crate evolves a population of 2D bit-matrices toward a goal matrix
//! loaded from a text file, using truncation selection, uniform crossover,
//! and low-probability bit-flip mutation.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Run configuration plus progress and result types
//! - `compute`: The matrix type, goal loading, and the evolutionary search
//! - `report`: Console lines printed by the binary
//!
//! # Example
//!
//! ```rust
//! use bitgrid_evo::{BitMatrix, EvolutionConfig, EvolutionEngine, StopReason};
//!
//! let goal = BitMatrix::from_rows(&[vec![1, 0, 1], vec![0, 1, 0], vec![1, 0, 1]]).unwrap();
//! let config = EvolutionConfig {
//!     population_size: 1,
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//!
//! // A population that already holds the goal stops before breeding
//! let mut engine = EvolutionEngine::new(config, goal.clone())
//!     .unwrap()
//!     .with_initial_population(vec![goal])
//!     .unwrap();
//! let result = engine.run();
//!
//! assert_eq!(result.stats.stop_reason, StopReason::Converged);
//! assert_eq!(result.stats.generations, 0);
//! ```

pub mod compute;
pub mod report;
pub mod schema;

// Re-export commonly used types
pub use compute::evolution::EvolutionEngine;
pub use compute::{BitMatrix, GoalError, load_goal};
pub use schema::{EvolutionConfig, EvolutionResult, StopReason};
