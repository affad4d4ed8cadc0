//! Evolutionary search toward a goal bit-matrix.
//!
//! # Overview
//!
//! The search system consists of:
//!
//! - **Fitness** (`fitness`): Hamming distance to the goal and population ranking
//! - **Genome Operations** (`genome`): Random generation, crossover, and mutation
//! - **Search** (`search`): Truncation selection, breeding, and termination
//!
//! # Example
//!
//! ```rust,no_run
//! use bitgrid_evo::compute::{evolution::EvolutionEngine, load_goal};
//! use bitgrid_evo::schema::EvolutionConfig;
//!
//! let goal = load_goal("goal.txt").unwrap();
//! let mut engine = EvolutionEngine::new(EvolutionConfig::default(), goal).unwrap();
//! let result = engine.run_with_callback(|progress| {
//!     println!("Generation {}: best fitness = {}",
//!         progress.generation, progress.best_fitness);
//! });
//!
//! println!("Stopped: {}", result.stats.stop_reason);
//! print!("{}", result.best.matrix);
//! ```
//!
//! # Algorithm
//!
//! Each generation keeps the best `selection_pressure` individuals as the
//! breeding pool, then breeds a full new population. Every child is a uniform
//! crossover of two parents drawn uniformly from the pool, mutated one time
//! in five by flipping `mutation_impact` random cells. No individual survives
//! into the next generation.

mod fitness;
mod genome;
mod search;

pub use fitness::{FitnessEvaluator, fitness};
pub use genome::{MUTATION_DRAW_MAX, MUTATION_DRAW_THRESHOLD, MatrixRng};
pub use search::{Candidate, EngineError, EvolutionEngine, Offspring, breed};
