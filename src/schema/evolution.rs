//! Progress and result types for an evolution run.

use serde::{Deserialize, Serialize};

use crate::compute::BitMatrix;

/// Current phase of the run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum EvolutionPhase {
    /// Goal loaded, population not yet generated.
    #[default]
    Loading,
    /// Initial population generated and scored once.
    Generation0Eval,
    /// Breeding and scoring new generations.
    Evolving,
    /// Best fitness reached the goal threshold.
    Converged,
    /// Generation limit reached without meeting the threshold.
    ExhaustedGenerations,
}

/// Reason evolution stopped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StopReason {
    /// Best fitness is at or below the goal fitness.
    Converged,
    /// Reached the generation limit.
    ExhaustedGenerations,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Converged => write!(f, "converged"),
            Self::ExhaustedGenerations => write!(f, "generation limit reached"),
        }
    }
}

/// Progress update emitted after each evaluated generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionProgress {
    /// Index of the evolved generation, starting at 0 for the first
    /// generation bred from the initial population.
    pub generation: usize,
    /// Generation limit.
    pub total_generations: usize,
    /// Best fitness of this generation.
    pub best_fitness: usize,
    /// Mean fitness of this generation.
    pub avg_fitness: f32,
    /// Worst fitness of this generation.
    pub worst_fitness: usize,
    /// Current phase.
    pub phase: EvolutionPhase,
}

/// Snapshot of the best individual.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CandidateSnapshot {
    /// Unique identifier.
    pub id: u64,
    /// Hamming distance to the goal.
    pub fitness: usize,
    /// Generation this candidate was born in.
    pub generation: usize,
    /// Parent IDs.
    pub parents: Vec<u64>,
    /// The matrix itself.
    pub matrix: BitMatrix,
}

/// Per-generation statistics, index 0 being the initial population.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EvolutionHistory {
    pub best_fitness: Vec<usize>,
    pub avg_fitness: Vec<f32>,
}

/// Statistics from an evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionStats {
    /// Evolve/evaluate cycles executed.
    pub generations: usize,
    /// Total fitness evaluations performed.
    pub total_evaluations: u64,
    /// Best fitness achieved.
    pub best_fitness: usize,
    /// Threshold the run was aiming for.
    pub goal_fitness: usize,
    /// Time taken (in seconds).
    pub elapsed_seconds: f64,
    /// Reason for stopping.
    pub stop_reason: StopReason,
}

/// Final result of an evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionResult {
    /// Best candidate of the final generation.
    pub best: CandidateSnapshot,
    /// Statistics from the run.
    pub stats: EvolutionStats,
    /// Full history for analysis.
    pub history: EvolutionHistory,
}
