//! Fitness evaluation against the goal matrix.

use rayon::prelude::*;

use super::search::Candidate;
use crate::compute::BitMatrix;

/// Hamming distance between an individual and the goal. Lower is better.
///
/// # Panics
/// If the individual and the goal differ in shape.
#[inline]
pub fn fitness(individual: &BitMatrix, goal: &BitMatrix) -> usize {
    individual.hamming_distance(goal)
}

/// Scores and ranks candidates against a fixed goal.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    goal: BitMatrix,
}

impl FitnessEvaluator {
    /// Create an evaluator for `goal`.
    pub fn new(goal: BitMatrix) -> Self {
        Self { goal }
    }

    /// The goal matrix.
    pub fn goal(&self) -> &BitMatrix {
        &self.goal
    }

    /// Score a single matrix.
    pub fn fitness(&self, individual: &BitMatrix) -> usize {
        fitness(individual, &self.goal)
    }

    /// Score every candidate and return them best-first.
    ///
    /// Scoring runs in parallel; the sort is stable, so candidates with equal
    /// fitness keep their input order.
    pub fn evaluate(&self, mut population: Vec<Candidate>) -> Vec<Candidate> {
        population.par_iter_mut().for_each(|candidate| {
            candidate.fitness = self.fitness(&candidate.matrix);
        });
        population.sort_by_key(|c| c.fitness);
        population
    }
}
