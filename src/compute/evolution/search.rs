//! Generation driver: truncation selection, breeding, and termination.

use std::time::Instant;

use crate::compute::BitMatrix;
use crate::schema::{
    CandidateSnapshot, ConfigError, EvolutionConfig, EvolutionHistory, EvolutionPhase,
    EvolutionProgress, EvolutionResult, EvolutionStats, StopReason,
};

use super::fitness::FitnessEvaluator;
use super::genome::MatrixRng;

/// A candidate individual in the population.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Unique identifier.
    pub id: u64,
    /// The matrix.
    pub matrix: BitMatrix,
    /// Hamming distance to the goal, valid once evaluated.
    pub fitness: usize,
    /// Generation created.
    pub generation: usize,
    /// Parent IDs.
    pub parents: Vec<u64>,
}

impl Candidate {
    /// Create an unevaluated candidate.
    pub fn new(id: u64, matrix: BitMatrix, generation: usize, parents: Vec<u64>) -> Self {
        Self {
            id,
            matrix,
            fitness: 0,
            generation,
            parents,
        }
    }

    /// Convert to snapshot for serialization.
    pub fn to_snapshot(&self) -> CandidateSnapshot {
        CandidateSnapshot {
            id: self.id,
            fitness: self.fitness,
            generation: self.generation,
            parents: self.parents.clone(),
            matrix: self.matrix.clone(),
        }
    }
}

/// A freshly bred child and the ranked indices of its parents.
#[derive(Debug, Clone)]
pub struct Offspring {
    pub matrix: BitMatrix,
    pub parents: [usize; 2],
}

/// Breed `size` children from the `pressure` best of a ranked population.
///
/// Both parents are drawn independently and uniformly from the breeding
/// pool, so a parent may be paired with itself. `pressure` is clamped to the
/// population length.
pub fn breed(
    ranked: &[Candidate],
    size: usize,
    pressure: usize,
    mutation_impact: usize,
    rng: &mut MatrixRng,
) -> Vec<Offspring> {
    let pool = &ranked[..pressure.min(ranked.len())];
    if pool.is_empty() {
        return Vec::new();
    }

    (0..size)
        .map(|_| {
            let idx1 = rng.pick_parent(pool.len());
            let idx2 = rng.pick_parent(pool.len());
            Offspring {
                matrix: rng.make_child(&pool[idx1].matrix, &pool[idx2].matrix, mutation_impact),
                parents: [idx1, idx2],
            }
        })
        .collect()
}

/// Evolution engine that runs the search.
pub struct EvolutionEngine {
    config: EvolutionConfig,
    rng: MatrixRng,
    evaluator: FitnessEvaluator,
    population: Vec<Candidate>,
    history: EvolutionHistory,
    generation: usize,
    phase: EvolutionPhase,
    goal_fitness: usize,
    mutation_impact: usize,
    evaluations: u64,
    next_id: u64,
}

impl EvolutionEngine {
    /// Create a new evolution engine for `goal`.
    pub fn new(config: EvolutionConfig, goal: BitMatrix) -> Result<Self, EngineError> {
        config.validate()?;

        let seed = config.random_seed.unwrap_or_else(rand::random);
        let cells = goal.len();
        let goal_fitness = config.goal_fitness(cells);
        let mutation_impact = config.mutation_impact(cells);
        log::debug!(
            "Engine for {}x{} goal: seed={}, goal_fitness={}, mutation_impact={}, pressure={}",
            goal.rows(),
            goal.cols(),
            seed,
            goal_fitness,
            mutation_impact,
            config.selection_pressure()
        );

        Ok(Self {
            config,
            rng: MatrixRng::new(seed),
            evaluator: FitnessEvaluator::new(goal),
            population: Vec::new(),
            history: EvolutionHistory::default(),
            generation: 0,
            phase: EvolutionPhase::Loading,
            goal_fitness,
            mutation_impact,
            evaluations: 0,
            next_id: 0,
        })
    }

    /// Replace the random initial population with given matrices.
    pub fn with_initial_population(
        mut self,
        matrices: Vec<BitMatrix>,
    ) -> Result<Self, EngineError> {
        if matrices.is_empty() {
            return Err(EngineError::EmptyPopulation);
        }
        let expected = self.evaluator.goal().shape();
        if let Some(m) = matrices.iter().find(|m| m.shape() != expected) {
            return Err(EngineError::ShapeMismatch {
                expected,
                found: m.shape(),
            });
        }

        self.population = matrices
            .into_iter()
            .map(|matrix| {
                let id = self.take_id();
                Candidate::new(id, matrix, 0, Vec::new())
            })
            .collect();
        self.generation = 0;
        self.phase = EvolutionPhase::Loading;
        Ok(self)
    }

    /// Run configuration.
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// The goal matrix.
    pub fn goal(&self) -> &BitMatrix {
        self.evaluator.goal()
    }

    /// Fitness at or below which the run stops.
    pub fn goal_fitness(&self) -> usize {
        self.goal_fitness
    }

    /// Bit flips applied to a mutated child.
    pub fn mutation_impact(&self) -> usize {
        self.mutation_impact
    }

    /// Size of the breeding pool.
    pub fn selection_pressure(&self) -> usize {
        self.config.selection_pressure()
    }

    /// Completed evolve/evaluate cycles.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn phase(&self) -> EvolutionPhase {
        self.phase
    }

    /// Current population, best-first once evaluated.
    pub fn population(&self) -> &[Candidate] {
        &self.population
    }

    /// Best candidate of the current (evaluated) population.
    pub fn best(&self) -> Option<&Candidate> {
        self.population.first()
    }

    /// Initialize the population with random matrices.
    pub fn initialize(&mut self) {
        let (rows, cols) = self.evaluator.goal().shape();
        let matrices = self
            .rng
            .random_population(self.config.population_size, rows, cols);

        self.population = matrices
            .into_iter()
            .map(|matrix| {
                let id = self.take_id();
                Candidate::new(id, matrix, 0, Vec::new())
            })
            .collect();
        self.generation = 0;
        self.phase = EvolutionPhase::Loading;
    }

    /// Score and rank the current population, best-first.
    pub fn evaluate(&mut self) {
        let population = std::mem::take(&mut self.population);
        self.population = self.evaluator.evaluate(population);
        self.evaluations += self.population.len() as u64;

        let best = self.population.first().map_or(0, |c| c.fitness);
        self.history.best_fitness.push(best);
        self.history.avg_fitness.push(self.avg_fitness());

        if self.phase == EvolutionPhase::Loading {
            self.phase = EvolutionPhase::Generation0Eval;
        }
    }

    /// Replace the ranked population with a new generation of children.
    pub fn evolve(&mut self) {
        let offspring = breed(
            &self.population,
            self.config.population_size,
            self.config.selection_pressure(),
            self.mutation_impact,
            &mut self.rng,
        );

        let generation = self.generation + 1;
        let mut next_gen = Vec::with_capacity(offspring.len());
        for child in offspring {
            let parents = child.parents.iter().map(|&i| self.population[i].id).collect();
            let id = self.take_id();
            next_gen.push(Candidate::new(id, child.matrix, generation, parents));
        }

        self.population = next_gen;
        self.phase = EvolutionPhase::Evolving;
    }

    /// Check if evolution should stop.
    ///
    /// Convergence is checked before the generation limit.
    fn should_stop(&self) -> Option<StopReason> {
        if self.best().is_some_and(|c| c.fitness <= self.goal_fitness) {
            return Some(StopReason::Converged);
        }
        if self.generation >= self.config.generation_limit {
            return Some(StopReason::ExhaustedGenerations);
        }
        None
    }

    /// Get current progress.
    pub fn progress(&self) -> EvolutionProgress {
        EvolutionProgress {
            generation: self.generation,
            total_generations: self.config.generation_limit,
            best_fitness: self.population.first().map_or(0, |c| c.fitness),
            avg_fitness: self.avg_fitness(),
            worst_fitness: self.population.last().map_or(0, |c| c.fitness),
            phase: self.phase,
        }
    }

    /// Run evolution with a callback invoked after every evolved generation.
    pub fn run_with_callback<F>(&mut self, mut callback: F) -> EvolutionResult
    where
        F: FnMut(&EvolutionProgress),
    {
        let start_time = Instant::now();

        if self.population.is_empty() {
            self.initialize();
        }
        self.evaluate();
        log::info!(
            "Generation 0: population={}, best fitness={}, goal fitness={}",
            self.population.len(),
            self.progress().best_fitness,
            self.goal_fitness
        );

        let stop_reason = loop {
            if let Some(reason) = self.should_stop() {
                break reason;
            }

            self.evolve();
            self.evaluate();

            let progress = self.progress();
            log::debug!(
                "Generation {}: best={}, avg={:.2}, worst={}",
                progress.generation,
                progress.best_fitness,
                progress.avg_fitness,
                progress.worst_fitness
            );
            callback(&progress);

            self.generation += 1;
        };

        self.phase = match stop_reason {
            StopReason::Converged => EvolutionPhase::Converged,
            StopReason::ExhaustedGenerations => EvolutionPhase::ExhaustedGenerations,
        };

        let best = self
            .best()
            .map(Candidate::to_snapshot)
            .expect("population is never empty after evaluation");
        log::info!(
            "Stopped after {} generations ({}): best fitness={}",
            self.generation,
            stop_reason,
            best.fitness
        );

        EvolutionResult {
            stats: EvolutionStats {
                generations: self.generation,
                total_evaluations: self.evaluations,
                best_fitness: best.fitness,
                goal_fitness: self.goal_fitness,
                elapsed_seconds: start_time.elapsed().as_secs_f64(),
                stop_reason,
            },
            best,
            history: self.history.clone(),
        }
    }

    /// Run evolution (blocking).
    pub fn run(&mut self) -> EvolutionResult {
        self.run_with_callback(|_| {})
    }

    fn avg_fitness(&self) -> f32 {
        if self.population.is_empty() {
            return 0.0;
        }
        let total: usize = self.population.iter().map(|c| c.fitness).sum();
        total as f32 / self.population.len() as f32
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Engine construction errors.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Initial population is empty")]
    EmptyPopulation,
    #[error("Individual is {found:?}, goal is {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard(size: usize) -> BitMatrix {
        let cells = (0..size * size)
            .map(|i| ((i / size + i % size) % 2) as u8)
            .collect();
        BitMatrix::from_cells(size, size, cells).unwrap()
    }

    fn small_config(population_size: usize, generation_limit: usize) -> EvolutionConfig {
        EvolutionConfig {
            population_size,
            generation_limit,
            random_seed: Some(42),
            ..Default::default()
        }
    }

    #[test]
    fn test_evolution_engine_creation() {
        let mut engine = EvolutionEngine::new(small_config(10, 5), checkerboard(4)).unwrap();
        engine.initialize();

        assert_eq!(engine.population().len(), 10);
        assert!(engine.population().iter().all(|c| c.matrix.shape() == (4, 4)));
        assert_eq!(engine.phase(), EvolutionPhase::Loading);
        assert_eq!(engine.selection_pressure(), 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = EvolutionEngine::new(small_config(0, 5), checkerboard(2));
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn test_initial_population_shape_checked() {
        let engine = EvolutionEngine::new(small_config(2, 5), checkerboard(3)).unwrap();
        let result = engine.with_initial_population(vec![BitMatrix::zeros(2, 2)]);
        assert!(matches!(
            result,
            Err(EngineError::ShapeMismatch {
                expected: (3, 3),
                found: (2, 2)
            })
        ));

        let engine = EvolutionEngine::new(small_config(2, 5), checkerboard(3)).unwrap();
        assert!(matches!(
            engine.with_initial_population(Vec::new()),
            Err(EngineError::EmptyPopulation)
        ));
    }

    #[test]
    fn test_seeded_goal_converges_at_generation_zero() {
        let goal = checkerboard(3);
        let mut engine = EvolutionEngine::new(small_config(1, 300), goal.clone())
            .unwrap()
            .with_initial_population(vec![goal.clone()])
            .unwrap();

        let mut callbacks = 0;
        let result = engine.run_with_callback(|_| callbacks += 1);

        assert_eq!(callbacks, 0);
        assert_eq!(result.stats.generations, 0);
        assert_eq!(result.stats.stop_reason, StopReason::Converged);
        assert_eq!(result.best.fitness, 0);
        assert_eq!(result.best.matrix, goal);
        assert_eq!(engine.phase(), EvolutionPhase::Converged);
    }

    #[test]
    fn test_generation_limit_bounds_cycles() {
        // Without mutation, all-zero parents only breed all-zero children
        let goal = BitMatrix::from_cells(2, 2, vec![1; 4]).unwrap();
        let config = EvolutionConfig {
            goal_fitness_percent: 0,
            mutation_impact_percent: 0,
            ..small_config(4, 7)
        };
        let mut engine = EvolutionEngine::new(config, goal)
            .unwrap()
            .with_initial_population(vec![BitMatrix::zeros(2, 2); 4])
            .unwrap();

        let mut seen = Vec::new();
        let result = engine.run_with_callback(|p| seen.push(p.generation));

        assert_eq!(result.stats.stop_reason, StopReason::ExhaustedGenerations);
        assert_eq!(result.stats.generations, 7);
        assert_eq!(seen, (0..7).collect::<Vec<_>>());
        assert_eq!(result.best.fitness, 4);
        assert_eq!(result.history.best_fitness.len(), 8);
        assert_eq!(engine.phase(), EvolutionPhase::ExhaustedGenerations);
    }

    #[test]
    fn test_total_evaluations_counts_seeded_population() {
        let goal = BitMatrix::from_cells(2, 2, vec![1; 4]).unwrap();
        let config = EvolutionConfig {
            goal_fitness_percent: 0,
            mutation_impact_percent: 0,
            ..small_config(10, 3)
        };
        // Five seeded individuals, then three generations of ten children
        let mut engine = EvolutionEngine::new(config, goal)
            .unwrap()
            .with_initial_population(vec![BitMatrix::zeros(2, 2); 5])
            .unwrap();

        let result = engine.run();
        assert_eq!(result.stats.generations, 3);
        assert_eq!(result.stats.total_evaluations, 35);
    }

    #[test]
    fn test_zero_generation_limit() {
        let goal = BitMatrix::from_cells(1, 2, vec![1, 1]).unwrap();
        let config = EvolutionConfig {
            goal_fitness_percent: 0,
            ..small_config(1, 0)
        };
        let mut engine = EvolutionEngine::new(config, goal)
            .unwrap()
            .with_initial_population(vec![BitMatrix::zeros(1, 2)])
            .unwrap();

        let result = engine.run();
        assert_eq!(result.stats.generations, 0);
        assert_eq!(result.stats.stop_reason, StopReason::ExhaustedGenerations);
    }

    #[test]
    fn test_evolution_converges() {
        let goal = checkerboard(5);
        let mut engine = EvolutionEngine::new(small_config(200, 300), goal.clone()).unwrap();
        let result = engine.run();

        assert_eq!(result.stats.stop_reason, StopReason::Converged);
        assert!(result.stats.generations <= 300);
        assert_eq!(result.best.matrix, goal);
    }

    #[test]
    fn test_same_seed_same_result() {
        let run = || {
            let mut engine = EvolutionEngine::new(small_config(30, 10), checkerboard(6)).unwrap();
            engine.run()
        };
        let a = run();
        let b = run();
        assert_eq!(a.best, b.best);
        assert_eq!(a.history, b.history);
        assert_eq!(a.stats.generations, b.stats.generations);
    }

    #[test]
    fn test_evolve_replaces_population() {
        let mut engine = EvolutionEngine::new(small_config(12, 5), checkerboard(4)).unwrap();
        engine.initialize();
        engine.evaluate();
        let old_ids: Vec<u64> = engine.population().iter().map(|c| c.id).collect();
        let pool_ids: Vec<u64> = old_ids[..engine.selection_pressure()].to_vec();

        engine.evolve();

        assert_eq!(engine.population().len(), 12);
        for child in engine.population() {
            assert!(!old_ids.contains(&child.id));
            assert_eq!(child.generation, 1);
            assert_eq!(child.parents.len(), 2);
            assert!(child.parents.iter().all(|p| pool_ids.contains(p)));
        }
    }

    #[test]
    fn test_breed_truncation_selection() {
        let mut rng = MatrixRng::new(3);
        let best = Candidate::new(0, checkerboard(3), 0, Vec::new());
        let worst = Candidate::new(1, BitMatrix::zeros(3, 3), 0, Vec::new());
        let ranked = vec![best.clone(), worst];

        // Pool of one: every child is the best crossed with itself
        let children = breed(&ranked, 20, 1, 0, &mut rng);
        assert_eq!(children.len(), 20);
        for child in &children {
            assert_eq!(child.parents, [0, 0]);
            assert_eq!(child.matrix, best.matrix);
        }
    }

    #[test]
    fn test_breed_clamps_pressure() {
        let mut rng = MatrixRng::new(3);
        let ranked = vec![Candidate::new(0, checkerboard(2), 0, Vec::new())];
        let children = breed(&ranked, 5, 10, 1, &mut rng);
        assert_eq!(children.len(), 5);
        assert!(children.iter().all(|c| c.parents == [0, 0]));

        assert!(breed(&[], 5, 10, 1, &mut rng).is_empty());
    }
}
