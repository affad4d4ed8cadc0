//! Console report lines for a run.

use std::fmt::Write;

use crate::compute::evolution::EvolutionEngine;
use crate::schema::{EvolutionProgress, EvolutionResult};

/// Goal shape and resolved run parameters, printed before the first generation.
pub fn banner(engine: &EvolutionEngine) -> String {
    let goal = engine.goal();
    let config = engine.config();
    let seed = config
        .random_seed
        .map_or_else(|| "random".to_string(), |s| s.to_string());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Image dimensions: {} x {}, size: {}",
        goal.rows(),
        goal.cols(),
        goal.len()
    );
    let _ = writeln!(
        out,
        "Population size: {}, Goal fitness: {}, Generation limit: {}, Mutation Impact: {}",
        config.population_size,
        engine.goal_fitness(),
        config.generation_limit,
        engine.mutation_impact()
    );
    let _ = writeln!(
        out,
        "Selection pressure: {}, Seed: {}",
        engine.selection_pressure(),
        seed
    );
    out
}

/// One line per evolved generation.
pub fn generation_line(progress: &EvolutionProgress) -> String {
    format!(
        "Generation: {}, fitness: {}",
        progress.generation, progress.best_fitness
    )
}

/// Best matrix between blank lines, then the stop summary.
pub fn final_report(result: &EvolutionResult) -> String {
    format!(
        "\n{}\nStopped after {} generations ({}), best fitness: {}, time: {:.2}s\n",
        result.best.matrix,
        result.stats.generations,
        result.stats.stop_reason,
        result.stats.best_fitness,
        result.stats.elapsed_seconds
    )
}
