//! Configuration types for evolution run parameters.

use serde::{Deserialize, Serialize};

/// Top-level run configuration.
///
/// Percentages are whole numbers and every derived count uses integer
/// division, so small grids can end up with a goal fitness or mutation
/// impact of zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Individuals per generation.
    pub population_size: usize,
    /// Maximum number of evolve/evaluate cycles.
    pub generation_limit: usize,
    /// Goal fitness threshold as a percentage of the cell count.
    pub goal_fitness_percent: u32,
    /// Bit flips per mutation as a percentage of the cell count.
    pub mutation_impact_percent: u32,
    /// Share of the ranked population allowed to breed, in percent.
    pub selection_pressure_percent: u32,
    /// Random seed for reproducibility.
    pub random_seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            generation_limit: 300,
            goal_fitness_percent: 1,
            mutation_impact_percent: 10,
            selection_pressure_percent: 25,
            random_seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Fitness at or below which a run counts as converged.
    #[inline]
    pub fn goal_fitness(&self, cells: usize) -> usize {
        percent_of(cells, self.goal_fitness_percent)
    }

    /// Number of single-cell flips applied by one mutation.
    #[inline]
    pub fn mutation_impact(&self, cells: usize) -> usize {
        percent_of(cells, self.mutation_impact_percent)
    }

    /// Number of top-ranked individuals that may become parents.
    ///
    /// Never below one, so tiny populations still breed from their best.
    #[inline]
    pub fn selection_pressure(&self) -> usize {
        percent_of(self.population_size, self.selection_pressure_percent).max(1)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        for (name, value) in [
            ("goal_fitness_percent", self.goal_fitness_percent),
            ("mutation_impact_percent", self.mutation_impact_percent),
            ("selection_pressure_percent", self.selection_pressure_percent),
        ] {
            if value > 100 {
                return Err(ConfigError::InvalidPercent { name, value });
            }
        }
        Ok(())
    }
}

fn percent_of(count: usize, percent: u32) -> usize {
    count * percent as usize / 100
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Population size must be non-zero")]
    EmptyPopulation,
    #[error("{name} must be between 0 and 100, got {value}")]
    InvalidPercent { name: &'static str, value: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = EvolutionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.selection_pressure(), 250);
    }

    #[test]
    fn test_thresholds_use_integer_division() {
        let config = EvolutionConfig::default();
        assert_eq!(config.goal_fitness(9), 0);
        assert_eq!(config.mutation_impact(9), 0);
        assert_eq!(config.goal_fitness(2500), 25);
        assert_eq!(config.mutation_impact(2500), 250);
        assert_eq!(config.mutation_impact(99), 9);
    }

    #[test]
    fn test_validation_errors() {
        let config = EvolutionConfig {
            population_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyPopulation)));

        let config = EvolutionConfig {
            mutation_impact_percent: 150,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPercent {
                name: "mutation_impact_percent",
                value: 150
            })
        ));
    }

    #[test]
    fn test_selection_pressure_never_zero() {
        let config = EvolutionConfig {
            population_size: 3,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.selection_pressure(), 1);

        let config = EvolutionConfig {
            population_size: 40,
            selection_pressure_percent: 50,
            ..Default::default()
        };
        assert_eq!(config.selection_pressure(), 20);
    }

    #[test]
    fn test_serialization() {
        let config = EvolutionConfig {
            random_seed: Some(7),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: EvolutionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let parsed: EvolutionConfig =
            serde_json::from_str(r#"{"population_size": 40, "random_seed": 1}"#).unwrap();
        assert_eq!(parsed.population_size, 40);
        assert_eq!(parsed.generation_limit, 300);
        assert_eq!(parsed.random_seed, Some(1));
    }
}
