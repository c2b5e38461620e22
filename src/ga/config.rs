//! GA configuration.
//!
//! [`GaConfig`] holds every parameter of a population and of the driver loop
//! that evolves it.

use super::chromosome::FitnessParams;
use super::selection::Selection;
use crate::error::{Result, TspError};

/// Configuration for the TSP genetic algorithm.
///
/// # Defaults
///
/// ```
/// use u_tspga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 500);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tspga::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_selection(Selection::Tournament(5))
///     .with_mutation_rate(0.2)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of chromosomes in the population. Constant across generations.
    pub population_size: usize,

    /// Maximum number of generations the driver runs.
    pub max_generations: usize,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Fraction of the fittest chromosomes copied unchanged into the next
    /// generation (0.0–1.0, exclusive of 1.0).
    ///
    /// 0.0 replaces the whole population every generation.
    pub elite_ratio: f64,

    /// Probability of applying one swap mutation to each child (0.0–1.0).
    pub mutation_rate: f64,

    /// Fitness transform constants.
    pub fitness: FitnessParams,

    /// Number of generations without a shorter tour before the driver stops.
    ///
    /// Set to 0 to disable stagnation-based termination.
    pub stagnation_limit: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// Checked at the start of each generation, so the run may exceed it by
    /// one generation's worth of work.
    pub time_limit_ms: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            selection: Selection::default(),
            elite_ratio: 0.0,
            mutation_rate: 0.1,
            fitness: FitnessParams::default(),
            stagnation_limit: 0,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Convenience builder for tournament selection with `k` candidates.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Sets the elite ratio.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the fitness transform constants.
    pub fn with_fitness(mut self, fitness: FitnessParams) -> Self {
        self.fitness = fitness;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Preset for quick runs on small instances.
    ///
    /// - Population: 50, Generations: 200, Time limit: 10s, Stagnation: 50
    pub fn fast() -> Self {
        Self {
            population_size: 50,
            max_generations: 200,
            stagnation_limit: 50,
            time_limit_ms: Some(10_000),
            ..Self::default()
        }
    }

    /// Preset balancing tour quality against run time.
    ///
    /// - Population: 100, Generations: 1000, Time limit: 30s, Stagnation: 150
    pub fn balanced() -> Self {
        Self {
            population_size: 100,
            max_generations: 1_000,
            stagnation_limit: 150,
            elite_ratio: 0.02,
            time_limit_ms: Some(30_000),
            ..Self::default()
        }
    }

    /// Preset for large instances.
    ///
    /// - Population: 200, Generations: 5000, Time limit: 60s, Stagnation: 500
    pub fn quality() -> Self {
        Self {
            population_size: 200,
            max_generations: 5_000,
            stagnation_limit: 500,
            elite_ratio: 0.02,
            selection: Selection::Tournament(4),
            time_limit_ms: Some(60_000),
            ..Self::default()
        }
    }

    /// Picks a preset from the number of cities.
    ///
    /// - `city_count < 50` → [`fast()`](Self::fast)
    /// - `50 ≤ city_count < 200` → [`balanced()`](Self::balanced)
    /// - `city_count ≥ 200` → [`quality()`](Self::quality)
    pub fn auto_select(city_count: usize) -> Self {
        if city_count < 50 {
            Self::fast()
        } else if city_count < 200 {
            Self::balanced()
        } else {
            Self::quality()
        }
    }

    /// Number of elites carried over each generation.
    pub fn elite_count(&self) -> usize {
        (self.population_size as f64 * self.elite_ratio) as usize
    }

    /// Validates the configuration.
    ///
    /// Returns [`TspError::InvalidConfig`] describing the first invalid
    /// parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(TspError::invalid_config(
                "population_size must be at least 2",
            ));
        }
        if self.max_generations == 0 {
            return Err(TspError::invalid_config(
                "max_generations must be at least 1",
            ));
        }
        if let Selection::Tournament(k) = self.selection {
            if k < 2 {
                return Err(TspError::invalid_config(format!(
                    "tournament size must be at least 2, got {k}"
                )));
            }
        }
        if !(0.0..1.0).contains(&self.elite_ratio) {
            return Err(TspError::invalid_config(
                "elite_ratio must be in [0, 1)",
            ));
        }
        if self.elite_count() >= self.population_size {
            return Err(TspError::invalid_config(
                "elite_ratio too high: elites fill entire population",
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TspError::invalid_config(
                "mutation_rate must be in [0, 1]",
            ));
        }
        self.fitness.validate()?;
        if self.time_limit_ms == Some(0) {
            return Err(TspError::invalid_config(
                "time_limit_ms must be positive or None",
            ));
        }
        Ok(())
    }
}
