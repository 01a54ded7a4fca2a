//! GA configuration.
//!
//! [`GaConfig`] holds every parameter of the population and of the run loop.

use crate::error::{GaError, Result};
use crate::operators::clamp_probability;

/// Configuration for the elitist genetic algorithm.
///
/// # Defaults
///
/// ```
/// use u_elitist::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.allele_domain, 2);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_elitist::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(60)
///     .with_genome_length(24)
///     .with_allele_domain(4)
///     .with_mutation_rate(0.02)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals, fixed for the lifetime of a population.
    pub population_size: usize,

    /// Number of alleles in every genome.
    pub genome_length: usize,

    /// Number of legal allele values; mutation draws from `[0, allele_domain)`.
    pub allele_domain: u32,

    /// Per-allele probability of replacement during mutation (0.0–1.0).
    pub mutation_rate: f64,

    /// Probability that a pair of individuals is crossed over (0.0–1.0).
    pub crossover_rate: f64,

    /// Maximum number of generations run by [`GaRunner`](crate::GaRunner).
    pub max_generations: usize,

    /// Generations without a new best fitness before the runner stops.
    ///
    /// Set to 0 to disable stagnation-based termination (the default).
    pub stagnation_limit: usize,

    /// Stop as soon as the best fitness reaches this value.
    pub target_fitness: Option<f64>,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            genome_length: 32,
            allele_domain: 2,
            mutation_rate: 0.01,
            crossover_rate: 0.9,
            max_generations: 500,
            stagnation_limit: 0,
            target_fitness: None,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the genome length.
    pub fn with_genome_length(mut self, n: usize) -> Self {
        self.genome_length = n;
        self
    }

    /// Sets the allele-domain size.
    pub fn with_allele_domain(mut self, k: u32) -> Self {
        self.allele_domain = k;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = clamp_probability(rate);
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = clamp_probability(rate);
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the fitness at which the runner stops.
    pub fn with_target_fitness(mut self, target: f64) -> Self {
        self.target_fitness = Some(target);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns [`GaError::InvalidConfig`] describing the first invalid
    /// parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(invalid("population_size must be at least 2"));
        }
        if self.genome_length == 0 {
            return Err(invalid("genome_length must be at least 1"));
        }
        if self.allele_domain < 2 {
            return Err(invalid("allele_domain must be at least 2"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(invalid("mutation_rate must lie in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(invalid("crossover_rate must lie in [0, 1]"));
        }
        if self.max_generations == 0 {
            return Err(invalid("max_generations must be at least 1"));
        }
        if self.target_fitness.is_some_and(f64::is_nan) {
            return Err(invalid("target_fitness must not be NaN"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> GaError {
    GaError::InvalidConfig(message.into())
}
