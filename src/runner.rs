//! Generation loop with termination criteria.
//!
//! [`GaRunner`] repeatedly advances a [`Population`] and keeps the best
//! individual ever seen, since elitist resampling alone does not guarantee
//! the current best survives crossover and mutation.

use crate::error::Result;
use crate::fitness::FitnessFunction;
use crate::genome::Genome;
use crate::individual::Individual;
use crate::operators::MutationStrategy;
use crate::population::Population;
use log::info;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<G> {
    /// The best individual found during the entire run.
    pub best: Individual<G>,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run stopped because the best fitness stopped improving.
    pub stagnated: bool,

    /// Whether the best fitness reached [`GaConfig::target_fitness`](crate::GaConfig::target_fitness).
    pub reached_target: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best fitness so far, after initialization and after each generation.
    pub fitness_history: Vec<f64>,
}

/// Drives a population through its generations.
///
/// # Usage
///
/// ```
/// use u_elitist::genome::BinaryGenome;
/// use u_elitist::{GaConfig, GaRunner, Individual, Population};
///
/// let config = GaConfig::default()
///     .with_population_size(30)
///     .with_genome_length(12)
///     .with_max_generations(50)
///     .with_target_fitness(12.0)
///     .with_seed(42);
/// let one_max = |ind: &Individual<BinaryGenome>| ind.genome().count_ones() as f64;
///
/// let mut population: Population<BinaryGenome, _> = Population::new(config, one_max).unwrap();
/// let result = GaRunner::run(&mut population).unwrap();
/// assert!(result.generations <= 50);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs until a termination criterion from the population's config fires.
    pub fn run<G, F, M, R>(population: &mut Population<G, F, M, R>) -> Result<GaResult<G>>
    where
        G: Genome,
        F: FitnessFunction<G>,
        M: MutationStrategy<G>,
        R: Rng,
    {
        Self::run_with_cancel(population, None)
    }

    /// Runs with an optional cancellation token.
    ///
    /// The flag is checked before each generation; once set, the run
    /// returns the best individual found so far.
    pub fn run_with_cancel<G, F, M, R>(
        population: &mut Population<G, F, M, R>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<G>>
    where
        G: Genome,
        F: FitnessFunction<G>,
        M: MutationStrategy<G>,
        R: Rng,
    {
        let config = population.config().clone();
        let reached = |fitness: f64| config.target_fitness.is_some_and(|t| fitness >= t);

        let mut best = population.best().clone();
        let mut fitness_history = Vec::with_capacity(config.max_generations + 1);
        fitness_history.push(best.fitness());

        let mut generations = 0usize;
        let mut stagnation_counter = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;
        let mut reached_target = reached(best.fitness());

        while !reached_target && generations < config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            population.advance_generation()?;
            generations += 1;

            let gen_best = population.best();
            if gen_best.fitness() > best.fitness() {
                best = gen_best.clone();
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
            }
            fitness_history.push(best.fitness());
            reached_target = reached(best.fitness());

            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        info!(
            "run finished after {} generations: best={:.4} stagnated={} reached_target={} cancelled={}",
            generations,
            best.fitness(),
            stagnated,
            reached_target,
            cancelled
        );

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            generations,
            stagnated,
            reached_target,
            cancelled,
            fitness_history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::FitnessError;
    use crate::genome::{BinaryGenome, BoundedGenome};
    use crate::operators::UniformReplacement;
    use crate::population::GaConfig;
    use crate::random::create_rng;
    use crate::GaError;

    fn one_max(ind: &Individual<BinaryGenome>) -> f64 {
        ind.genome().count_ones() as f64
    }

    type OneMax = fn(&Individual<BinaryGenome>) -> f64;

    fn one_max_population(config: GaConfig) -> Population<BinaryGenome, OneMax> {
        Population::new(config, one_max as OneMax).unwrap()
    }

    #[test]
    fn test_onemax_convergence() {
        let config = GaConfig::default()
            .with_population_size(50)
            .with_genome_length(20)
            .with_mutation_rate(0.01)
            .with_crossover_rate(0.8)
            .with_max_generations(100)
            .with_seed(42);
        let mut pop = one_max_population(config);
        let result = GaRunner::run(&mut pop).unwrap();

        assert!(
            result.best_fitness >= 15.0,
            "expected fitness >= 15 for 20-bit OneMax, got {}",
            result.best_fitness
        );
        assert_eq!(result.best_fitness, result.best.fitness());
        assert_eq!(result.best.genome().count_ones() as f64, result.best_fitness);
    }

    #[test]
    fn test_fitness_history() {
        let config = GaConfig::default()
            .with_population_size(20)
            .with_genome_length(10)
            .with_max_generations(30)
            .with_seed(42);
        let mut pop = one_max_population(config);
        let result = GaRunner::run(&mut pop).unwrap();

        assert_eq!(result.generations, 30);
        assert_eq!(result.fitness_history.len(), 31);
        assert_eq!(pop.generation(), 30);
        for window in result.fitness_history.windows(2) {
            assert!(window[1] >= window[0], "best-so-far must not decrease");
        }
    }

    #[test]
    fn test_target_reached_before_first_generation() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_genome_length(8)
            .with_target_fitness(0.0)
            .with_seed(42);
        let mut pop = one_max_population(config);
        let result = GaRunner::run(&mut pop).unwrap();

        assert!(result.reached_target);
        assert_eq!(result.generations, 0);
        assert_eq!(result.fitness_history.len(), 1);
    }

    #[test]
    fn test_target_stops_early() {
        let config = GaConfig::default()
            .with_population_size(40)
            .with_genome_length(8)
            .with_mutation_rate(0.05)
            .with_max_generations(1000)
            .with_target_fitness(8.0)
            .with_seed(7);
        let mut pop = one_max_population(config);
        let result = GaRunner::run(&mut pop).unwrap();

        assert!(result.reached_target, "8-bit OneMax should be solved");
        assert!(result.generations < 1000);
        assert_eq!(result.best_fitness, 8.0);
    }

    #[test]
    fn test_stagnation_termination() {
        // Constant fitness never improves.
        let flat = |_: &Individual<BoundedGenome>| 1.0;
        let config = GaConfig::default()
            .with_population_size(10)
            .with_genome_length(4)
            .with_allele_domain(3)
            .with_max_generations(1000)
            .with_stagnation_limit(5)
            .with_seed(1);
        let mut pop: Population<BoundedGenome, _> = Population::new(config, flat).unwrap();
        let result = GaRunner::run(&mut pop).unwrap();

        assert!(result.stagnated);
        assert_eq!(result.generations, 5);
    }

    #[test]
    fn test_cancellation_before_start() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_genome_length(8)
            .with_seed(42);
        let mut pop = one_max_population(config);
        let cancel = Arc::new(AtomicBool::new(true));
        let result = GaRunner::run_with_cancel(&mut pop, Some(cancel)).unwrap();

        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert_eq!(pop.generation(), 0);
    }

    struct FailsOnAllOnes;

    impl FitnessFunction<BinaryGenome> for FailsOnAllOnes {
        fn evaluate(
            &self,
            ind: &Individual<BinaryGenome>,
        ) -> std::result::Result<f64, FitnessError> {
            let ones = ind.genome().count_ones();
            if ones == ind.len() {
                Err(FitnessError::new("all ones"))
            } else {
                Ok(ones as f64)
            }
        }
    }

    #[test]
    fn test_fitness_error_propagates() {
        let config = GaConfig::default()
            .with_population_size(2)
            .with_genome_length(1)
            .with_max_generations(100);
        let inds = vec![
            Individual::new(BinaryGenome::from_bits(&[false])),
            Individual::new(BinaryGenome::from_bits(&[false])),
        ];
        // Every mutation flips the single bit to a random value; sooner or
        // later an all-ones genome is evaluated.
        let mut pop = Population::from_individuals(
            config,
            inds,
            FailsOnAllOnes,
            UniformReplacement::new(1.0, 2),
            create_rng(42),
        )
        .unwrap();
        let err = GaRunner::run(&mut pop).unwrap_err();
        assert!(matches!(err, GaError::Fitness { .. }));
    }
}
