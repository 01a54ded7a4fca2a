//! The generational evolution engine.
//!
//! [`Population`] owns one generation of individuals and drives the
//! transition to the next:
//! evaluate → normalize → elitist select → crossover → mutate → evaluate.

use super::config::GaConfig;
use super::stats::{FitnessStats, GenerationReport};
use crate::error::{GaError, Result};
use crate::fitness::FitnessFunction;
use crate::genome::{random_genome, Genome};
use crate::individual::Individual;
use crate::operators::{MutationStrategy, UniformReplacement};
use crate::random::rng_from_seed;
use crate::selection::{elitist_resample, CumulativeTable};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// A fixed-size population evolving under elitist roulette selection.
///
/// Each generation's individuals live in one `Vec`. Selection builds the
/// next generation into a fresh vector and swaps it in only once it is
/// complete, so a partially built generation is never observable.
///
/// # Usage
///
/// ```
/// use u_elitist::genome::BinaryGenome;
/// use u_elitist::{GaConfig, Individual, Population};
///
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_genome_length(16)
///     .with_seed(42);
/// let one_max = |ind: &Individual<BinaryGenome>| ind.genome().count_ones() as f64;
///
/// let mut population: Population<BinaryGenome, _> = Population::new(config, one_max).unwrap();
/// population.advance_generation().unwrap();
/// assert_eq!(population.individuals().len(), 20);
/// ```
pub struct Population<G, F, M = UniformReplacement, R = StdRng> {
    config: GaConfig,
    individuals: Vec<Individual<G>>,
    fitness: F,
    mutation: M,
    rng: R,
    generation: usize,
    last_report: Option<GenerationReport>,
}

impl<G, F> Population<G, F>
where
    G: Genome,
    F: FitnessFunction<G>,
{
    /// Creates a random population with the default per-allele mutation.
    ///
    /// The RNG is seeded from [`GaConfig::seed`]. Every individual is
    /// evaluated once before this returns.
    pub fn new(config: GaConfig, fitness: F) -> Result<Self> {
        config.validate()?;
        let mutation = UniformReplacement::new(config.mutation_rate, config.allele_domain);
        let rng = rng_from_seed(config.seed);
        Self::with_parts(config, fitness, mutation, rng)
    }
}

impl<G, F, M, R> Population<G, F, M, R>
where
    G: Genome,
    F: FitnessFunction<G>,
    M: MutationStrategy<G>,
    R: Rng,
{
    /// Creates a random population with an explicit mutation strategy and
    /// random source.
    pub fn with_parts(config: GaConfig, fitness: F, mutation: M, mut rng: R) -> Result<Self> {
        config.validate()?;
        let individuals = (0..config.population_size)
            .map(|_| {
                random_genome(config.genome_length, config.allele_domain, &mut rng)
                    .map(Individual::new)
            })
            .collect::<Result<Vec<_>>>()?;
        Self::assemble(config, individuals, fitness, mutation, rng)
    }

    /// Creates a population from caller-supplied individuals.
    ///
    /// # Errors
    /// [`GaError::PopulationMismatch`] if the count, a genome length or a
    /// genome domain disagrees with `config`.
    pub fn from_individuals(
        config: GaConfig,
        individuals: Vec<Individual<G>>,
        fitness: F,
        mutation: M,
        rng: R,
    ) -> Result<Self> {
        config.validate()?;
        if individuals.len() != config.population_size {
            return Err(GaError::PopulationMismatch(format!(
                "expected {} individuals, got {}",
                config.population_size,
                individuals.len()
            )));
        }
        for (i, ind) in individuals.iter().enumerate() {
            if ind.len() != config.genome_length {
                return Err(GaError::PopulationMismatch(format!(
                    "individual {i} has genome length {}, expected {}",
                    ind.len(),
                    config.genome_length
                )));
            }
            if ind.genome().domain() != config.allele_domain {
                return Err(GaError::PopulationMismatch(format!(
                    "individual {i} has allele domain {}, expected {}",
                    ind.genome().domain(),
                    config.allele_domain
                )));
            }
        }
        Self::assemble(config, individuals, fitness, mutation, rng)
    }

    fn assemble(
        config: GaConfig,
        individuals: Vec<Individual<G>>,
        fitness: F,
        mutation: M,
        rng: R,
    ) -> Result<Self> {
        let mut population = Self {
            config,
            individuals,
            fitness,
            mutation,
            rng,
            generation: 0,
            last_report: None,
        };
        population.evaluate()?;
        Ok(population)
    }

    /// Runs one full generation transition.
    ///
    /// On return every individual carries a fresh fitness for its current
    /// genome. If the first evaluation or the shift fails the population is
    /// left untouched. If the final evaluation fails the new generation is
    /// in place with stale fitness, but [`generation`](Self::generation) and
    /// [`last_report`](Self::last_report) still describe the previous one.
    pub fn advance_generation(&mut self) -> Result<()> {
        self.evaluate()?;
        let shift = self.normalize()?;
        let normalized = self.stats();
        let table = self.select_elite();
        self.crossover()?;
        self.mutate()?;
        self.evaluate()?;

        self.generation += 1;
        debug!(
            "generation {}: shift={:.4} {} elite_sum={:.4}{}",
            self.generation,
            shift,
            normalized,
            table.total(),
            if table.is_degenerate() {
                " (uniform fallback)"
            } else {
                ""
            }
        );
        self.last_report = Some(GenerationReport {
            generation: self.generation,
            shift,
            normalized,
            table,
        });
        Ok(())
    }

    /// Recomputes every individual's fitness.
    ///
    /// All scores are computed before any is written, so a failing or
    /// non-finite evaluation leaves the population unchanged.
    pub fn evaluate(&mut self) -> Result<()> {
        let scores = self
            .individuals
            .iter()
            .enumerate()
            .map(|(index, ind)| {
                let value = self
                    .fitness
                    .evaluate(ind)
                    .map_err(|source| GaError::Fitness { index, source })?;
                if !value.is_finite() {
                    return Err(GaError::NonFiniteFitness { index, value });
                }
                Ok(value)
            })
            .collect::<Result<Vec<f64>>>()?;

        for (ind, score) in self.individuals.iter_mut().zip(scores) {
            ind.set_fitness(score);
        }
        Ok(())
    }

    /// Shifts every fitness down by the population minimum, so the lowest
    /// becomes `0`. Returns the amount subtracted.
    ///
    /// # Errors
    /// [`GaError::FitnessOverflow`] if a shifted value is no longer finite,
    /// which happens when the fitness spread exceeds `f64::MAX`. Nothing is
    /// written in that case.
    pub fn normalize(&mut self) -> Result<f64> {
        let min = self
            .individuals
            .iter()
            .map(Individual::fitness)
            .fold(f64::INFINITY, f64::min);
        if let Some((index, value)) = self
            .individuals
            .iter()
            .map(Individual::fitness)
            .enumerate()
            .find(|(_, f)| !(f - min).is_finite())
        {
            return Err(GaError::FitnessOverflow {
                index,
                value,
                shift: min,
            });
        }
        for ind in &mut self.individuals {
            ind.set_fitness(ind.fitness() - min);
        }
        Ok(min)
    }

    /// Replaces the population with a roulette resample of its fitter half.
    ///
    /// Individuals are ranked by ascending fitness; the lower `floor(n/2)`
    /// are discarded. `n` draws are taken from the rest with probability
    /// proportional to fitness (uniform if the pool's fitness sums to
    /// zero). Copies keep their parent's fitness. Returns the table used.
    pub fn select_elite(&mut self) -> CumulativeTable {
        let (next, table) = elitist_resample(&self.individuals, &mut self.rng);
        self.individuals = next;
        table
    }

    /// Pairs all individuals at random and crosses each pair with
    /// probability `crossover_rate` at a point drawn from `[1, len - 1]`.
    ///
    /// With an odd population the individual left unpaired is not crossed.
    /// Genomes shorter than two alleles are never crossed.
    pub fn crossover(&mut self) -> Result<()> {
        let length = self.config.genome_length;
        if length < 2 {
            return Ok(());
        }

        let mut order: Vec<usize> = (0..self.individuals.len()).collect();
        order.shuffle(&mut self.rng);

        for pair in order.chunks_exact(2) {
            if !self.rng.random_bool(self.config.crossover_rate) {
                continue;
            }
            let point = self.rng.random_range(1..length);
            let (a, b) = pair_mut(&mut self.individuals, pair[0], pair[1]);
            a.cross(b, point)?;
            trace!("crossed #{} x #{} at {}", pair[0], pair[1], point);
        }
        Ok(())
    }

    /// Applies the mutation strategy to every individual, the unpaired one
    /// of an odd population included.
    pub fn mutate(&mut self) -> Result<()> {
        for ind in self.individuals.iter_mut() {
            ind.mutate(&self.mutation, &mut self.rng)?;
        }
        Ok(())
    }
}

impl<G, F, M, R> Population<G, F, M, R> {
    /// The current generation's individuals.
    pub fn individuals(&self) -> &[Individual<G>] {
        &self.individuals
    }

    /// Consumes the population, returning its individuals.
    pub fn into_individuals(self) -> Vec<Individual<G>> {
        self.individuals
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Number of completed generation transitions.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Report of the most recent transition, `None` before the first.
    pub fn last_report(&self) -> Option<&GenerationReport> {
        self.last_report.as_ref()
    }

    /// Statistics over the current fitness values.
    ///
    /// Outside a transition these are raw fitness values as returned by the
    /// fitness function. The shifted values used for selection are in
    /// [`GenerationReport::normalized`].
    pub fn stats(&self) -> FitnessStats {
        FitnessStats::of(&self.individuals).unwrap_or_default()
    }

    /// The first individual with the highest fitness.
    pub fn best(&self) -> &Individual<G> {
        &self.individuals[self.stats().best]
    }

    /// The first individual with the lowest fitness.
    pub fn worst(&self) -> &Individual<G> {
        &self.individuals[self.stats().worst]
    }
}

impl<G: fmt::Display, F, M, R> fmt::Display for Population<G, F, M, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#\tfitness\tgenome")?;
        for (i, ind) in self.individuals.iter().enumerate() {
            writeln!(f, "{i}\t{:.4}\t{}", ind.fitness(), ind.genome())?;
        }
        write!(f, "{}", self.stats())
    }
}

/// Borrows two distinct elements mutably.
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(i, j);
    if i < j {
        let (lo, hi) = items.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = items.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}
