//! Selection strategies.
//!
//! A [`SelectionStrategy`] turns an evaluated population into a same-size,
//! fitness-biased resample. All strategies here assume **maximization**
//! (higher fitness = better) and sample with replacement.
//!
//! - [`ElitistRoulette`]: discard the lower half, roulette over the rest
//! - [`DropZeroFitness`]: roulette over everyone; zero-fitness individuals
//!   are never drawn while any positive one exists
//!
//! Both build a [`CumulativeTable`] and fall back to uniform draws when every
//! weight is zero.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1 (roulette wheel)
//! - De Jong (1975), elitist strategy

use crate::genome::Genome;
use crate::individual::Individual;
use rand::Rng;

/// Resamples a population.
pub trait SelectionStrategy<G: Genome> {
    /// Returns `population.len()` individuals drawn from `population`.
    ///
    /// Each input must carry a valid fitness. Must not fail when every
    /// fitness is zero.
    fn select<R: Rng>(&self, population: &[Individual<G>], rng: &mut R) -> Vec<Individual<G>>;
}

// ============================================================================
// CumulativeTable
// ============================================================================

/// Cumulative selection probabilities, scaled so the last entry is `100`.
///
/// `entries[k] = entries[k-1] + weight[k] / total * 100`. A draw
/// `r ~ U[0, 100)` selects the first entry strictly greater than `r`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CumulativeTable {
    entries: Vec<f64>,
    total: f64,
}

impl CumulativeTable {
    /// Upper bound of the table and of each draw.
    pub const SCALE: f64 = 100.0;

    /// Builds the table from non-negative weights.
    ///
    /// When the weights sum to zero every entry is `0` and the table is
    /// [degenerate](Self::is_degenerate).
    pub fn from_weights(weights: &[f64]) -> Self {
        let total: f64 = weights.iter().sum();
        let entries = if total > 0.0 {
            let mut acc = 0.0;
            weights
                .iter()
                .map(|w| {
                    acc += w / total * Self::SCALE;
                    acc
                })
                .collect()
        } else {
            vec![0.0; weights.len()]
        };
        Self { entries, total }
    }

    /// The cumulative entries.
    pub fn entries(&self) -> &[f64] {
        &self.entries
    }

    /// Sum of the weights the table was built from.
    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `true` when the weights carried no mass, so draws are uniform.
    pub fn is_degenerate(&self) -> bool {
        self.total.is_nan() || self.total <= 0.0
    }

    /// Linear scan for the first entry strictly greater than `r`.
    pub fn lookup(&self, r: f64) -> Option<usize> {
        self.entries.iter().position(|&c| c > r)
    }

    /// Draws one index. `None` only for an empty table.
    ///
    /// A draw that lands above the last entry because of rounding resolves
    /// to the last index.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        let n = self.entries.len();
        if n == 0 {
            return None;
        }
        if self.is_degenerate() {
            return Some(rng.random_range(0..n));
        }
        let r = rng.random_range(0.0..Self::SCALE);
        Some(self.lookup(r).unwrap_or(n - 1))
    }
}

// ============================================================================
// ElitistRoulette
// ============================================================================

/// Elitist selection followed by roulette resampling.
///
/// 1. Sort ascending by fitness (stable)
/// 2. Discard the lower `floor(n/2)`; the rest is the elite pool
/// 3. Roulette over the elite pool, weights `fitness - min(fitness)`
/// 4. Draw `n` copies with replacement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElitistRoulette;

impl<G: Genome> SelectionStrategy<G> for ElitistRoulette {
    fn select<R: Rng>(&self, population: &[Individual<G>], rng: &mut R) -> Vec<Individual<G>> {
        elitist_resample(population, rng).0
    }
}

/// Runs [`ElitistRoulette`] and also returns the table it sampled from.
pub(crate) fn elitist_resample<G: Clone, R: Rng>(
    population: &[Individual<G>],
    rng: &mut R,
) -> (Vec<Individual<G>>, CumulativeTable) {
    let n = population.len();
    if n == 0 {
        return (Vec::new(), CumulativeTable::from_weights(&[]));
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| population[a].fitness().total_cmp(&population[b].fitness()));

    let floor = population[order[0]].fitness();
    let elite = &order[n / 2..];
    let weights: Vec<f64> = elite
        .iter()
        .map(|&i| (population[i].fitness() - floor).max(0.0))
        .collect();
    let table = CumulativeTable::from_weights(&weights);

    let next = (0..n)
        .filter_map(|_| table.sample(rng))
        .map(|k| population[elite[k]].clone())
        .collect();
    (next, table)
}

// ============================================================================
// DropZeroFitness
// ============================================================================

/// Fitness-proportional resampling over the whole population.
///
/// Individuals with zero (or negative) fitness get no weight, so they only
/// survive when nobody scores above zero, in which case every member is
/// drawn uniformly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropZeroFitness;

impl<G: Genome> SelectionStrategy<G> for DropZeroFitness {
    fn select<R: Rng>(&self, population: &[Individual<G>], rng: &mut R) -> Vec<Individual<G>> {
        let weights: Vec<f64> = population.iter().map(|ind| ind.fitness().max(0.0)).collect();
        let table = CumulativeTable::from_weights(&weights);
        (0..population.len())
            .filter_map(|_| table.sample(rng))
            .map(|k| population[k].clone())
            .collect()
    }
}
