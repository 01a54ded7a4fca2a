//! Aggregate fitness statistics.

use crate::individual::Individual;
use crate::selection::CumulativeTable;
use std::fmt;

/// Sum, mean and extremes of a population's fitness.
///
/// `best` and `worst` are indices into the slice the statistics were
/// computed from; on ties the first index in array order wins.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessStats {
    pub sum: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Index of the first individual attaining `max`.
    pub best: usize,
    /// Index of the first individual attaining `min`.
    pub worst: usize,
}

impl FitnessStats {
    /// Computes statistics over `individuals`. `None` if empty.
    pub fn of<G>(individuals: &[Individual<G>]) -> Option<Self> {
        let first = individuals.first()?.fitness();
        let mut stats = Self {
            sum: 0.0,
            mean: 0.0,
            min: first,
            max: first,
            best: 0,
            worst: 0,
        };
        for (i, ind) in individuals.iter().enumerate() {
            let f = ind.fitness();
            stats.sum += f;
            if f > stats.max {
                stats.max = f;
                stats.best = i;
            }
            if f < stats.min {
                stats.min = f;
                stats.worst = i;
            }
        }
        stats.mean = stats.sum / individuals.len() as f64;
        Some(stats)
    }
}

impl fmt::Display for FitnessStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mean={:.4} max={:.4} (#{}) min={:.4} (#{})",
            self.mean, self.max, self.best, self.min, self.worst
        )
    }
}

/// What happened during the most recent generation transition.
///
/// Captured right after normalization, before the population was replaced,
/// so `normalized.best` / `normalized.worst` index the discarded generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationReport {
    /// 1-based number of the generation this transition produced.
    pub generation: usize,

    /// Minimum raw fitness subtracted from every individual.
    pub shift: f64,

    /// Statistics after the shift (so `min` is always 0).
    pub normalized: FitnessStats,

    /// Cumulative table the elite pool was sampled from.
    pub table: CumulativeTable,
}

impl GenerationReport {
    /// Sum of normalized fitness over the elite pool.
    pub fn elite_sum(&self) -> f64 {
        self.table.total()
    }

    /// Whether the elite pool had zero total fitness and was drawn uniformly.
    pub fn uniform_fallback(&self) -> bool {
        self.table.is_degenerate()
    }
}
