//! Mutation strategies.
//!
//! A [`MutationStrategy`] perturbs a genome in place. It carries its own
//! probability policy, so the engine's per-allele replacement can be swapped
//! for any other scheme.
//!
//! - [`UniformReplacement`]: each allele independently, with probability
//!   `rate`, replaced by a uniform draw from the domain (engine default)
//! - [`SingleAlleleReplacement`]: exactly one random allele replaced

use crate::error::Result;
use crate::genome::Genome;
use rand::Rng;

/// Perturbs a genome in place.
pub trait MutationStrategy<G: Genome> {
    /// Mutates `genome`. Must not change its length.
    fn mutate<R: Rng>(&self, genome: &mut G, rng: &mut R) -> Result<()>;
}

/// Per-allele uniform replacement.
///
/// Each position is visited once; with probability `rate` its value is
/// replaced by a draw from `[0, domain)`. The draw may return the value
/// already present.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UniformReplacement {
    rate: f64,
    domain: u32,
}

impl UniformReplacement {
    /// Creates the strategy. `rate` is clamped to `[0, 1]` (NaN becomes 0).
    pub fn new(rate: f64, domain: u32) -> Self {
        Self {
            rate: clamp_probability(rate),
            domain,
        }
    }

    /// Per-allele replacement probability.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Size of the allele domain draws are taken from.
    pub fn domain(&self) -> u32 {
        self.domain
    }
}

impl<G: Genome> MutationStrategy<G> for UniformReplacement {
    fn mutate<R: Rng>(&self, genome: &mut G, rng: &mut R) -> Result<()> {
        let domain = self.domain.min(genome.domain());
        if domain == 0 {
            return Ok(());
        }
        for i in 0..genome.len() {
            if rng.random_bool(self.rate) {
                genome.set(i, rng.random_range(0..domain))?;
            }
        }
        Ok(())
    }
}

/// Replaces exactly one uniformly chosen allele.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SingleAlleleReplacement {
    domain: u32,
}

impl SingleAlleleReplacement {
    pub fn new(domain: u32) -> Self {
        Self { domain }
    }
}

impl<G: Genome> MutationStrategy<G> for SingleAlleleReplacement {
    fn mutate<R: Rng>(&self, genome: &mut G, rng: &mut R) -> Result<()> {
        let domain = self.domain.min(genome.domain());
        if genome.is_empty() || domain == 0 {
            return Ok(());
        }
        let idx = rng.random_range(0..genome.len());
        genome.set(idx, rng.random_range(0..domain))
    }
}

pub(crate) fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}
