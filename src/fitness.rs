//! Fitness function capability.
//!
//! Any `Fn(&Individual<G>) -> f64` closure is a [`FitnessFunction`].
//! Implement the trait directly when evaluation can fail.
//!
//! ```
//! use u_elitist::fitness::FitnessFunction;
//! use u_elitist::genome::BinaryGenome;
//! use u_elitist::Individual;
//!
//! let one_max = |ind: &Individual<BinaryGenome>| ind.genome().count_ones() as f64;
//! let ind = Individual::new(BinaryGenome::from_bits(&[true, false, true]));
//! assert_eq!(one_max.evaluate(&ind).unwrap(), 2.0);
//! ```

use crate::individual::Individual;
use thiserror::Error;

/// Failure reported by a fallible fitness function.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct FitnessError(pub String);

impl FitnessError {
    /// Creates an error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Scores an individual. Higher is better.
///
/// Implementations should be pure and deterministic for identical genomes;
/// non-determinism is legal but makes runs irreproducible.
pub trait FitnessFunction<G> {
    /// Returns the fitness of `individual`.
    fn evaluate(&self, individual: &Individual<G>) -> Result<f64, FitnessError>;
}

impl<G, F> FitnessFunction<G> for F
where
    F: Fn(&Individual<G>) -> f64,
{
    fn evaluate(&self, individual: &Individual<G>) -> Result<f64, FitnessError> {
        Ok(self(individual))
    }
}
