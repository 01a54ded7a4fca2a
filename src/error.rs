//! Error types shared by every module of the crate.

use crate::fitness::FitnessError;
use thiserror::Error;

/// Errors produced by genomes, individuals and the evolution engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GaError {
    /// An allele position outside `[0, length)` was accessed.
    #[error("allele index {index} out of range for genome of length {length}")]
    IndexOutOfRange { index: usize, length: usize },

    /// A crossing point outside `[0, length)` was requested.
    #[error("crossing point {point} out of range for genome of length {length}")]
    CrossingPointOutOfRange { point: usize, length: usize },

    /// Two genomes that must have equal length do not.
    #[error("genome lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// An allele value outside `[0, domain)` was written.
    #[error("allele value {value} outside domain [0, {domain})")]
    AlleleOutOfDomain { value: u32, domain: u32 },

    /// The genome representation cannot hold the requested allele domain.
    #[error("genome representation supports an allele domain of {supported}, got {requested}")]
    UnsupportedDomain { requested: u32, supported: u32 },

    /// A [`GaConfig`](crate::population::GaConfig) parameter is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Caller-supplied individuals disagree with the configuration.
    #[error("population mismatch: {0}")]
    PopulationMismatch(String),

    /// The fitness function failed for one individual.
    #[error("fitness evaluation failed for individual {index}: {source}")]
    Fitness {
        index: usize,
        #[source]
        source: FitnessError,
    },

    /// The fitness function returned NaN or an infinity.
    #[error("fitness function returned non-finite value {value} for individual {index}")]
    NonFiniteFitness { index: usize, value: f64 },

    /// Subtracting the population minimum overflowed to an infinity.
    #[error("fitness {value} of individual {index} overflows when shifted by {shift}")]
    FitnessOverflow { index: usize, value: f64, shift: f64 },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GaError>;
