//! Population and generational evolution engine.
//!
//! A [`Population`] owns a fixed number of [`Individual`](crate::Individual)s
//! and advances them one generation at a time:
//!
//! 1. **Evaluate**: fresh fitness for everyone
//! 2. **Normalize**: subtract the minimum so all fitness is non-negative
//! 3. **Elitist selection**: drop the lower half, roulette-resample the rest
//! 4. **Crossover**: random disjoint pairs, single-point suffix swap
//! 5. **Mutation**: per-allele uniform replacement (pluggable)
//! 6. **Re-evaluate**
//!
//! # Key Types
//!
//! - [`GaConfig`]: population and run parameters
//! - [`Population`]: the engine
//! - [`FitnessStats`]: sum, mean, extremes and their positions
//! - [`GenerationReport`]: scratch state of the latest transition
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod engine;
mod stats;

pub use config::GaConfig;
pub use engine::Population;
pub use stats::{FitnessStats, GenerationReport};
