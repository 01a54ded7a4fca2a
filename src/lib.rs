//! Elitist roulette genetic algorithm.
//!
//! Evolves a fixed-size population of fixed-length allele sequences toward
//! the maximum of a caller-supplied fitness function:
//!
//! - **Genomes** ([`genome`]): bit-packed binary or bounded-integer alleles
//!   behind one [`Genome`](genome::Genome) capability trait.
//! - **Individuals** ([`Individual`]): a genome plus its fitness, with
//!   in-place mutation and single-point crossover.
//! - **Engine** ([`Population`]): evaluate → normalize → elitist roulette
//!   selection → crossover → mutation → re-evaluate.
//! - **Strategies** ([`selection`], [`operators`]): swappable selection and
//!   mutation schemes.
//! - **Runner** ([`GaRunner`]): repeats generations until a generation
//!   limit, a target fitness, stagnation or cancellation.
//!
//! Every random decision flows through an injected RNG, so a seed fixes the
//! whole run.

pub mod error;
pub mod fitness;
pub mod genome;
mod individual;
pub mod operators;
pub mod population;
pub mod random;
mod runner;
pub mod selection;

pub use error::{GaError, Result};
pub use individual::Individual;
pub use population::{FitnessStats, GaConfig, GenerationReport, Population};
pub use runner::{GaResult, GaRunner};
