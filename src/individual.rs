//! A genome paired with its fitness score.

use crate::error::{GaError, Result};
use crate::genome::Genome;
use crate::operators::MutationStrategy;
use rand::Rng;

/// A candidate solution: one exclusively owned genome plus its fitness.
///
/// Fitness is only meaningful right after an evaluation pass. Any change to
/// the genome through [`mutate`](Self::mutate), [`cross`](Self::cross) or
/// [`genome_mut`](Self::genome_mut) marks it stale until
/// [`set_fitness`](Self::set_fitness) is called again.
///
/// Cloning deep-copies the genome and carries fitness and staleness over
/// verbatim, so a resampled elite keeps its parent's score until the next
/// evaluation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual<G> {
    genome: G,
    fitness: f64,
    stale: bool,
}

impl<G> Individual<G> {
    /// Wraps a genome. Fitness starts at `0.0` and stale.
    pub fn new(genome: G) -> Self {
        Self {
            genome,
            fitness: 0.0,
            stale: true,
        }
    }

    /// Wraps a genome with an already known fitness.
    pub fn with_fitness(genome: G, fitness: f64) -> Self {
        Self {
            genome,
            fitness,
            stale: false,
        }
    }

    /// Borrows the genome.
    pub fn genome(&self) -> &G {
        &self.genome
    }

    /// Mutably borrows the genome. Marks the fitness stale.
    pub fn genome_mut(&mut self) -> &mut G {
        self.stale = true;
        &mut self.genome
    }

    /// Consumes the individual, returning its genome.
    pub fn into_genome(self) -> G {
        self.genome
    }

    /// Last fitness written, stale or not.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Records a freshly evaluated fitness.
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
        self.stale = false;
    }

    /// Whether the genome changed since the last evaluation.
    pub fn is_stale(&self) -> bool {
        self.stale
    }
}

impl<G: Genome> Individual<G> {
    /// Applies `strategy` to the genome in place.
    pub fn mutate<M, R>(&mut self, strategy: &M, rng: &mut R) -> Result<()>
    where
        M: MutationStrategy<G>,
        R: Rng,
    {
        self.stale = true;
        strategy.mutate(&mut self.genome, rng)
    }

    /// Single-point crossover: swaps alleles `[crossing_point, len)` with
    /// `other`, in place on both individuals.
    ///
    /// # Errors
    /// [`GaError::CrossingPointOutOfRange`] if `crossing_point >= len`,
    /// [`GaError::LengthMismatch`] if the genomes differ in length.
    pub fn cross(&mut self, other: &mut Self, crossing_point: usize) -> Result<()> {
        if crossing_point >= self.genome.len() {
            return Err(GaError::CrossingPointOutOfRange {
                point: crossing_point,
                length: self.genome.len(),
            });
        }
        self.genome.swap_tail(&mut other.genome, crossing_point)?;
        self.stale = true;
        other.stale = true;
        Ok(())
    }

    /// Genome length.
    pub fn len(&self) -> usize {
        self.genome.len()
    }

    /// Whether the genome is empty.
    pub fn is_empty(&self) -> bool {
        self.genome.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::{BinaryGenome, BoundedGenome};
    use crate::operators::UniformReplacement;
    use crate::random::create_rng;

    fn bounded(values: &[u32]) -> Individual<BoundedGenome> {
        Individual::new(BoundedGenome::from_alleles(values.to_vec(), 2).unwrap())
    }

    #[test]
    fn test_cross_at_two() {
        let mut a = bounded(&[0, 0, 0, 0]);
        let mut b = bounded(&[1, 1, 1, 1]);
        a.cross(&mut b, 2).unwrap();
        assert_eq!(a.genome().as_slice(), &[0, 0, 1, 1]);
        assert_eq!(b.genome().as_slice(), &[1, 1, 0, 0]);
    }

    #[test]
    fn test_cross_at_zero_swaps_everything() {
        let mut a = Individual::new(BinaryGenome::from_bits(&[false, false, false]));
        let mut b = Individual::new(BinaryGenome::from_bits(&[true, true, true]));
        a.cross(&mut b, 0).unwrap();
        assert_eq!(a.genome().count_ones(), 3);
        assert_eq!(b.genome().count_ones(), 0);
    }

    #[test]
    fn test_cross_out_of_range() {
        let mut a = bounded(&[0, 0, 0, 0]);
        let mut b = bounded(&[1, 1, 1, 1]);
        assert_eq!(
            a.cross(&mut b, 4),
            Err(GaError::CrossingPointOutOfRange {
                point: 4,
                length: 4
            })
        );
        // Nothing moved.
        assert_eq!(a.genome().as_slice(), &[0, 0, 0, 0]);
        assert_eq!(b.genome().as_slice(), &[1, 1, 1, 1]);
    }

    #[test]
    fn test_cross_marks_both_stale() {
        let mut a = Individual::with_fitness(BoundedGenome::zeroed(4, 2).unwrap(), 1.0);
        let mut b = Individual::with_fitness(BoundedGenome::zeroed(4, 2).unwrap(), 2.0);
        assert!(!a.is_stale() && !b.is_stale());
        a.cross(&mut b, 1).unwrap();
        assert!(a.is_stale() && b.is_stale());
    }

    #[test]
    fn test_mutate_marks_stale() {
        let mut rng = create_rng(42);
        let mut ind = Individual::with_fitness(BoundedGenome::zeroed(16, 4).unwrap(), 3.0);
        ind.mutate(&UniformReplacement::new(1.0, 4), &mut rng).unwrap();
        assert!(ind.is_stale());
        assert_eq!(ind.len(), 16);
        assert!(ind.genome().as_slice().iter().all(|&v| v < 4));
    }

    #[test]
    fn test_clone_keeps_fitness_and_deep_copies() {
        let original = Individual::with_fitness(BoundedGenome::zeroed(3, 5).unwrap(), 7.5);
        let mut copy = original.clone();
        assert_eq!(copy.fitness(), 7.5);
        assert!(!copy.is_stale());

        copy.genome_mut().set(0, 4).unwrap();
        assert!(copy.is_stale());
        assert_eq!(original.genome().get(0).unwrap(), 0);
    }
}
