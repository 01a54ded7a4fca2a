//! Fixed-length allele containers.
//!
//! A genome is an ordered sequence of alleles, each a `u32` drawn from the
//! domain `[0, domain)`. The [`Genome`] trait is the capability set the
//! engine relies on; the concrete representation is chosen by the caller.
//!
//! - [`BinaryGenome`]: bit-packed, domain is always 2
//! - [`BoundedGenome`]: one `u32` per allele, any domain `k >= 1`

use crate::error::{GaError, Result};
use rand::Rng;
use std::fmt;

/// Capability set shared by every genome representation.
///
/// The length is fixed at construction. Out-of-range positions are caller
/// errors and are reported, never clamped.
pub trait Genome: Clone + PartialEq + fmt::Debug {
    /// Creates a genome of `length` alleles, all set to `0`.
    ///
    /// Fails with [`GaError::UnsupportedDomain`] when the representation
    /// cannot hold `domain` distinct values.
    fn zeroed(length: usize, domain: u32) -> Result<Self>;

    /// Number of alleles.
    fn len(&self) -> usize;

    /// Returns `true` if the genome holds no alleles.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of legal distinct allele values.
    fn domain(&self) -> u32;

    /// Reads the allele at `index`.
    fn get(&self, index: usize) -> Result<u32>;

    /// Writes the allele at `index`.
    fn set(&mut self, index: usize, value: u32) -> Result<()>;

    /// Swaps every allele in `[from, len)` with `other`.
    ///
    /// Both genomes must have the same length and domain, and
    /// `from < len`.
    fn swap_tail(&mut self, other: &mut Self, from: usize) -> Result<()> {
        check_tail(self, other, from)?;
        for i in from..self.len() {
            let mine = self.get(i)?;
            let theirs = other.get(i)?;
            self.set(i, theirs)?;
            other.set(i, mine)?;
        }
        Ok(())
    }

    /// Copies the alleles out into a vector.
    fn to_vec(&self) -> Vec<u32> {
        (0..self.len()).filter_map(|i| self.get(i).ok()).collect()
    }
}

/// Creates a genome whose alleles are drawn uniformly from `[0, domain)`.
pub fn random_genome<G: Genome, R: Rng>(length: usize, domain: u32, rng: &mut R) -> Result<G> {
    let mut genome = G::zeroed(length, domain)?;
    for i in 0..length {
        genome.set(i, rng.random_range(0..domain))?;
    }
    Ok(genome)
}

fn check_index(index: usize, length: usize) -> Result<()> {
    if index >= length {
        return Err(GaError::IndexOutOfRange { index, length });
    }
    Ok(())
}

fn check_tail<G: Genome>(left: &G, right: &G, from: usize) -> Result<()> {
    if left.len() != right.len() {
        return Err(GaError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    if left.domain() != right.domain() {
        return Err(GaError::UnsupportedDomain {
            requested: right.domain(),
            supported: left.domain(),
        });
    }
    if from >= left.len() {
        return Err(GaError::CrossingPointOutOfRange {
            point: from,
            length: left.len(),
        });
    }
    Ok(())
}

// ============================================================================
// BinaryGenome
// ============================================================================

const WORD_BITS: usize = u64::BITS as usize;

/// A bit string packed into 64-bit words.
///
/// Bits past `len` in the last word are always zero, so the derived
/// equality is element-wise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinaryGenome {
    words: Vec<u64>,
    len: usize,
}

impl BinaryGenome {
    /// Builds a genome from explicit bits.
    pub fn from_bits(bits: &[bool]) -> Self {
        let mut words = vec![0u64; bits.len().div_ceil(WORD_BITS)];
        for (i, &bit) in bits.iter().enumerate() {
            if bit {
                words[i / WORD_BITS] |= 1 << (i % WORD_BITS);
            }
        }
        Self {
            words,
            len: bits.len(),
        }
    }

    /// Number of alleles set to `1`.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}

impl Genome for BinaryGenome {
    fn zeroed(length: usize, domain: u32) -> Result<Self> {
        if domain != 2 {
            return Err(GaError::UnsupportedDomain {
                requested: domain,
                supported: 2,
            });
        }
        Ok(Self {
            words: vec![0; length.div_ceil(WORD_BITS)],
            len: length,
        })
    }

    fn len(&self) -> usize {
        self.len
    }

    fn domain(&self) -> u32 {
        2
    }

    fn get(&self, index: usize) -> Result<u32> {
        check_index(index, self.len)?;
        Ok(((self.words[index / WORD_BITS] >> (index % WORD_BITS)) & 1) as u32)
    }

    fn set(&mut self, index: usize, value: u32) -> Result<()> {
        check_index(index, self.len)?;
        let mask = 1u64 << (index % WORD_BITS);
        let word = &mut self.words[index / WORD_BITS];
        match value {
            0 => *word &= !mask,
            1 => *word |= mask,
            _ => return Err(GaError::AlleleOutOfDomain { value, domain: 2 }),
        }
        Ok(())
    }

    fn swap_tail(&mut self, other: &mut Self, from: usize) -> Result<()> {
        check_tail(self, other, from)?;
        let first = from / WORD_BITS;
        let keep = (1u64 << (from % WORD_BITS)) - 1;

        let diff = (self.words[first] ^ other.words[first]) & !keep;
        self.words[first] ^= diff;
        other.words[first] ^= diff;

        self.words[first + 1..].swap_with_slice(&mut other.words[first + 1..]);
        Ok(())
    }
}

impl fmt::Display for BinaryGenome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.len {
            let bit = (self.words[i / WORD_BITS] >> (i % WORD_BITS)) & 1;
            write!(f, "{bit}")?;
        }
        Ok(())
    }
}

// ============================================================================
// BoundedGenome
// ============================================================================

/// A sequence of integers, each in `[0, domain)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundedGenome {
    alleles: Vec<u32>,
    domain: u32,
}

impl BoundedGenome {
    /// Builds a genome from explicit values.
    ///
    /// Fails if any value lies outside `[0, domain)`.
    pub fn from_alleles(alleles: Vec<u32>, domain: u32) -> Result<Self> {
        if domain == 0 {
            return Err(GaError::UnsupportedDomain {
                requested: 0,
                supported: u32::MAX,
            });
        }
        if let Some(&value) = alleles.iter().find(|&&v| v >= domain) {
            return Err(GaError::AlleleOutOfDomain { value, domain });
        }
        Ok(Self { alleles, domain })
    }

    /// Borrows the alleles.
    pub fn as_slice(&self) -> &[u32] {
        &self.alleles
    }
}

impl Genome for BoundedGenome {
    fn zeroed(length: usize, domain: u32) -> Result<Self> {
        Self::from_alleles(vec![0; length], domain)
    }

    fn len(&self) -> usize {
        self.alleles.len()
    }

    fn domain(&self) -> u32 {
        self.domain
    }

    fn get(&self, index: usize) -> Result<u32> {
        check_index(index, self.alleles.len())?;
        Ok(self.alleles[index])
    }

    fn set(&mut self, index: usize, value: u32) -> Result<()> {
        check_index(index, self.alleles.len())?;
        if value >= self.domain {
            return Err(GaError::AlleleOutOfDomain {
                value,
                domain: self.domain,
            });
        }
        self.alleles[index] = value;
        Ok(())
    }

    fn swap_tail(&mut self, other: &mut Self, from: usize) -> Result<()> {
        check_tail(self, other, from)?;
        self.alleles[from..].swap_with_slice(&mut other.alleles[from..]);
        Ok(())
    }

    fn to_vec(&self) -> Vec<u32> {
        self.alleles.clone()
    }
}

impl fmt::Display for BoundedGenome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.alleles.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_binary_get_set() {
        let mut g = BinaryGenome::zeroed(70, 2).unwrap();
        g.set(0, 1).unwrap();
        g.set(65, 1).unwrap();
        assert_eq!(g.get(0).unwrap(), 1);
        assert_eq!(g.get(1).unwrap(), 0);
        assert_eq!(g.get(65).unwrap(), 1);
        assert_eq!(g.count_ones(), 2);

        g.set(65, 0).unwrap();
        assert_eq!(g.get(65).unwrap(), 0);
    }

    #[test]
    fn test_binary_rejects_bad_domain_and_value() {
        assert_eq!(
            BinaryGenome::zeroed(4, 3),
            Err(GaError::UnsupportedDomain {
                requested: 3,
                supported: 2
            })
        );
        let mut g = BinaryGenome::zeroed(4, 2).unwrap();
        assert_eq!(
            g.set(0, 2),
            Err(GaError::AlleleOutOfDomain {
                value: 2,
                domain: 2
            })
        );
    }

    #[test]
    fn test_index_out_of_range() {
        let mut b = BinaryGenome::zeroed(4, 2).unwrap();
        assert_eq!(
            b.get(4),
            Err(GaError::IndexOutOfRange {
                index: 4,
                length: 4
            })
        );
        assert!(b.set(10, 1).is_err());

        let mut n = BoundedGenome::zeroed(3, 5).unwrap();
        assert!(n.get(3).is_err());
        assert!(n.set(3, 1).is_err());
    }

    #[test]
    fn test_bounded_domain_enforced() {
        let mut g = BoundedGenome::zeroed(3, 4).unwrap();
        g.set(2, 3).unwrap();
        assert_eq!(g.to_vec(), vec![0, 0, 3]);
        assert!(g.set(1, 4).is_err());
        assert!(BoundedGenome::from_alleles(vec![1, 9], 4).is_err());
        assert!(BoundedGenome::zeroed(3, 0).is_err());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = BoundedGenome::from_alleles(vec![1, 2, 3], 4).unwrap();
        let mut copy = original.clone();
        assert_eq!(copy, original);
        copy.set(0, 0).unwrap();
        assert_ne!(copy, original);
        assert_eq!(original.get(0).unwrap(), 1);
    }

    #[test]
    fn test_binary_swap_tail_across_words() {
        let mut a = BinaryGenome::from_bits(&[false; 130]);
        let mut b = BinaryGenome::from_bits(&[true; 130]);
        a.swap_tail(&mut b, 70).unwrap();

        for i in 0..130 {
            let expected_a = u32::from(i >= 70);
            assert_eq!(a.get(i).unwrap(), expected_a, "a[{i}]");
            assert_eq!(b.get(i).unwrap(), 1 - expected_a, "b[{i}]");
        }
        assert_eq!(a.count_ones(), 60);
        assert_eq!(b.count_ones(), 70);
    }

    #[test]
    fn test_binary_swap_tail_matches_default() {
        let mut rng = create_rng(7);
        let a: BinaryGenome = random_genome(100, 2, &mut rng).unwrap();
        let b: BinaryGenome = random_genome(100, 2, &mut rng).unwrap();

        for from in [0, 1, 63, 64, 65, 99] {
            let (mut fa, mut fb) = (a.clone(), b.clone());
            fa.swap_tail(&mut fb, from).unwrap();

            let mut expected_a = a.to_vec();
            let mut expected_b = b.to_vec();
            expected_a[from..].swap_with_slice(&mut expected_b[from..]);
            assert_eq!(fa.to_vec(), expected_a, "from={from}");
            assert_eq!(fb.to_vec(), expected_b, "from={from}");
        }
    }

    #[test]
    fn test_swap_tail_errors() {
        let mut a = BoundedGenome::zeroed(4, 3).unwrap();
        let mut b = BoundedGenome::zeroed(5, 3).unwrap();
        assert_eq!(
            a.swap_tail(&mut b, 1),
            Err(GaError::LengthMismatch { left: 4, right: 5 })
        );

        let mut c = BoundedGenome::zeroed(4, 3).unwrap();
        assert_eq!(
            a.swap_tail(&mut c, 4),
            Err(GaError::CrossingPointOutOfRange {
                point: 4,
                length: 4
            })
        );

        let mut d = BoundedGenome::zeroed(4, 9).unwrap();
        assert!(a.swap_tail(&mut d, 1).is_err());
    }

    #[test]
    fn test_random_genome_in_domain() {
        let mut rng = create_rng(42);
        let g: BoundedGenome = random_genome(500, 6, &mut rng).unwrap();
        assert_eq!(g.len(), 500);
        assert!(g.as_slice().iter().all(|&v| v < 6));
    }

    #[test]
    fn test_display() {
        let b = BinaryGenome::from_bits(&[true, false, true, true]);
        assert_eq!(b.to_string(), "1011");
        let n = BoundedGenome::from_alleles(vec![3, 1, 4], 5).unwrap();
        assert_eq!(n.to_string(), "3 1 4");
    }
}
