//! Genome representation for the expression search
//!
//! A chromosome is a fixed-length run of bits. The bits are read in
//! fixed-width slices (genes), and each gene is decoded into an arithmetic
//! token by the codec.
//!
//! # Why bits instead of tokens?
//!
//! - **Crossover**: swapping suffixes is plain slice copying
//! - **Mutation**: flipping one cell is an in-place index write
//! - **No invalid states**: genes that do not fit the expected token class
//!   are skipped during decoding, so every bit string decodes to something
//!
//! Length never changes after construction; crossover and mutation work in
//! place on equal-length strings.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitString(Vec<bool>);

impl BitString {
    pub fn random<R: Rng>(length: usize, rng: &mut R) -> Self {
        Self((0..length).map(|_| rng.gen_bool(0.5)).collect())
    }

    /// Build from a `0`/`1` string. Any other character yields `None`.
    pub fn parse(text: &str) -> Option<Self> {
        text.chars()
            .map(|c| match c {
                '0' => Some(false),
                '1' => Some(true),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }

    /// Concatenate big-endian encodings of `values`, `width` bits each.
    pub fn from_genes(values: &[u32], width: usize) -> Self {
        let mut bits = Vec::with_capacity(values.len() * width);
        for &value in values {
            for shift in (0..width).rev() {
                bits.push((value >> shift) & 1 == 1);
            }
        }
        Self(bits)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn flip(&mut self, index: usize) {
        if let Some(bit) = self.0.get_mut(index) {
            *bit = !*bit;
        }
    }

    /// Exchange everything from `cut` onwards with `other`.
    pub fn swap_suffix(&mut self, other: &mut BitString, cut: usize) {
        let end = self.len().min(other.len());
        if cut >= end {
            return;
        }
        self.0[cut..end].swap_with_slice(&mut other.0[cut..end]);
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// A candidate solution and the fitness assigned to it this generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chromosome {
    pub bits: BitString,
    pub fitness: f64,
}

impl Chromosome {
    pub fn new(bits: BitString) -> Self {
        Self { bits, fitness: 0.0 }
    }
}

pub type Population = Vec<Chromosome>;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_from_genes_is_big_endian() {
        let bits = BitString::from_genes(&[10, 5], 4);
        assert_eq!(bits.to_string(), "10100101");
    }

    #[test]
    fn test_parse_rejects_other_characters() {
        assert!(BitString::parse("0101").is_some());
        assert!(BitString::parse("01a1").is_none());
    }

    #[test]
    fn test_random_has_requested_length() {
        let mut rng = StdRng::seed_from_u64(42);
        let bits = BitString::random(300, &mut rng);
        assert_eq!(bits.len(), 300);
        assert!(bits.bits().iter().any(|&b| b));
        assert!(bits.bits().iter().any(|&b| !b));
    }

    #[test]
    fn test_swap_suffix() {
        let mut a = BitString::parse("0000").unwrap();
        let mut b = BitString::parse("1111").unwrap();
        a.swap_suffix(&mut b, 1);
        assert_eq!(a.to_string(), "0111");
        assert_eq!(b.to_string(), "1000");
    }

    #[test]
    fn test_flip_out_of_range_is_ignored() {
        let mut bits = BitString::parse("00").unwrap();
        bits.flip(5);
        bits.flip(1);
        assert_eq!(bits.to_string(), "01");
    }
}
