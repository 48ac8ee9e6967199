//! # Population
//!
//! A population is a rectangular bit matrix: one row per individual, one
//! column per bit. Rows are stored back to back in a single buffer so a
//! whole generation can be built, mutated and concatenated without nested
//! allocations.

use std::fmt;

use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// A fixed-width matrix of chromosomes.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "BitMatrix", into = "BitMatrix")
)]
#[derive(Clone, PartialEq, Eq)]
pub struct Population {
    bits: Vec<bool>,
    chromosome_length: usize,
}

impl Population {
    /// Creates an empty population whose rows will hold `chromosome_length` bits.
    pub fn empty(chromosome_length: usize) -> Self {
        Self {
            bits: Vec::new(),
            chromosome_length,
        }
    }

    /// Creates an empty population with room for `rows` chromosomes.
    pub fn with_capacity(chromosome_length: usize, rows: usize) -> Self {
        Self {
            bits: Vec::with_capacity(chromosome_length * rows),
            chromosome_length,
        }
    }

    /// Creates `size` chromosomes of `chromosome_length` independent fair bits.
    pub fn random(size: usize, chromosome_length: usize, rng: &mut RandomNumberGenerator) -> Self {
        let bits = (0..size * chromosome_length).map(|_| rng.gen_bit()).collect();
        Self {
            bits,
            chromosome_length,
        }
    }

    /// Builds a population from explicit rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows are empty or do not all share the same
    /// non-zero length.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        let first = rows.first().ok_or(GeneticError::EmptyPopulation)?;
        let mut population = Self::with_capacity(first.as_ref().len(), rows.len());
        if population.chromosome_length == 0 {
            return Err(GeneticError::Configuration(
                "Chromosomes must hold at least one bit".to_string(),
            ));
        }
        for row in rows {
            population.push(row.as_ref())?;
        }
        Ok(population)
    }

    /// Number of chromosomes.
    pub fn len(&self) -> usize {
        if self.chromosome_length == 0 {
            0
        } else {
            self.bits.len() / self.chromosome_length
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of bits in every chromosome.
    pub fn chromosome_length(&self) -> usize {
        self.chromosome_length
    }

    /// Returns the chromosome at row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn chromosome(&self, index: usize) -> &[bool] {
        let start = index * self.chromosome_length;
        &self.bits[start..start + self.chromosome_length]
    }

    /// Returns the chromosome at row `index`, if present.
    pub fn get(&self, index: usize) -> Option<&[bool]> {
        if index < self.len() {
            Some(self.chromosome(index))
        } else {
            None
        }
    }

    /// Iterates over the rows in order.
    pub fn iter(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.bits.chunks_exact(self.chromosome_length.max(1))
    }

    /// All bits, row-major.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// All bits, row-major, for in-place operators such as mutation.
    pub fn bits_mut(&mut self) -> &mut [bool] {
        &mut self.bits
    }

    /// Appends one chromosome.
    ///
    /// # Errors
    ///
    /// Returns an error if the chromosome length differs from the matrix width.
    pub fn push(&mut self, chromosome: &[bool]) -> Result<()> {
        if chromosome.len() != self.chromosome_length {
            return Err(GeneticError::Configuration(format!(
                "Chromosome length ({}) doesn't match population width ({})",
                chromosome.len(),
                self.chromosome_length
            )));
        }
        self.bits.extend_from_slice(chromosome);
        Ok(())
    }

    /// Appends every row of `other`.
    ///
    /// # Errors
    ///
    /// Returns an error if the two populations have different widths.
    pub fn extend(&mut self, other: &Population) -> Result<()> {
        if other.is_empty() {
            return Ok(());
        }
        if other.chromosome_length != self.chromosome_length {
            return Err(GeneticError::Configuration(format!(
                "Cannot concatenate populations of width {} and {}",
                self.chromosome_length, other.chromosome_length
            )));
        }
        self.bits.extend_from_slice(&other.bits);
        Ok(())
    }
}

/// Unchecked wire form of [`Population`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct BitMatrix {
    bits: Vec<bool>,
    chromosome_length: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<BitMatrix> for Population {
    type Error = GeneticError;

    fn try_from(raw: BitMatrix) -> Result<Self> {
        if raw.chromosome_length == 0 || raw.bits.len() % raw.chromosome_length != 0 {
            return Err(GeneticError::Configuration(format!(
                "{} bits do not form rows of {} bits",
                raw.bits.len(),
                raw.chromosome_length
            )));
        }
        Ok(Self {
            bits: raw.bits,
            chromosome_length: raw.chromosome_length,
        })
    }
}

#[cfg(feature = "serde")]
impl From<Population> for BitMatrix {
    fn from(population: Population) -> Self {
        Self {
            bits: population.bits,
            chromosome_length: population.chromosome_length,
        }
    }
}

impl fmt::Debug for Population {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self
            .iter()
            .map(|row| row.iter().map(|&bit| if bit { '1' } else { '0' }).collect())
            .collect();
        f.debug_struct("Population")
            .field("chromosome_length", &self.chromosome_length)
            .field("rows", &rows)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_population_shape() {
        let mut rng = RandomNumberGenerator::from_seed(5);
        let population = Population::random(7, 12, &mut rng);

        assert_eq!(population.len(), 7);
        assert_eq!(population.chromosome_length(), 12);
        assert_eq!(population.iter().count(), 7);
        assert!(population.iter().all(|row| row.len() == 12));
    }

    #[test]
    fn test_random_population_uses_both_values() {
        let mut rng = RandomNumberGenerator::from_seed(5);
        let population = Population::random(20, 20, &mut rng);

        assert!(population.bits().iter().any(|&b| b));
        assert!(population.bits().iter().any(|&b| !b));
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let rows = vec![vec![true, false], vec![true]];
        assert!(Population::from_rows(&rows).is_err());

        let empty: Vec<Vec<bool>> = Vec::new();
        assert_eq!(
            Population::from_rows(&empty),
            Err(GeneticError::EmptyPopulation)
        );
    }

    #[test]
    fn test_push_and_extend() {
        let mut population = Population::from_rows(&[[true, false, true]]).unwrap();
        population.push(&[false, false, false]).unwrap();
        assert!(population.push(&[true]).is_err());

        let other = Population::from_rows(&[[true, true, true]]).unwrap();
        population.extend(&other).unwrap();

        assert_eq!(population.len(), 3);
        assert_eq!(population.chromosome(2), &[true, true, true]);
        assert_eq!(population.get(3), None);

        let narrow = Population::from_rows(&[[true]]).unwrap();
        assert!(population.extend(&narrow).is_err());
    }

    #[test]
    fn test_extend_with_empty_population_is_noop() {
        let mut population = Population::from_rows(&[[true, false]]).unwrap();
        population.extend(&Population::empty(5)).unwrap();
        assert_eq!(population.len(), 1);
    }
}
