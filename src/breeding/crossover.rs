use std::fmt;

use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// How two parent chromosomes are recombined into one child.
///
/// Every child has the parents' length, and each of its bits is copied from
/// the same position of one of the two parents.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossover {
    /// One cut in `[1, L - 1)`: prefix of the first parent, suffix of the second.
    OnePoint,
    /// Two distinct cuts in `[1, L - 1)`: the middle segment comes from the second parent.
    TwoPoint,
    /// Every bit picked from either parent with probability 0.5.
    Uniform,
}

impl Crossover {
    pub fn name(&self) -> &'static str {
        match self {
            Self::OnePoint => "one-point",
            Self::TwoPoint => "two-point",
            Self::Uniform => "uniform",
        }
    }

    /// Shortest chromosome the strategy can cut.
    pub fn min_chromosome_length(&self) -> usize {
        match self {
            Self::OnePoint => 3,
            Self::TwoPoint => 4,
            Self::Uniform => 1,
        }
    }

    /// Produces one child from two parents.
    ///
    /// # Errors
    ///
    /// Returns an error if the parents differ in length or are shorter than
    /// [`Crossover::min_chromosome_length`].
    pub fn apply(
        &self,
        parent1: &[bool],
        parent2: &[bool],
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<bool>> {
        if parent1.len() != parent2.len() {
            return Err(GeneticError::Configuration(format!(
                "Cannot cross parents of length {} and {}",
                parent1.len(),
                parent2.len()
            )));
        }
        let length = parent1.len();
        if length < self.min_chromosome_length() {
            return Err(GeneticError::Configuration(format!(
                "{} crossover needs chromosomes of at least {} bits, got {}",
                self.name(),
                self.min_chromosome_length(),
                length
            )));
        }

        let child = match self {
            Self::OnePoint => {
                let cp = rng.gen_index(1..length - 1)?;
                [&parent1[..cp], &parent2[cp..]].concat()
            }
            Self::TwoPoint => {
                let (mut cp1, mut cp2) = (0, 0);
                while cp1 == cp2 {
                    cp1 = rng.gen_index(1..length - 1)?;
                    cp2 = rng.gen_index(1..length - 1)?;
                }
                if cp1 > cp2 {
                    std::mem::swap(&mut cp1, &mut cp2);
                }
                [&parent1[..cp1], &parent2[cp1..cp2], &parent1[cp2..]].concat()
            }
            Self::Uniform => parent1
                .iter()
                .zip(parent2)
                .map(|(&a, &b)| if rng.gen_bit() { a } else { b })
                .collect(),
        };

        Ok(child)
    }
}

impl fmt::Display for Crossover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Crossover; 3] = [Crossover::OnePoint, Crossover::TwoPoint, Crossover::Uniform];

    #[test]
    fn test_child_bits_come_from_parents() {
        let mut rng = RandomNumberGenerator::from_seed(17);
        let parent1: Vec<bool> = (0..24).map(|i| i % 3 == 0).collect();
        let parent2: Vec<bool> = (0..24).map(|i| i % 2 == 0).collect();

        for crossover in ALL {
            for _ in 0..100 {
                let child = crossover.apply(&parent1, &parent2, &mut rng).unwrap();
                assert_eq!(child.len(), parent1.len());
                for i in 0..child.len() {
                    assert!(child[i] == parent1[i] || child[i] == parent2[i]);
                }
            }
        }
    }

    #[test]
    fn test_one_point_keeps_first_and_last_bit_apart() {
        let mut rng = RandomNumberGenerator::from_seed(2);
        let zeros = vec![false; 10];
        let ones = vec![true; 10];

        for _ in 0..200 {
            let child = Crossover::OnePoint.apply(&zeros, &ones, &mut rng).unwrap();
            assert!(!child[0]);
            assert!(child[9]);
            // a single switch from the first parent to the second
            let cut = child.iter().position(|&b| b).unwrap();
            assert!((1..9).contains(&cut));
            assert!(child[cut..].iter().all(|&b| b));
        }
    }

    #[test]
    fn test_two_point_takes_a_middle_segment() {
        let mut rng = RandomNumberGenerator::from_seed(5);
        let zeros = vec![false; 12];
        let ones = vec![true; 12];

        for _ in 0..200 {
            let child = Crossover::TwoPoint.apply(&zeros, &ones, &mut rng).unwrap();
            let start = child.iter().position(|&b| b).unwrap();
            let end = child.iter().rposition(|&b| b).unwrap() + 1;

            assert!(start >= 1 && end <= 10 && start < end);
            assert!(child[start..end].iter().all(|&b| b));
            assert!(!child[0] && !child[11]);
        }
    }

    #[test]
    fn test_two_point_on_shortest_chromosome() {
        let mut rng = RandomNumberGenerator::from_seed(5);
        let child = Crossover::TwoPoint
            .apply(&[false; 4], &[true; 4], &mut rng)
            .unwrap();
        // the only distinct cut pair in [1, 3) is (1, 2)
        assert_eq!(child, vec![false, true, false, false]);
    }

    #[test]
    fn test_uniform_mixes_both_parents() {
        let mut rng = RandomNumberGenerator::from_seed(9);
        let child = Crossover::Uniform
            .apply(&[false; 64], &[true; 64], &mut rng)
            .unwrap();
        assert!(child.iter().any(|&b| b));
        assert!(child.iter().any(|&b| !b));
    }

    #[test]
    fn test_identical_parents_give_identical_child() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        let parent = vec![true, false, false, true, true, false];
        for crossover in ALL {
            assert_eq!(crossover.apply(&parent, &parent, &mut rng).unwrap(), parent);
        }
    }

    #[test]
    fn test_rejects_short_or_mismatched_parents() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        assert!(Crossover::OnePoint.apply(&[true; 2], &[false; 2], &mut rng).is_err());
        assert!(Crossover::TwoPoint.apply(&[true; 3], &[false; 3], &mut rng).is_err());
        assert!(Crossover::Uniform.apply(&[true; 1], &[false; 1], &mut rng).is_ok());
        assert!(Crossover::Uniform.apply(&[true; 3], &[false; 4], &mut rng).is_err());
    }
}
