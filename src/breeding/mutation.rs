use std::fmt;

use crate::error::{GeneticError, Result};
use crate::population::Population;
use crate::rng::RandomNumberGenerator;

/// Per-bit flip probability applied to a whole batch of offspring.
///
/// The tiered variants scale with the chromosome length `L`:
/// `Low = 1/(3L)`, `Medium = 1/L`, `High = 3/L` (capped at 1).
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "MutationRate", into = "MutationRate")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mutation {
    Low,
    Medium,
    High,
    /// An explicit probability in `[0, 1]`.
    ByValue(f64),
}

impl Mutation {
    /// # Errors
    ///
    /// Returns an error unless `probability` lies in `[0, 1]`.
    pub fn by_value(probability: f64) -> Result<Self> {
        validate_probability(probability)?;
        Ok(Self::ByValue(probability))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::ByValue(_) => "by_value",
        }
    }

    /// Flip probability of a single bit of a chromosome of `chromosome_length` bits.
    pub fn probability(&self, chromosome_length: usize) -> f64 {
        let length = chromosome_length.max(1) as f64;
        match *self {
            Self::Low => 1.0 / (3.0 * length),
            Self::Medium => 1.0 / length,
            Self::High => (3.0 / length).min(1.0),
            Self::ByValue(p) => p,
        }
    }

    /// Flips every bit of `population` independently with the configured
    /// probability and returns how many bits changed.
    ///
    /// A bit flips when a uniform draw from `[0, 1)` falls below the
    /// probability, so 0 never flips and 1 always flips.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit probability lies outside `[0, 1]`.
    pub fn apply(&self, population: &mut Population, rng: &mut RandomNumberGenerator) -> Result<usize> {
        let p = self.probability(population.chromosome_length());
        validate_probability(p)?;

        let mut flipped = 0;
        for bit in population.bits_mut() {
            if rng.uniform() < p {
                *bit = !*bit;
                flipped += 1;
            }
        }
        Ok(flipped)
    }
}

/// Unchecked wire form of [`Mutation`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
enum MutationRate {
    Low,
    Medium,
    High,
    ByValue(f64),
}

#[cfg(feature = "serde")]
impl TryFrom<MutationRate> for Mutation {
    type Error = GeneticError;

    fn try_from(raw: MutationRate) -> Result<Self> {
        match raw {
            MutationRate::Low => Ok(Self::Low),
            MutationRate::Medium => Ok(Self::Medium),
            MutationRate::High => Ok(Self::High),
            MutationRate::ByValue(p) => Self::by_value(p),
        }
    }
}

#[cfg(feature = "serde")]
impl From<Mutation> for MutationRate {
    fn from(mutation: Mutation) -> Self {
        match mutation {
            Mutation::Low => Self::Low,
            Mutation::Medium => Self::Medium,
            Mutation::High => Self::High,
            Mutation::ByValue(p) => Self::ByValue(p),
        }
    }
}

fn validate_probability(probability: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(GeneticError::Configuration(format!(
            "Mutation probability must be in [0, 1], got {}",
            probability
        )));
    }
    Ok(())
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByValue(p) => write!(f, "by_value ({})", p),
            other => f.write_str(other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population(rng: &mut RandomNumberGenerator) -> Population {
        Population::random(30, 18, rng)
    }

    #[test]
    fn test_zero_probability_is_identity() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        let original = population(&mut rng);
        let mut mutated = original.clone();

        let flipped = Mutation::by_value(0.0)
            .unwrap()
            .apply(&mut mutated, &mut rng)
            .unwrap();

        assert_eq!(flipped, 0);
        assert_eq!(mutated, original);
    }

    #[test]
    fn test_full_probability_flips_every_bit() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        let original = population(&mut rng);
        let mut mutated = original.clone();

        let flipped = Mutation::by_value(1.0)
            .unwrap()
            .apply(&mut mutated, &mut rng)
            .unwrap();

        assert_eq!(flipped, original.bits().len());
        assert!(mutated
            .bits()
            .iter()
            .zip(original.bits())
            .all(|(&m, &o)| m != o));
    }

    #[test]
    fn test_tiered_probabilities() {
        assert!((Mutation::Low.probability(10) - 1.0 / 30.0).abs() < 1e-15);
        assert_eq!(Mutation::Medium.probability(10), 0.1);
        assert!((Mutation::High.probability(10) - 0.3).abs() < 1e-15);
        assert_eq!(Mutation::High.probability(2), 1.0);
        assert_eq!(Mutation::ByValue(0.25).probability(10), 0.25);
    }

    #[test]
    fn test_flip_rate_tracks_probability() {
        let mut rng = RandomNumberGenerator::from_seed(12);
        let mut batch = Population::random(200, 50, &mut rng);

        let flipped = Mutation::Medium.apply(&mut batch, &mut rng).unwrap();

        // 10_000 bits at p = 0.02
        assert!((120..=280).contains(&flipped), "flipped {}", flipped);
    }

    #[test]
    fn test_rejects_out_of_range_probability() {
        assert!(Mutation::by_value(-0.1).is_err());
        assert!(Mutation::by_value(1.5).is_err());
        assert!(Mutation::by_value(f64::NAN).is_err());

        let mut rng = RandomNumberGenerator::from_seed(1);
        let mut batch = population(&mut rng);
        assert!(Mutation::ByValue(2.0).apply(&mut batch, &mut rng).is_err());
    }

    #[test]
    fn test_empty_batch() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        let mut batch = Population::empty(8);
        assert_eq!(Mutation::High.apply(&mut batch, &mut rng).unwrap(), 0);
    }
}
