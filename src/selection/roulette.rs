use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::{ensure_not_empty, SelectionStrategy};

/// A selection strategy that selects individuals through roulette wheel selection.
///
/// Roulette wheel selection (also known as fitness proportionate selection) selects
/// individuals with probability proportional to their fitness. Individuals with higher
/// fitness have a higher chance of being selected.
///
/// Fitness values must be non-negative. When they sum to zero (or the sum is not
/// finite) the wheel degenerates to a uniform draw over the population.
///
/// # Examples
///
/// ```
/// use bitga::selection::{RouletteWheelSelection, SelectionStrategy};
/// use bitga::rng::RandomNumberGenerator;
/// use bitga::error::Result;
///
/// fn main() -> Result<()> {
///     let fitness = vec![0.5, 0.8, 0.3, 0.9, 0.1];
///     let mut rng = RandomNumberGenerator::from_seed(42);
///
///     let selection = RouletteWheelSelection::new();
///     let [first, second] = selection.select_parents(&fitness, &mut rng)?;
///
///     assert!(first < fitness.len() && second < fitness.len());
///
///     Ok(())
/// }
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouletteWheelSelection;

impl RouletteWheelSelection {
    pub fn new() -> Self {
        Self
    }
}

impl SelectionStrategy for RouletteWheelSelection {
    fn select_parents(
        &self,
        fitness: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<[usize; 2]> {
        ensure_not_empty(fitness)?;
        let wheel = Wheel::build(fitness)?;
        Ok([wheel.spin(rng)?, wheel.spin(rng)?])
    }
}

/// A roulette wheel built once from a weight vector and spun once per parent.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Wheel {
    /// Cumulative probabilities, the last one pinned to exactly 1.0.
    Weighted(Vec<f64>),
    /// Degenerate weights: every index is equally likely.
    Uniform(usize),
}

impl Wheel {
    /// Calculates the cumulative selection probabilities for `weights`.
    ///
    /// # Errors
    ///
    /// Returns an error if any weight is negative.
    pub(crate) fn build(weights: &[f64]) -> Result<Self> {
        if let Some(negative) = weights.iter().find(|&&w| w < 0.0) {
            return Err(GeneticError::InvalidNumericValue(format!(
                "Roulette wheel selection requires non-negative weights, got {}",
                negative
            )));
        }

        let sum: f64 = weights.iter().sum();
        if !(sum.is_finite() && sum > 0.0) {
            tracing::warn!(
                sum,
                population = weights.len(),
                "Degenerate selection weights, falling back to uniform selection"
            );
            return Ok(Self::Uniform(weights.len()));
        }

        let mut cumulative = 0.0;
        let mut probs: Vec<f64> = weights
            .iter()
            .map(|&w| {
                cumulative += w / sum;
                cumulative
            })
            .collect();

        // Pin the tail to exactly 1.0 from the last positive weight on, so
        // rounding can't leave a sliver for trailing zero weights.
        if let Some(last_positive) = weights.iter().rposition(|&w| w > 0.0) {
            probs[last_positive..].iter_mut().for_each(|p| *p = 1.0);
        }

        Ok(Self::Weighted(probs))
    }

    /// Draws `r` in `[0, 1)` and returns the slot it lands in.
    pub(crate) fn spin(&self, rng: &mut RandomNumberGenerator) -> Result<usize> {
        match self {
            Self::Weighted(probs) => Ok(slot(probs, rng.uniform())),
            Self::Uniform(len) => rng.gen_index(0..*len),
        }
    }
}

/// First index whose cumulative probability lies strictly above `r`.
///
/// Slot `i` covers `[probs[i - 1], probs[i])`, so zero-width slots are never hit.
fn slot(probs: &[f64], r: f64) -> usize {
    probs
        .iter()
        .position(|&p| r < p)
        .unwrap_or(probs.len().saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roulette_wheel_selection() {
        let fitness = vec![0.5, 0.8, 0.3, 0.9, 0.1];
        let mut rng = RandomNumberGenerator::from_seed(42); // Use fixed seed for deterministic testing

        let selection = RouletteWheelSelection::new();
        let [a, b] = selection.select_parents(&fitness, &mut rng).unwrap();

        assert!(a < fitness.len());
        assert!(b < fitness.len());
    }

    #[test]
    fn test_calculate_probabilities() {
        let fitness = vec![0.5, 0.8, 0.3, 0.9, 0.1];

        let probs = match Wheel::build(&fitness).unwrap() {
            Wheel::Weighted(probs) => probs,
            other => panic!("Expected a weighted wheel, got {:?}", other),
        };

        // Should have the same length as fitness
        assert_eq!(probs.len(), fitness.len());

        // Probabilities should be cumulative and the last one should be 1.0
        assert_eq!(probs[probs.len() - 1], 1.0);
        assert!((probs[0] - 0.5 / 2.6).abs() < 1e-12);

        // Probabilities should be in ascending order
        for i in 1..probs.len() {
            assert!(probs[i] >= probs[i - 1]);
        }
    }

    #[test]
    fn test_zero_width_slots_are_skipped_at_the_edges() {
        let probs = match Wheel::build(&[0.0, 0.0, 0.5, 0.0, 0.5, 0.0]).unwrap() {
            Wheel::Weighted(probs) => probs,
            other => panic!("Expected a weighted wheel, got {:?}", other),
        };

        assert_eq!(probs, vec![0.0, 0.0, 0.5, 0.5, 1.0, 1.0]);
        assert_eq!(slot(&probs, 0.0), 2);
        assert_eq!(slot(&probs, 0.5), 4);
        assert_eq!(slot(&probs, 1.0 - f64::EPSILON), 4);
    }

    #[test]
    fn test_zero_weight_is_never_selected() {
        let fitness = vec![0.0, 1.0, 0.0];
        let mut rng = RandomNumberGenerator::from_seed(3);
        let selection = RouletteWheelSelection::new();

        for _ in 0..200 {
            assert_eq!(selection.select_parents(&fitness, &mut rng).unwrap(), [1, 1]);
        }
    }

    #[test]
    fn test_selection_frequency_follows_fitness() {
        let fitness = vec![1.0, 3.0];
        let mut rng = RandomNumberGenerator::from_seed(8);
        let selection = RouletteWheelSelection::new();

        let mut counts = [0usize; 2];
        for _ in 0..5000 {
            for idx in selection.select_parents(&fitness, &mut rng).unwrap() {
                counts[idx] += 1;
            }
        }

        let share = counts[1] as f64 / 10000.0;
        assert!((share - 0.75).abs() < 0.03, "share was {}", share);
    }

    #[test]
    fn test_zero_fitness_falls_back_to_uniform() {
        let fitness = vec![0.0, 0.0, 0.0];
        assert_eq!(Wheel::build(&fitness).unwrap(), Wheel::Uniform(3));

        let mut rng = RandomNumberGenerator::from_seed(4);
        let selection = RouletteWheelSelection::new();
        let mut seen = [false; 3];
        for _ in 0..100 {
            for idx in selection.select_parents(&fitness, &mut rng).unwrap() {
                seen[idx] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_non_finite_sum_falls_back_to_uniform() {
        assert_eq!(
            Wheel::build(&[1.0, f64::INFINITY]).unwrap(),
            Wheel::Uniform(2)
        );
        assert_eq!(Wheel::build(&[f64::NAN, 1.0]).unwrap(), Wheel::Uniform(2));
    }

    #[test]
    fn test_negative_fitness_is_rejected() {
        let fitness = vec![0.5, -0.8, 0.3];
        let mut rng = RandomNumberGenerator::new();

        let selection = RouletteWheelSelection::new();
        let result = selection.select_parents(&fitness, &mut rng);

        assert!(matches!(result, Err(GeneticError::InvalidNumericValue(_))));
    }
}
