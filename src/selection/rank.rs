use crate::error::Result;
use crate::rng::RandomNumberGenerator;
use crate::selection::roulette::Wheel;
use crate::selection::selection_strategy::{ensure_not_empty, SelectionStrategy};

/// A selection strategy that selects individuals based on their rank in the population.
///
/// Rank-based selection spins the same roulette wheel as proportional selection, but
/// the slice of each individual is its rank rather than its raw fitness: the lowest
/// fitness gets rank 1, the highest gets rank `n`, and tied individuals share the
/// average of the ranks they span. This keeps a few very fit individuals from
/// dominating the wheel.
///
/// # Examples
///
/// ```
/// use bitga::selection::{RankBasedSelection, SelectionStrategy};
/// use bitga::rng::RandomNumberGenerator;
/// use bitga::error::Result;
///
/// fn main() -> Result<()> {
///     let fitness = vec![0.5, 0.8, 0.3, 0.9, 0.1];
///     let mut rng = RandomNumberGenerator::from_seed(42);
///
///     let selection = RankBasedSelection::new();
///     let parents = selection.select_parents(&fitness, &mut rng)?;
///
///     assert!(parents.iter().all(|&i| i < fitness.len()));
///
///     Ok(())
/// }
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankBasedSelection;

impl RankBasedSelection {
    pub fn new() -> Self {
        Self
    }

    /// Ranks `fitness` in ascending order, starting at 1, averaging ties.
    pub fn ranks(fitness: &[f64]) -> Vec<f64> {
        let n = fitness.len();
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| fitness[a].total_cmp(&fitness[b]));

        let mut ranks = vec![0.0; n];
        let mut start = 0;
        while start < n {
            let mut end = start + 1;
            while end < n && fitness[order[end]] == fitness[order[start]] {
                end += 1;
            }
            // positions start..end hold ranks start + 1 ..= end
            let average = (start + 1 + end) as f64 / 2.0;
            for &idx in &order[start..end] {
                ranks[idx] = average;
            }
            start = end;
        }

        ranks
    }
}

impl SelectionStrategy for RankBasedSelection {
    fn select_parents(
        &self,
        fitness: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<[usize; 2]> {
        ensure_not_empty(fitness)?;
        let wheel = Wheel::build(&Self::ranks(fitness))?;
        Ok([wheel.spin(rng)?, wheel.spin(rng)?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_without_ties() {
        let fitness = vec![0.5, 0.8, 0.3, 0.9, 0.1];
        assert_eq!(
            RankBasedSelection::ranks(&fitness),
            vec![3.0, 4.0, 2.0, 5.0, 1.0]
        );
    }

    #[test]
    fn test_ranks_average_ties() {
        let fitness = vec![0.2, 0.7, 0.2, 0.7, 0.7, 0.1];
        assert_eq!(
            RankBasedSelection::ranks(&fitness),
            vec![2.5, 5.0, 2.5, 5.0, 5.0, 1.0]
        );

        let flat = vec![1.0; 4];
        assert_eq!(RankBasedSelection::ranks(&flat), vec![2.5; 4]);
    }

    #[test]
    fn test_rank_dampens_fitness_outliers() {
        // Proportional selection would hand index 1 almost every draw.
        let fitness = vec![0.001, 1000.0];
        let mut rng = RandomNumberGenerator::from_seed(21);
        let selection = RankBasedSelection::new();

        let mut low_picks = 0;
        for _ in 0..3000 {
            low_picks += selection
                .select_parents(&fitness, &mut rng)
                .unwrap()
                .iter()
                .filter(|&&i| i == 0)
                .count();
        }

        // rank 1 of 3 total
        let share = low_picks as f64 / 6000.0;
        assert!((share - 1.0 / 3.0).abs() < 0.03, "share was {}", share);
    }

    #[test]
    fn test_single_individual() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        let selection = RankBasedSelection::new();
        assert_eq!(selection.select_parents(&[0.4], &mut rng).unwrap(), [0, 0]);
    }
}
