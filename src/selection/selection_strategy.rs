use std::fmt::{self, Debug};

use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;
use crate::selection::{RankBasedSelection, RouletteWheelSelection, TournamentSelection};

/// Trait for parent selection strategies.
///
/// A selection strategy looks at the fitness vector of the current
/// population (higher is better) and picks the row indices of two parents
/// for one crossover.
///
/// # Examples
///
/// ```
/// use bitga::selection::{SelectionStrategy, TournamentSelection};
/// use bitga::rng::RandomNumberGenerator;
/// use bitga::error::Result;
///
/// fn main() -> Result<()> {
///     let fitness = vec![0.5, 0.8, 0.3, 0.9, 0.1];
///     let mut rng = RandomNumberGenerator::from_seed(42);
///
///     // A tournament over the whole population always finds the best row.
///     let selection = TournamentSelection::new(5)?;
///     let parents = selection.select_parents(&fitness, &mut rng)?;
///
///     assert_eq!(parents, [3, 3]);
///
///     Ok(())
/// }
/// ```
pub trait SelectionStrategy: Debug + Send + Sync {
    /// Selects two parent indices from the population.
    ///
    /// # Arguments
    ///
    /// * `fitness` - The fitness scores, one per individual.
    /// * `rng` - The random number generator driving the draws.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The fitness vector is empty
    /// - The fitness vector holds values the strategy cannot weigh
    /// - The strategy's parameters don't fit the population size
    fn select_parents(
        &self,
        fitness: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<[usize; 2]>;
}

pub(crate) fn ensure_not_empty(fitness: &[f64]) -> Result<()> {
    if fitness.is_empty() {
        return Err(GeneticError::EmptyPopulation);
    }
    Ok(())
}

/// The closed set of parent selection strategies, each carrying its own
/// parameters.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Fitness-proportional roulette wheel.
    Proportional(RouletteWheelSelection),
    /// Roulette wheel over averaged ranks.
    Rank(RankBasedSelection),
    /// Best of a random tournament.
    Tournament(TournamentSelection),
}

impl Selection {
    pub fn proportional() -> Self {
        Self::Proportional(RouletteWheelSelection::new())
    }

    pub fn rank() -> Self {
        Self::Rank(RankBasedSelection::new())
    }

    /// # Errors
    ///
    /// Returns an error if `tournament_size` is zero.
    pub fn tournament(tournament_size: usize) -> Result<Self> {
        Ok(Self::Tournament(TournamentSelection::new(tournament_size)?))
    }

    /// The configuration tag of the strategy.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Proportional(_) => "proportional",
            Self::Rank(_) => "rank",
            Self::Tournament(_) => "tournament",
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::Tournament(TournamentSelection::default())
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tournament(t) => write!(f, "tournament (size {})", t.tournament_size()),
            other => f.write_str(other.name()),
        }
    }
}

impl SelectionStrategy for Selection {
    fn select_parents(
        &self,
        fitness: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<[usize; 2]> {
        match self {
            Self::Proportional(s) => s.select_parents(fitness, rng),
            Self::Rank(s) => s.select_parents(fitness, rng),
            Self::Tournament(s) => s.select_parents(fitness, rng),
        }
    }
}
