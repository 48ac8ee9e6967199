use crate::error::{GeneticError, OptionExt, Result};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::{ensure_not_empty, SelectionStrategy};

/// A selection strategy that selects individuals through tournament selection.
///
/// Tournament selection draws `tournament_size` distinct individuals uniformly at
/// random and keeps the fittest of them. Each parent comes from its own tournament,
/// so the same individual may win both.
///
/// - Smaller tournament sizes lead to more exploration (more random selection)
/// - Larger tournament sizes lead to more exploitation (more focus on the best individuals)
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
///     let selection = TournamentSelection::new(2)?;
///     let parents = selection.select_parents(&fitness, &mut rng)?;
///
///     // The weakest individual can never win a tournament of two distinct entrants.
///     assert!(!parents.contains(&4));
///
///     Ok(())
/// }
/// ```
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "TournamentSize", into = "TournamentSize")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// Creates a new TournamentSelection strategy with the specified tournament size.
    ///
    /// # Arguments
    ///
    /// * `tournament_size` - The number of individuals that participate in each tournament.
    ///   Must be at least 1. A tournament size of 1 is equivalent to random selection.
    ///
    /// # Errors
    ///
    /// Returns an error if `tournament_size` is 0.
    pub fn new(tournament_size: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(GeneticError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        Ok(Self { tournament_size })
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Runs a single tournament and returns the index of the winner.
    ///
    /// The winner is the first entrant, in draw order, holding the highest fitness.
    ///
    /// # Errors
    ///
    /// Returns an error if the tournament is larger than the population.
    fn run_tournament(&self, fitness: &[f64], rng: &mut RandomNumberGenerator) -> Result<usize> {
        if self.tournament_size > fitness.len() {
            return Err(GeneticError::Configuration(format!(
                "Tournament size ({}) exceeds population size ({})",
                self.tournament_size,
                fitness.len()
            )));
        }

        let participants = rng.sample_distinct(fitness.len(), self.tournament_size)?;

        let (&first, rest) = participants.split_first().ok_or_else_genetic(|| {
            GeneticError::Configuration("Tournament size must be at least 1".to_string())
        })?;
        let mut best_idx = first;
        let mut best_fitness = fitness[best_idx];

        for &idx in rest {
            let current_fitness = fitness[idx];
            if current_fitness > best_fitness {
                best_idx = idx;
                best_fitness = current_fitness;
            }
        }

        Ok(best_idx)
    }
}

/// Unchecked wire form of [`TournamentSelection`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct TournamentSize {
    tournament_size: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<TournamentSize> for TournamentSelection {
    type Error = GeneticError;

    fn try_from(raw: TournamentSize) -> Result<Self> {
        Self::new(raw.tournament_size)
    }
}

#[cfg(feature = "serde")]
impl From<TournamentSelection> for TournamentSize {
    fn from(selection: TournamentSelection) -> Self {
        Self {
            tournament_size: selection.tournament_size,
        }
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self { tournament_size: 2 }
    }
}

impl SelectionStrategy for TournamentSelection {
    fn select_parents(
        &self,
        fitness: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<[usize; 2]> {
        ensure_not_empty(fitness)?;
        Ok([
            self.run_tournament(fitness, rng)?,
            self.run_tournament(fitness, rng)?,
        ])
    }
}
