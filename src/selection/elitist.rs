use crate::error::{GeneticError, Result};
use crate::population::Population;

/// Picks the fittest chromosomes of a population for verbatim carry-over.
///
/// Individuals are ordered with a stable ascending sort on fitness and the
/// last `size` rows are kept, still in ascending order. Among equally fit
/// individuals the ones with the higher row index are therefore preferred.
///
/// # Examples
///
/// ```
/// use bitga::population::Population;
/// use bitga::selection::ElitistSelection;
/// use bitga::error::Result;
///
/// fn main() -> Result<()> {
///     let population = Population::from_rows(&[
///         [false, false, true],
///         [false, true, false],
///         [true, false, false],
///     ])?;
///     let fitness = vec![0.5, 0.8, 0.3];
///
///     let elite = ElitistSelection::new(2)?.select(&population, &fitness)?;
///
///     assert_eq!(elite.len(), 2);
///     assert_eq!(elite.chromosome(0), &[false, false, true]); // 0.5
///     assert_eq!(elite.chromosome(1), &[false, true, false]); // 0.8
///
///     Ok(())
/// }
/// ```
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "EliteSize", into = "EliteSize")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElitistSelection {
    size: usize,
}

impl ElitistSelection {
    /// # Errors
    ///
    /// Returns an error if `size` is zero.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(GeneticError::Configuration(
                "Elite size must be at least 1".to_string(),
            ));
        }
        Ok(Self { size })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Row indices of the elite, in ascending fitness order.
    ///
    /// # Errors
    ///
    /// Returns an error if the fitness vector is empty or shorter than the elite.
    pub fn elite_indices(&self, fitness: &[f64]) -> Result<Vec<usize>> {
        if fitness.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        if self.size > fitness.len() {
            return Err(GeneticError::Configuration(format!(
                "Elite size ({}) exceeds population size ({})",
                self.size,
                fitness.len()
            )));
        }

        let mut indices: Vec<usize> = (0..fitness.len()).collect();
        indices.sort_by(|&a, &b| fitness[a].total_cmp(&fitness[b]));

        Ok(indices.split_off(fitness.len() - self.size))
    }

    /// Copies the elite rows out of `population`.
    ///
    /// # Errors
    ///
    /// Returns an error if the population is empty, if the fitness vector
    /// length doesn't match the population length, or if the elite is larger
    /// than the population.
    pub fn select(&self, population: &Population, fitness: &[f64]) -> Result<Population> {
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        if fitness.len() != population.len() {
            return Err(GeneticError::Configuration(format!(
                "Fitness vector length ({}) doesn't match population length ({})",
                fitness.len(),
                population.len()
            )));
        }

        let mut elite = Population::with_capacity(population.chromosome_length(), self.size);
        for idx in self.elite_indices(fitness)? {
            elite.push(population.chromosome(idx))?;
        }
        Ok(elite)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct EliteSize {
    size: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<EliteSize> for ElitistSelection {
    type Error = GeneticError;

    fn try_from(raw: EliteSize) -> Result<Self> {
        Self::new(raw.size)
    }
}

#[cfg(feature = "serde")]
impl From<ElitistSelection> for EliteSize {
    fn from(selection: ElitistSelection) -> Self {
        Self {
            size: selection.size,
        }
    }
}

/// Whether a generation keeps its best individuals.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Elitism {
    #[default]
    Disabled,
    Enabled(ElitistSelection),
}

impl Elitism {
    /// # Errors
    ///
    /// Returns an error if `size` is zero.
    pub fn enabled(size: usize) -> Result<Self> {
        Ok(Self::Enabled(ElitistSelection::new(size)?))
    }

    /// Number of rows carried over unchanged.
    pub fn size(&self) -> usize {
        match self {
            Self::Disabled => 0,
            Self::Enabled(selection) => selection.size(),
        }
    }

    /// The rows to carry over; empty when elitism is disabled.
    pub fn carve_out(&self, population: &Population, fitness: &[f64]) -> Result<Population> {
        match self {
            Self::Disabled => Ok(Population::empty(population.chromosome_length())),
            Self::Enabled(selection) => selection.select(population, fitness),
        }
    }
}
