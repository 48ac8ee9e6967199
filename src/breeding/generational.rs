//! # GenerationalStrategy
//!
//! Builds the next population from the current one: the elite rows are set
//! aside, the remaining slots are refilled one child at a time through
//! selection and crossover, the children are mutated as one batch, and the
//! elite rows are appended unchanged.

use crate::{
    breeding::{Crossover, Mutation},
    error::{GeneticError, Result},
    population::Population,
    rng::RandomNumberGenerator,
    selection::{Elitism, Selection, SelectionStrategy},
};

/// The operator set applied to every generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationalStrategy {
    selection: Selection,
    crossover: Crossover,
    mutation: Mutation,
    elitism: Elitism,
}

impl GenerationalStrategy {
    pub fn new(
        selection: Selection,
        crossover: Crossover,
        mutation: Mutation,
        elitism: Elitism,
    ) -> Self {
        Self {
            selection,
            crossover,
            mutation,
            elitism,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn crossover(&self) -> &Crossover {
        &self.crossover
    }

    pub fn mutation(&self) -> &Mutation {
        &self.mutation
    }

    pub fn elitism(&self) -> &Elitism {
        &self.elitism
    }

    /// Breeds a population of the same size as `population`.
    ///
    /// ## Parameters
    ///
    /// - `population`: The current generation.
    /// - `fitness`: Fitness of every row of `population`.
    /// - `rng`: The random number generator driving every operator.
    ///
    /// ## Errors
    ///
    /// This method can fail if:
    /// - The population is empty
    /// - The fitness vector length doesn't match the population length
    /// - The elite is larger than the population
    /// - An operator rejects its input
    pub fn breed(
        &self,
        population: &Population,
        fitness: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population> {
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

        let elite = self.elitism.carve_out(population, fitness)?;
        let needed = population.len() - elite.len();

        let mut children = Population::with_capacity(population.chromosome_length(), population.len());
        while children.len() < needed {
            let [parent1, parent2] = self.selection.select_parents(fitness, rng)?;
            let child = self.crossover.apply(
                population.chromosome(parent1),
                population.chromosome(parent2),
                rng,
            )?;
            children.push(&child)?;
        }

        let flipped = self.mutation.apply(&mut children, rng)?;
        tracing::trace!(children = children.len(), flipped, "Offspring mutated");

        children.extend(&elite)?;
        Ok(children)
    }
}
