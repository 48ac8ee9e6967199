use std::fmt;

use crate::{
    error::{GeneticError, OptionExt, Result},
    objective::Evaluation,
};

use super::Challenge;

/// Fitness summary of one evaluated generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    pub generation: usize,
    pub max_fitness: f64,
    pub min_fitness: f64,
    pub mean_fitness: f64,
}

impl GenerationStats {
    /// # Errors
    ///
    /// Returns `GeneticError::EmptyPopulation` if `fitness` is empty.
    pub fn from_fitness(generation: usize, fitness: &[f64]) -> Result<Self> {
        if fitness.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let (min_fitness, max_fitness) = fitness
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &f| (lo.min(f), hi.max(f)));
        let mean_fitness = fitness.iter().sum::<f64>() / fitness.len() as f64;

        Ok(Self {
            generation,
            max_fitness,
            min_fitness,
            mean_fitness,
        })
    }
}

/// The best individual seen so far in a run.
///
/// It only changes hands on a strictly greater fitness, so between equally
/// fit individuals the one found first is kept.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct BestIndividual {
    fitness: f64,
    solution: Vec<f64>,
    value: f64,
    generation: usize,
    solved_generation: Option<usize>,
}

impl BestIndividual {
    /// Picks the fittest row of `evaluation`.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::EmptyPopulation` if `evaluation` is empty.
    pub fn from_evaluation<C>(evaluation: &Evaluation, challenge: &C, generation: usize) -> Result<Self>
    where
        C: Challenge + ?Sized,
    {
        let idx = evaluation
            .best_index()
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)?;
        let solution = evaluation.decoded()[idx].clone();

        Ok(Self {
            fitness: evaluation.fitness()[idx],
            value: challenge.value(&solution),
            solution,
            generation,
            solved_generation: None,
        })
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Decoded coordinates.
    pub fn solution(&self) -> &[f64] {
        &self.solution
    }

    /// Raw objective value at [`BestIndividual::solution`].
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Generation in which this individual was found.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn solved(&self) -> bool {
        self.solved_generation.is_some()
    }

    /// First generation whose best individual lay within precision of the optimum.
    pub fn solved_generation(&self) -> Option<usize> {
        self.solved_generation
    }

    /// Keeps `self` unless `candidate` is strictly fitter. The solved marker
    /// survives the exchange.
    pub fn improve(self, candidate: BestIndividual) -> Self {
        if candidate.fitness > self.fitness {
            Self {
                solved_generation: self.solved_generation.or(candidate.solved_generation),
                ..candidate
            }
        } else {
            self
        }
    }

    /// Records `generation` as the solving one unless an earlier one already is.
    pub(crate) fn mark_solved(&mut self, generation: usize) {
        self.solved_generation.get_or_insert(generation);
    }
}

impl fmt::Display for BestIndividual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.solved_generation {
            Some(generation) => {
                writeln!(f, "Solution found.")?;
                writeln!(f, "Generation: {}", generation)?;
            }
            None => writeln!(f, "Solution not found.")?,
        }
        for (i, x) in self.solution.iter().enumerate() {
            writeln!(f, "x_{}: {}", i, x)?;
        }
        write!(f, "f(x): {}", self.value)
    }
}

/// Outcome of a completed run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult {
    pub best: BestIndividual,
    /// One entry per evaluated generation, generation 0 first.
    pub statistics: Vec<GenerationStats>,
}

impl EvolutionResult {
    pub fn solved(&self) -> bool {
        self.best.solved()
    }

    /// Number of breeding steps the run performed.
    pub fn generations(&self) -> usize {
        self.statistics.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        codec::{Codec, SearchDomain},
        objective::{score_population, Objective},
        population::Population,
    };

    fn best(fitness: f64, generation: usize) -> BestIndividual {
        BestIndividual {
            fitness,
            solution: vec![fitness],
            value: 1.0 / fitness - 1.0,
            generation,
            solved_generation: None,
        }
    }

    #[test]
    fn test_generation_stats() {
        let stats = GenerationStats::from_fitness(4, &[0.25, 1.0, 0.5, 0.25]).unwrap();

        assert_eq!(stats.generation, 4);
        assert_eq!(stats.max_fitness, 1.0);
        assert_eq!(stats.min_fitness, 0.25);
        assert_eq!(stats.mean_fitness, 0.5);
        assert_eq!(
            GenerationStats::from_fitness(0, &[]),
            Err(GeneticError::EmptyPopulation)
        );
    }

    #[test]
    fn test_improve_requires_strictly_better_fitness() {
        let first = best(0.5, 0);

        let tied = first.clone().improve(best(0.5, 3));
        assert_eq!(tied.generation(), 0);

        let worse = first.clone().improve(best(0.4, 3));
        assert_eq!(worse.generation(), 0);

        let better = first.improve(best(0.6, 3));
        assert_eq!(better.generation(), 3);
        assert_eq!(better.fitness(), 0.6);
    }

    #[test]
    fn test_solved_marker_is_sticky() {
        let mut first = best(0.5, 0);
        first.mark_solved(2);
        first.mark_solved(5);
        assert_eq!(first.solved_generation(), Some(2));

        let replaced = first.improve(best(0.9, 6));
        assert!(replaced.solved());
        assert_eq!(replaced.solved_generation(), Some(2));
    }

    #[test]
    fn test_from_evaluation_takes_first_best_row() {
        let domain = SearchDomain::new(-10.0, 10.0, 0.01).unwrap();
        let codec = Codec::new(domain, 1).unwrap();
        let near_zero = codec.encode(&[0.0]).unwrap();
        let far = codec.encode(&[7.0]).unwrap();
        let population = Population::from_rows(&[far, near_zero.clone(), near_zero]).unwrap();

        let evaluation = score_population(&codec, &Objective::Absolute, &population).unwrap();
        let best = BestIndividual::from_evaluation(&evaluation, &Objective::Absolute, 1).unwrap();

        assert_eq!(best.solution(), evaluation.decoded()[1].as_slice());
        assert_eq!(best.fitness(), evaluation.fitness()[1]);
        assert!(best.value() < 0.01);
        assert_eq!(best.generation(), 1);
        assert!(!best.solved());
    }

    #[test]
    fn test_display_summary() {
        let mut record = BestIndividual {
            fitness: 0.5,
            solution: vec![0.25, -1.5],
            value: 1.0,
            generation: 2,
            solved_generation: None,
        };
        assert_eq!(
            record.to_string(),
            "Solution not found.\nx_0: 0.25\nx_1: -1.5\nf(x): 1"
        );

        record.mark_solved(3);
        assert_eq!(
            record.to_string(),
            "Solution found.\nGeneration: 3\nx_0: 0.25\nx_1: -1.5\nf(x): 1"
        );
    }
}
