//! # Objective Evaluator
//!
//! The four benchmark functions the algorithm can be pointed at, and the
//! scoring pipeline that turns a population of chromosomes into fitness
//! scores.
//!
//! | id | function                                                   | domain    | minimum       |
//! |----|------------------------------------------------------------|-----------|---------------|
//! | 1  | `abs(x)`                                                   | [-10, 10] | f(0) = 0      |
//! | 2  | `-10 cos(x) + abs(0.001 x)`                                | [-10, 10] | f(0) = -10    |
//! | 3  | `0.1 x1^2 + 0.1 x2^2 - 4 cos(0.8 x1) - 4 cos(0.8 x2) + 8`  | [-16, 16] | f(0, 0) = 0   |
//! | 4  | `100 (x1 - x0^2)^2 + (1 - x0)^2`                           | [-2, 2]   | f(1, 1) = 0   |
//!
//! ## Example
//!
//! ```rust
//! use bitga::evolution::Challenge;
//! use bitga::objective::Objective;
//!
//! let rosenbrock = Objective::from_id(4).unwrap();
//! assert_eq!(rosenbrock.value(&[1.0, 1.0]), 0.0);
//! assert_eq!(rosenbrock.score(&[1.0, 1.0]), 1.0);
//! ```

use std::fmt;

use crate::codec::Codec;
use crate::error::{configuration_error, GeneticError, Result};
use crate::evolution::Challenge;
use crate::population::Population;

/// One of the fixed benchmark functions.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Objective {
    /// `f(x) = |x|`
    Absolute,
    /// `f(x) = -10 cos(x) + |0.001 x|`
    DampedCosine,
    /// Two-dimensional Rastrigin-like bowl.
    Rastrigin,
    /// Two-dimensional Rosenbrock valley.
    Rosenbrock,
}

impl Objective {
    /// Resolves a function identifier (1 to 4).
    ///
    /// # Errors
    ///
    /// Returns a configuration error for any other identifier.
    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            1 => Ok(Self::Absolute),
            2 => Ok(Self::DampedCosine),
            3 => Ok(Self::Rastrigin),
            4 => Ok(Self::Rosenbrock),
            other => Err(configuration_error(format!(
                "Unknown function id {}, expected 1, 2, 3 or 4",
                other
            ))),
        }
    }

    pub fn id(&self) -> u8 {
        match self {
            Self::Absolute => 1,
            Self::DampedCosine => 2,
            Self::Rastrigin => 3,
            Self::Rosenbrock => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Absolute => "absolute",
            Self::DampedCosine => "damped-cosine",
            Self::Rastrigin => "rastrigin",
            Self::Rosenbrock => "rosenbrock",
        }
    }

    /// The `(lower, upper)` interval the benchmark is defined over.
    pub fn reference_domain(&self) -> (f64, f64) {
        match self {
            Self::Absolute | Self::DampedCosine => (-10.0, 10.0),
            Self::Rastrigin => (-16.0, 16.0),
            Self::Rosenbrock => (-2.0, 2.0),
        }
    }

    /// Coordinate of the optimum, identical in every dimension.
    pub fn optimum_coordinate(&self) -> f64 {
        match self {
            Self::Rosenbrock => 1.0,
            _ => 0.0,
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (function {})", self.name(), self.id())
    }
}

impl Challenge for Objective {
    fn dimensions(&self) -> usize {
        match self {
            Self::Absolute | Self::DampedCosine => 1,
            Self::Rastrigin | Self::Rosenbrock => 2,
        }
    }

    fn value(&self, x: &[f64]) -> f64 {
        match self {
            Self::Absolute => x[0].abs(),
            Self::DampedCosine => -10.0 * x[0].cos() + (0.001 * x[0]).abs(),
            Self::Rastrigin => {
                0.1 * x[0].powi(2) + 0.1 * x[1].powi(2) - 4.0 * (0.8 * x[0]).cos()
                    - 4.0 * (0.8 * x[1]).cos()
                    + 8.0
            }
            Self::Rosenbrock => 100.0 * (x[1] - x[0].powi(2)).powi(2) + (1.0 - x[0]).powi(2),
        }
    }

    fn minimum(&self) -> f64 {
        match self {
            Self::DampedCosine => -10.0,
            _ => 0.0,
        }
    }

    fn optimum(&self) -> Vec<f64> {
        vec![self.optimum_coordinate(); self.dimensions()]
    }
}

/// Fitness scores and decoded phenotypes of one population, aligned by row.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    fitness: Vec<f64>,
    decoded: Vec<Vec<f64>>,
}

impl Evaluation {
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    pub fn decoded(&self) -> &[Vec<f64>] {
        &self.decoded
    }

    pub fn len(&self) -> usize {
        self.fitness.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fitness.is_empty()
    }

    /// Row of the highest fitness; the first one on ties.
    pub fn best_index(&self) -> Option<usize> {
        self.fitness
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (idx, &score)| match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((idx, score)),
            })
            .map(|(idx, _)| idx)
    }
}

/// Decodes and scores every chromosome of `population`.
///
/// # Errors
///
/// Returns an error if the population is empty, if the codec and challenge
/// disagree on the number of dimensions, or if any fitness is not finite.
pub fn score_population<C>(codec: &Codec, challenge: &C, population: &Population) -> Result<Evaluation>
where
    C: Challenge + ?Sized,
{
    if population.is_empty() {
        return Err(GeneticError::EmptyPopulation);
    }
    if codec.dimensions() != challenge.dimensions() {
        return Err(configuration_error(format!(
            "Codec encodes {} dimension(s) but the challenge expects {}",
            codec.dimensions(),
            challenge.dimensions()
        )));
    }

    let decoded = codec.decode(population)?;
    let fitness = decoded
        .iter()
        .map(|x| {
            let score = challenge.score(x);
            if score.is_finite() {
                Ok(score)
            } else {
                Err(GeneticError::FitnessCalculation(format!(
                    "Non-finite fitness score {} at {:?}",
                    score, x
                )))
            }
        })
        .collect::<Result<Vec<f64>>>()?;

    Ok(Evaluation { fitness, decoded })
}
