//! # Raw configuration
//!
//! A loosely typed mirror of a configuration document, with string tags for
//! the operator variants and optional operator parameters. Converting it into
//! [`EvolutionOptions`] resolves the tags and validates the whole record, so
//! an invalid configuration never reaches the launcher.
//!
//! With the `serde` feature enabled the raw types deserialize from a
//! document such as:
//!
//! ```json
//! {
//!   "function": 3,
//!   "populationSize": 60,
//!   "numberOfIterations": 40,
//!   "searchDomain": { "lowerBound": -16.0, "upperBound": 16.0, "precision": 0.01 },
//!   "selection": { "type": "tournament", "tournamentSize": 3 },
//!   "crossover": { "type": "two-point" },
//!   "mutation": { "type": "by_value", "probability": 0.05 },
//!   "elitism": { "strategy": "enabled", "size": 2 },
//!   "seed": 7
//! }
//! ```

use crate::{
    breeding::{Crossover, Mutation},
    error::{configuration_error, GeneticError, Result},
    objective::Objective,
    selection::{Elitism, Selection},
};

use super::options::EvolutionOptions;

#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct RawConfiguration {
    /// Benchmark function id, 1 to 4.
    pub function: u8,
    pub population_size: usize,
    pub number_of_iterations: usize,
    pub search_domain: RawSearchDomain,
    pub selection: RawSelection,
    pub crossover: RawCrossover,
    pub mutation: RawMutation,
    pub elitism: RawElitism,
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,
}

#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSearchDomain {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub precision: f64,
}

/// `type` is one of `proportional`, `rank` or `tournament`.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct RawSelection {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tournament_size: Option<usize>,
}

/// `type` is one of `one-point`, `two-point` or `uniform`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RawCrossover {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
}

/// `type` is one of `low`, `medium`, `high` or `by_value`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RawMutation {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub probability: Option<f64>,
}

/// `strategy` is `enabled` or `disabled`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RawElitism {
    pub strategy: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub size: Option<usize>,
}

impl TryFrom<&RawSelection> for Selection {
    type Error = GeneticError;

    fn try_from(raw: &RawSelection) -> Result<Self> {
        match raw.kind.as_str() {
            "proportional" => Ok(Selection::proportional()),
            "rank" => Ok(Selection::rank()),
            "tournament" => {
                let size = raw
                    .tournament_size
                    .ok_or_else(|| configuration_error("Tournament selection requires tournamentSize"))?;
                Selection::tournament(size)
            }
            other => Err(configuration_error(format!("Unknown selection type '{}'", other))),
        }
    }
}

impl TryFrom<&RawCrossover> for Crossover {
    type Error = GeneticError;

    fn try_from(raw: &RawCrossover) -> Result<Self> {
        match raw.kind.as_str() {
            "one-point" => Ok(Crossover::OnePoint),
            "two-point" => Ok(Crossover::TwoPoint),
            "uniform" => Ok(Crossover::Uniform),
            other => Err(configuration_error(format!("Unknown crossover type '{}'", other))),
        }
    }
}

impl TryFrom<&RawMutation> for Mutation {
    type Error = GeneticError;

    fn try_from(raw: &RawMutation) -> Result<Self> {
        match raw.kind.as_str() {
            "low" => Ok(Mutation::Low),
            "medium" => Ok(Mutation::Medium),
            "high" => Ok(Mutation::High),
            "by_value" => {
                let p = raw
                    .probability
                    .ok_or_else(|| configuration_error("by_value mutation requires probability"))?;
                Mutation::by_value(p)
            }
            other => Err(configuration_error(format!("Unknown mutation type '{}'", other))),
        }
    }
}

impl TryFrom<&RawElitism> for Elitism {
    type Error = GeneticError;

    fn try_from(raw: &RawElitism) -> Result<Self> {
        match raw.strategy.as_str() {
            "disabled" => Ok(Elitism::Disabled),
            "enabled" => {
                let size = raw
                    .size
                    .ok_or_else(|| configuration_error("Enabled elitism requires size"))?;
                Elitism::enabled(size)
            }
            other => Err(configuration_error(format!("Unknown elitism strategy '{}'", other))),
        }
    }
}

impl TryFrom<RawConfiguration> for EvolutionOptions {
    type Error = GeneticError;

    fn try_from(raw: RawConfiguration) -> Result<Self> {
        let mut builder = EvolutionOptions::builder()
            .objective(Objective::from_id(raw.function)?)
            .population_size(raw.population_size)
            .num_generations(raw.number_of_iterations)
            .search_domain(
                raw.search_domain.lower_bound,
                raw.search_domain.upper_bound,
                raw.search_domain.precision,
            )
            .selection(Selection::try_from(&raw.selection)?)
            .crossover(Crossover::try_from(&raw.crossover)?)
            .mutation(Mutation::try_from(&raw.mutation)?)
            .elitism(Elitism::try_from(&raw.elitism)?);

        if let Some(seed) = raw.seed {
            builder = builder.seed(seed);
        }

        builder.build()
    }
}
