//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct is the validated, immutable configuration of
//! one run: which benchmark to optimize, how the search domain is encoded,
//! how large the population is, how many generations to run, and which
//! operator variant (with its parameters) to use for selection, crossover,
//! mutation and elitism.
//!
//! ## Example
//!
//! ```rust
//! use bitga::breeding::{Crossover, Mutation};
//! use bitga::evolution::options::{EvolutionOptions, LogLevel};
//! use bitga::objective::Objective;
//! use bitga::selection::{Elitism, Selection};
//!
//! let options = EvolutionOptions::builder()
//!     .objective(Objective::Rastrigin)
//!     .population_size(60)
//!     .num_generations(40)
//!     .search_domain(-16.0, 16.0, 0.01)
//!     .selection(Selection::tournament(3).unwrap())
//!     .crossover(Crossover::TwoPoint)
//!     .mutation(Mutation::Medium)
//!     .elitism(Elitism::enabled(2).unwrap())
//!     .log_level(LogLevel::Minimal)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.codec().unwrap().chromosome_length(), 24);
//! ```
//!
//! ## Validation
//!
//! `EvolutionOptionsBuilder::build` rejects, as configuration errors:
//!
//! - a zero population size
//! - a degenerate search domain (see [`SearchDomain::new`])
//! - a tournament larger than the population
//! - an elite that leaves no room for offspring
//! - a chromosome too short for the crossover variant
//! - an explicit mutation probability outside `[0, 1]`

use crate::{
    breeding::{Crossover, GenerationalStrategy, Mutation},
    codec::{Codec, SearchDomain},
    error::{GeneticError, Result},
    objective::Objective,
    selection::{Elitism, Selection},
};

use super::Challenge;

const DEFAULT_PRECISION: f64 = 0.01;

/// How much a run reports through `tracing`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Per-generation statistics plus the best individual at debug level.
    Verbose,
    /// One event per generation.
    Minimal,
    #[default]
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    objective: Objective,
    population_size: usize,
    num_generations: usize,
    search_domain: SearchDomain,
    selection: Selection,
    crossover: Crossover,
    mutation: Mutation,
    elitism: Elitism,
    log_level: LogLevel,
    seed: Option<u64>,
}

impl EvolutionOptions {
    /// Returns a builder for creating an `EvolutionOptions` instance.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }

    pub fn get_objective(&self) -> Objective {
        self.objective
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_num_generations(&self) -> usize {
        self.num_generations
    }

    pub fn get_search_domain(&self) -> &SearchDomain {
        &self.search_domain
    }

    pub fn get_selection(&self) -> &Selection {
        &self.selection
    }

    pub fn get_crossover(&self) -> &Crossover {
        &self.crossover
    }

    pub fn get_mutation(&self) -> &Mutation {
        &self.mutation
    }

    pub fn get_elitism(&self) -> &Elitism {
        &self.elitism
    }

    pub fn get_log_level(&self) -> &LogLevel {
        &self.log_level
    }

    /// Seed of the run's random number generator, if the run is meant to be reproducible.
    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    /// Sets the log level.
    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    /// Sets or clears the seed.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    /// The genotype layout implied by the objective and the search domain.
    pub fn codec(&self) -> Result<Codec> {
        Codec::new(self.search_domain, self.objective.dimensions())
    }

    /// The operator set applied every generation.
    pub fn strategy(&self) -> GenerationalStrategy {
        GenerationalStrategy::new(self.selection, self.crossover, self.mutation, self.elitism)
    }

    /// Checks every cross-field constraint `EvolutionOptionsBuilder::build` enforces.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }

        let codec = self.codec()?;
        if codec.chromosome_length() < self.crossover.min_chromosome_length() {
            return Err(GeneticError::Configuration(format!(
                "{} crossover needs chromosomes of at least {} bits, the search domain yields {}",
                self.crossover,
                self.crossover.min_chromosome_length(),
                codec.chromosome_length()
            )));
        }

        if let Selection::Tournament(tournament) = self.selection {
            if tournament.tournament_size() > self.population_size {
                return Err(GeneticError::Configuration(format!(
                    "Tournament size ({}) exceeds population size ({})",
                    tournament.tournament_size(),
                    self.population_size
                )));
            }
        }

        if self.elitism.size() >= self.population_size {
            return Err(GeneticError::Configuration(format!(
                "Elite size ({}) must be smaller than population size ({})",
                self.elitism.size(),
                self.population_size
            )));
        }

        if let Mutation::ByValue(p) = self.mutation {
            Mutation::by_value(p)?;
        }

        Ok(())
    }
}

/// Builder for `EvolutionOptions`.
///
/// Provides a fluent interface for constructing `EvolutionOptions` instances.
/// Unset fields fall back to: function 1, 100 individuals, 100 generations,
/// the objective's reference domain at precision 0.01, tournament selection
/// of size 2, one-point crossover, medium mutation, no elitism, no logging
/// and an entropy-seeded generator.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    objective: Option<Objective>,
    population_size: Option<usize>,
    num_generations: Option<usize>,
    search_domain: Option<(f64, f64, f64)>,
    selection: Option<Selection>,
    crossover: Option<Crossover>,
    mutation: Option<Mutation>,
    elitism: Option<Elitism>,
    log_level: Option<LogLevel>,
    seed: Option<u64>,
}

impl EvolutionOptionsBuilder {
    /// Sets the benchmark function.
    pub fn objective(mut self, value: Objective) -> Self {
        self.objective = Some(value);
        self
    }

    /// Sets the population size.
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    /// Sets the number of generations.
    pub fn num_generations(mut self, value: usize) -> Self {
        self.num_generations = Some(value);
        self
    }

    /// Sets the search domain shared by every dimension.
    pub fn search_domain(mut self, lower_bound: f64, upper_bound: f64, precision: f64) -> Self {
        self.search_domain = Some((lower_bound, upper_bound, precision));
        self
    }

    pub fn selection(mut self, value: Selection) -> Self {
        self.selection = Some(value);
        self
    }

    pub fn crossover(mut self, value: Crossover) -> Self {
        self.crossover = Some(value);
        self
    }

    pub fn mutation(mut self, value: Mutation) -> Self {
        self.mutation = Some(value);
        self
    }

    pub fn elitism(mut self, value: Elitism) -> Self {
        self.elitism = Some(value);
        self
    }

    /// Sets the log level.
    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    /// Seeds the run's random number generator.
    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    /// Builds and validates the `EvolutionOptions` instance.
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` for any invalid combination of settings.
    pub fn build(self) -> Result<EvolutionOptions> {
        let objective = self.objective.unwrap_or(Objective::Absolute);
        let (lower_bound, upper_bound, precision) = self.search_domain.unwrap_or_else(|| {
            let (lower, upper) = objective.reference_domain();
            (lower, upper, DEFAULT_PRECISION)
        });

        let options = EvolutionOptions {
            objective,
            population_size: self.population_size.unwrap_or(100),
            num_generations: self.num_generations.unwrap_or(100),
            search_domain: SearchDomain::new(lower_bound, upper_bound, precision)?,
            selection: self.selection.unwrap_or_default(),
            crossover: self.crossover.unwrap_or(Crossover::OnePoint),
            mutation: self.mutation.unwrap_or(Mutation::Medium),
            elitism: self.elitism.unwrap_or_default(),
            log_level: self.log_level.unwrap_or_default(),
            seed: self.seed,
        };

        options.validate()?;
        Ok(options)
    }
}
