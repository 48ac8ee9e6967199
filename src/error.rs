//! # Error Types
//!
//! This module defines the error type shared by every part of the library.
//! Configuration problems are reported once, before a population exists;
//! the remaining variants guard the numeric pipeline of a running evolution.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use bitga::error::{GeneticError, Result};
//!
//! fn checked_population_size(size: usize) -> Result<usize> {
//!     if size == 0 {
//!         return Err(GeneticError::Configuration(
//!             "Population size cannot be zero".to_string(),
//!         ));
//!     }
//!     Ok(size)
//! }
//!
//! assert!(checked_population_size(0).is_err());
//! assert_eq!(checked_population_size(10).unwrap(), 10);
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use bitga::error::{GeneticError, OptionExt};
//!
//! fn best_fitness(fitness: &[f64]) -> bitga::error::Result<f64> {
//!     fitness
//!         .iter()
//!         .copied()
//!         .reduce(f64::max)
//!         .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//!
//! assert!(best_fitness(&[]).is_err());
//! ```

use thiserror::Error;

/// Represents errors that can occur in the genetic algorithm library.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneticError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when an evolution process is driven past its end.
    #[error("Evolution error: {0}")]
    Evolution(String),

    /// Error that occurs when a fitness calculation fails.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// Error that occurs when NaN, infinite or negative weights reach an operator.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),
}

/// A specialized Result type for genetic algorithm operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}

/// Shorthand for building a [`GeneticError::Configuration`].
pub(crate) fn configuration_error(message: impl Into<String>) -> GeneticError {
    GeneticError::Configuration(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context() {
        let err = configuration_error("Unknown function id 7");
        assert_eq!(err.to_string(), "Configuration error: Unknown function id 7");
    }

    #[test]
    fn test_option_ext() {
        let some: Option<u8> = Some(3);
        assert_eq!(some.ok_or_else_genetic(|| GeneticError::EmptyPopulation), Ok(3));

        let none: Option<u8> = None;
        assert_eq!(
            none.ok_or_else_genetic(|| GeneticError::EmptyPopulation),
            Err(GeneticError::EmptyPopulation)
        );
    }
}
