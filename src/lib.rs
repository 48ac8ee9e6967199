//! # bitga
//!
//! A binary-encoded genetic algorithm that minimizes one of four benchmark
//! functions over a bounded one- or two-dimensional real domain.
//!
//! ```rust
//! use bitga::evolution::{EvolutionLauncher, EvolutionOptions};
//! use bitga::objective::Objective;
//!
//! let options = EvolutionOptions::builder()
//!     .objective(Objective::Absolute)
//!     .population_size(40)
//!     .num_generations(30)
//!     .seed(1)
//!     .build()
//!     .unwrap();
//!
//! let result = EvolutionLauncher::new(options).unwrap().run().unwrap();
//! assert_eq!(result.statistics.len(), 31);
//! ```
pub mod breeding;
pub mod codec;
pub mod error;
pub mod evolution;
pub mod objective;
pub mod population;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{EvolutionLauncher, EvolutionOptions, EvolutionResult};
pub use objective::Objective;
