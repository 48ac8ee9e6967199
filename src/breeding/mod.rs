//! # Breeding
//!
//! The variation operators of the algorithm and the strategy that strings
//! them together into one generation.
pub mod crossover;
pub mod generational;
pub mod mutation;

pub use crossover::Crossover;
pub use generational::GenerationalStrategy;
pub use mutation::Mutation;
