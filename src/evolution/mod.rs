pub mod challenge;
pub mod config;
pub mod launcher;
pub mod options;
pub mod stats;

pub use challenge::Challenge;
pub use config::RawConfiguration;
pub use launcher::{Evolution, EvolutionLauncher, Phase};
pub use options::{EvolutionOptions, EvolutionOptionsBuilder, LogLevel};
pub use stats::{BestIndividual, EvolutionResult, GenerationStats};
