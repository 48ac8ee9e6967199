pub mod elitist;
pub mod rank;
pub mod roulette;
pub mod selection_strategy;
pub mod tournament;

pub use elitist::{ElitistSelection, Elitism};
pub use rank::RankBasedSelection;
pub use roulette::RouletteWheelSelection;
pub use selection_strategy::{Selection, SelectionStrategy};
pub use tournament::TournamentSelection;
