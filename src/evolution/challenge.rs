use std::fmt::Debug;

/// Converts a raw objective value into a fitness score to be maximized.
///
/// `minimum` is the known theoretical minimum of the objective, so the
/// denominator `1 - minimum + value` never drops below 1 for values the
/// objective can actually produce.
pub fn fitness(value: f64, minimum: f64) -> f64 {
    1.0 / (1.0 - minimum + value)
}

/// A minimization problem with a known optimum, scored for the genetic
/// algorithm.
pub trait Challenge: Debug + Send + Sync {
    /// Number of real coordinates a candidate carries.
    fn dimensions(&self) -> usize;

    /// Raw objective value of a decoded candidate, in natural units.
    fn value(&self, x: &[f64]) -> f64;

    /// Theoretical minimum of [`Challenge::value`].
    fn minimum(&self) -> f64;

    /// Coordinates of the global minimum.
    fn optimum(&self) -> Vec<f64>;

    /// Strictly positive fitness, higher is better.
    fn score(&self, x: &[f64]) -> f64 {
        fitness(self.value(x), self.minimum())
    }

    /// Whether every coordinate of `x` lies within `precision` of the optimum.
    fn is_solved(&self, x: &[f64], precision: f64) -> bool {
        let optimum = self.optimum();
        x.len() == optimum.len()
            && x
                .iter()
                .zip(optimum)
                .all(|(&xi, oi)| oi - precision <= xi && xi <= oi + precision)
    }
}
