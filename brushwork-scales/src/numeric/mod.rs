pub mod linear;

use std::fmt::Debug;

/// A scale with a continuous numeric domain and a continuous numeric range
pub trait ContinuousNumericScale: Debug + Clone {
    /// Returns the current domain as (start, end)
    fn domain(&self) -> (f64, f64);

    /// Returns the current range as (start, end)
    fn range(&self) -> (f64, f64);

    /// Returns whether output clamping is enabled
    fn clamp(&self) -> bool;

    /// Maps a domain value to the range
    fn scale(&self, value: f64) -> f64;

    /// Maps a range value back to the domain
    fn invert(&self, value: f64) -> f64;

    /// Generates evenly spaced tick values within the domain
    fn ticks(&self, count: Option<f64>) -> Vec<f64>;

    fn set_domain(&mut self, domain: (f64, f64));

    fn set_range(&mut self, range: (f64, f64));

    fn set_clamp(&mut self, clamp: bool);
}
