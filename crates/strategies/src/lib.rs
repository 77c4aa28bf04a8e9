// In crates/strategies/src/lib.rs

pub mod error;
pub mod price_series;
pub mod sma_crossover;
pub mod types;

pub use core_types::Signal;
pub use error::{Error, Result};
pub use price_series::{MIN_PRICE_DATA_LENGTH, PriceSeries};
pub use sma_crossover::SmaCrossover;
pub use types::SmaCrossoverSettings;

/// Anything that can produce a simple moving average over its own history.
///
/// `sma(n, offset)` averages the `n` values that end `offset` steps before the
/// most recent one, so `offset = 1` is "the average as of one period ago".
/// Implementors are not required to bounds check: callers must confirm
/// `is_valid()` first and only ask for windows that fit.
pub trait SmaSource {
    fn sma(&self, n: usize, offset: usize) -> f64;

    fn is_valid(&self) -> bool;
}
