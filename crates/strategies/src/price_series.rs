// In crates/strategies/src/price_series.rs

use crate::SmaSource;
use core_types::Candle;

/// The minimum number of closes needed to sample the default SMA(55).
pub const MIN_PRICE_DATA_LENGTH: usize = 55;

/// An immutable series of closing prices, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    closes: Vec<f64>,
    min_len: usize,
}

impl PriceSeries {
    /// Creates a series that is valid once it holds `MIN_PRICE_DATA_LENGTH` closes.
    pub fn new(closes: Vec<f64>) -> Self {
        Self {
            closes,
            min_len: MIN_PRICE_DATA_LENGTH,
        }
    }

    /// Builds a series from upstream candles, keeping only the closing prices.
    pub fn from_candles(candles: &[Candle]) -> Self {
        Self::new(candles.iter().map(|c| c.close).collect())
    }

    /// Overrides the length threshold used by `is_valid`.
    ///
    /// This should be the longest lookback the consuming engine will sample.
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }
}

impl SmaSource for PriceSeries {
    /// Mean of `closes[len - n - offset .. len - offset]`.
    ///
    /// Panics if the window reaches past the start of the series.
    fn sma(&self, n: usize, offset: usize) -> f64 {
        let end = self.closes.len() - offset;
        let start = end - n;

        let sum: f64 = self.closes[start..end].iter().sum();
        sum / n as f64
    }

    fn is_valid(&self) -> bool {
        self.closes.len() >= self.min_len
    }
}
