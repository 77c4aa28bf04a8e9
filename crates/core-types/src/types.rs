// In crates/core-types/src/types.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single candle as reported by the upstream market-data API.
///
/// Only `close` feeds the signal calculation. The remaining fields are kept so
/// the full payload survives deserialization and can be logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Candle {
    #[serde(default)]
    pub open: f64,
    #[serde(default)]
    pub high: f64,
    #[serde(default)]
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub base_volume: f64,
    #[serde(default)]
    pub quote_volume: f64,
    #[serde(default)]
    pub open_time: Option<DateTime<Utc>>,
}

impl Candle {
    /// Builds a candle carrying only a closing price.
    pub fn from_close(close: f64) -> Self {
        Self {
            open: 0.0,
            high: 0.0,
            low: 0.0,
            close,
            base_volume: 0.0,
            quote_volume: 0.0,
            open_time: None,
        }
    }
}

/// The trend signal produced by a crossover assessment.
///
/// This is a closed set: consumers never see any other value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    Neutral,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
