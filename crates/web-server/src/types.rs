// In crates/web-server/src/types.rs

use core_types::Signal;
use serde::{Deserialize, Serialize};

/// The query parameters of a signal request (e.g., `?exchange=coinbasepro&pair=BTC-EUR&period=30m`).
///
/// Missing parameters are treated as empty strings and rejected further down.
#[derive(Debug, Deserialize, Default)]
pub struct SignalParams {
    #[serde(default)]
    pub exchange: String,
    #[serde(default)]
    pub pair: String,
    #[serde(default)]
    pub period: String,
}

/// The JSON body returned by `GET /api/signal`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SignalResponse {
    pub exchange: String,
    pub pair: String,
    pub period: String,
    pub signal: Signal,
}
