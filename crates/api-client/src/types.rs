// In crates/api-client/src/types.rs

use reqwest::Client;

/// The client for the candle ticker API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// The persistent HTTP client.
    pub http_client: Client,
    /// The base URL for the ticker API, without a trailing slash.
    pub base_url: String,
}

/// The time range and interval of a candle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandleRange {
    /// Unix seconds of the oldest candle requested.
    pub start: i64,
    /// Unix seconds of the newest candle requested.
    pub end: i64,
}
