// In crates/api-client/src/error.rs

use core_types::Period;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to build the API client: {0}")]
    ClientBuildError(String),
    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(String),
    #[error("Cannot request {sample_size} periods of {period}: time range overflows")]
    RangeOverflow { period: Period, sample_size: usize },
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(#[from] serde_json::Error),
    #[error("Upstream returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, Error>;
