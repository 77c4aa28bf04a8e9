// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested candle interval is not one the upstream supports.
    #[error("Invalid period {0}")]
    InvalidPeriod(String),
}

pub type Result<T> = std::result::Result<T, Error>;
