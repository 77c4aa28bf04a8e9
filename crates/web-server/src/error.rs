// In crates/web-server/src/error.rs

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    InvalidPeriod(#[from] core_types::Error),

    #[error(transparent)]
    Upstream(#[from] api_client::Error),

    #[error("Insufficient data available for the requested time range")]
    InsufficientData { received: usize, required: usize },

    #[error("Failed to bind server address: {0}")]
    ServerBindError(std::io::Error),

    #[error("Server error: {0}")]
    ServeError(std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidPeriod(_) | Error::Upstream(_) => {
                tracing::warn!(error = %self, "Rejecting signal request.");
                (StatusCode::BAD_REQUEST, format!("Error: {self}")).into_response()
            }
            Error::InsufficientData { received, required } => {
                tracing::warn!(received, required, "Not enough candles to assess a crossover.");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
            Error::ServerBindError(_) | Error::ServeError(_) => {
                tracing::error!(error = %self, "Internal server error.");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
        }
    }
}
