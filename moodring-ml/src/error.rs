//! Error types for moodring-ml
//!
//! The two endpoints fail differently:
//! - `/predict-mood` reports bad input as a client error carrying the
//!   fallback label
//! - `/user-mood` never reports an error; a history it cannot use simply
//!   aggregates to "Unknown"

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use moodring_common::UNKNOWN_MOOD;
use serde_json::json;
use thiserror::Error;

/// Prediction failure
#[derive(Debug, Error)]
pub enum PredictError {
    /// Missing body, missing `features`, or unusable feature values (400)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Classifier failed on well-formed input (500)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<moodring_common::Error> for PredictError {
    fn from(err: moodring_common::Error) -> Self {
        match err {
            moodring_common::Error::InvalidInput(msg) => PredictError::InvalidRequest(msg),
            other => PredictError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        let status = match self {
            PredictError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            PredictError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "mood": UNKNOWN_MOOD }))).into_response()
    }
}

/// Result type for the predict handler
pub type PredictResult<T> = Result<T, PredictError>;

/// Why a `/user-mood` history could not be aggregated
///
/// Both variants resolve to a successful "Unknown" response.
#[derive(Debug, Error, PartialEq)]
pub enum HistoryError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Empty history")]
    EmptyInput,
}
