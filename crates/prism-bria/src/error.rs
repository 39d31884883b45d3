use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use prism_core::HttpError;

pub type Result<T> = std::result::Result<T, BriaError>;

/// Bria proxy errors with appropriate HTTP status codes
#[derive(Debug, Error)]
pub enum BriaError {
    /// Invalid request parameters
    #[error("{0}")]
    InvalidRequest(String),

    /// Bria credentials are missing from configuration
    #[error("Bria is not configured")]
    NotConfigured,

    /// Bria returned an error
    #[error("{0}")]
    Upstream(String),

    /// Request failed before a response arrived
    #[error("Failed to reach Bria: {0}")]
    Connection(String),
}

impl HttpError for BriaError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotConfigured | Self::Upstream(_) | Self::Connection(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for BriaError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.client_message(),
        };

        (status, Json(body)).into_response()
    }
}
