use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use prism_core::HttpError;

pub type Result<T> = std::result::Result<T, RembgError>;

/// Background removal errors with appropriate HTTP status codes
#[derive(Debug, Error)]
pub enum RembgError {
    /// Invalid request parameters
    #[error("{0}")]
    InvalidRequest(String),

    /// The requested provider has no credentials in configuration
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// Upstream provider returned an error
    #[error("{0}")]
    Upstream(String),

    /// Request failed before a response arrived
    #[error("Failed to reach {provider}: {message}")]
    Connection {
        provider: &'static str,
        message: String,
    },
}

impl HttpError for RembgError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotConfigured(_) | Self::Upstream(_) | Self::Connection { .. } => {
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

impl IntoResponse for RembgError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.client_message(),
        };

        (status, Json(body)).into_response()
    }
}
