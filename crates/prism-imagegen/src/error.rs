use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use prism_core::HttpError;

pub type Result<T> = std::result::Result<T, ImageGenError>;

/// Substring in an upstream error message that marks a content-safety
/// rejection
///
/// Upstream APIs expose no structured code for this, so we match the
/// free-text message. Brittle, but preserved for compatibility with
/// the providers' observed behavior.
pub(crate) const SAFETY_MARKER: &str = "safety";

/// Image generation errors with appropriate HTTP status codes
#[derive(Debug, Error)]
pub enum ImageGenError {
    /// Invalid request parameters
    #[error("{0}")]
    InvalidRequest(String),

    /// The requested provider has no credentials in configuration
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// Upstream rejected the prompt on content-safety grounds
    #[error("{0}")]
    ContentPolicy(String),

    /// Upstream provider returned an error
    #[error("{0}")]
    Upstream(String),

    /// Request failed before a response arrived
    #[error("Failed to reach {provider}: {message}")]
    Connection {
        provider: &'static str,
        message: String,
    },

    /// The server is shutting down
    #[error("request cancelled")]
    Cancelled,
}

impl ImageGenError {
    /// Classify a final dispatch error by its message
    ///
    /// A message containing the safety marker becomes a 422 content
    /// policy rejection rather than a generic upstream failure.
    pub(crate) fn classify(self) -> Self {
        match self {
            Self::Upstream(message) if message.contains(SAFETY_MARKER) => {
                Self::ContentPolicy(message)
            }
            other => other,
        }
    }
}

impl HttpError for ImageGenError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::ContentPolicy(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotConfigured(_) | Self::Upstream(_) | Self::Connection { .. } | Self::Cancelled => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

/// Flat error body shared by every route
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ImageGenError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.client_message(),
        };

        (status, Json(body)).into_response()
    }
}
