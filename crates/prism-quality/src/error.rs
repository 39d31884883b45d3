use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use prism_core::HttpError;

pub type Result<T> = std::result::Result<T, QualityError>;

/// Quality check errors with appropriate HTTP status codes
#[derive(Debug, Error)]
pub enum QualityError {
    /// Invalid request parameters
    #[error("{0}")]
    InvalidRequest(String),

    /// One of the two images could not be fetched
    #[error("{0}")]
    Fetch(String),

    /// One of the two images could not be decoded
    #[error("{0}")]
    Decode(String),

    /// The blocking decode task was aborted
    #[error("Quality check failed")]
    TaskFailed,
}

impl HttpError for QualityError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Fetch(_) | Self::Decode(_) | Self::TaskFailed => {
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

impl IntoResponse for QualityError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.client_message(),
        };

        (status, Json(body)).into_response()
    }
}
