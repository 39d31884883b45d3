#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod heuristic;
mod metadata;
mod server;
mod types;

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};

pub use error::{QualityError, Result};
pub use heuristic::evaluate;
pub use server::Server;
pub use types::{ImageMeta, QualityCheckRequest, QualityVerdict, Recommendation};

/// Build the quality check service from configuration
pub fn build_server(config: &prism_config::Config, client: reqwest::Client) -> Arc<Server> {
    Arc::new(Server::new(client, config.quality.clone()))
}

/// Create the endpoint router for quality checks
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new().route("/api/quality-check", post(quality_check))
}

/// Handle quality check requests
async fn quality_check(
    State(server): State<Arc<Server>>,
    Json(request): Json<QualityCheckRequest>,
) -> Result<Json<QualityVerdict>> {
    let (Some(original_url), Some(processed_url)) = (
        request.original_image_url.filter(|url| !url.is_empty()),
        request.processed_image_url.filter(|url| !url.is_empty()),
    ) else {
        return Err(QualityError::InvalidRequest(
            "originalImageUrl and processedImageUrl are required".to_string(),
        ));
    };

    tracing::debug!("quality check handler called");

    let verdict = server.check(&original_url, &processed_url).await?;

    tracing::debug!(
        passed = verdict.passed,
        recommendation = ?verdict.recommendation,
        "quality check complete"
    );

    Ok(Json(verdict))
}
