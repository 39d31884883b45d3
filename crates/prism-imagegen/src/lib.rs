#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod provider;
mod retry;
mod server;
mod types;

use std::sync::Arc;

use axum::{Extension, Json, Router, extract::State, routing::post};
use tokio_util::sync::CancellationToken;

pub use error::{ImageGenError, Result};
pub use types::{GenerateRequest, GenerateResponse, GenerationProvider};

pub use server::{ImageGenServerBuilder, Server};

/// Build the generation dispatcher from configuration
pub fn build_server(config: &prism_config::Config, client: reqwest::Client) -> Arc<Server> {
    Arc::new(ImageGenServerBuilder::new(config, client).build())
}

/// Create the endpoint router for image generation
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new().route("/api/generate", post(generate))
}

/// Handle image generation requests
async fn generate(
    State(server): State<Arc<Server>>,
    Extension(shutdown): Extension<CancellationToken>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>> {
    tracing::debug!(provider = ?request.provider, "generation handler called");

    let images = server.dispatch(&request, &shutdown).await?;

    tracing::debug!(count = images.len(), "generation complete");

    Ok(Json(GenerateResponse { images }))
}
