#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod provider;
mod server;
mod types;

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};

pub use error::{Result, UpscaleError};
pub use server::{Server, UpscaleServerBuilder};
pub use types::{OutputSize, SizeReport, UpscaleProvider, UpscaleRequest, UpscaleResponse};

/// Build the upscale dispatcher from configuration
pub fn build_server(config: &prism_config::Config, client: reqwest::Client) -> Arc<Server> {
    Arc::new(UpscaleServerBuilder::new(config, client).build())
}

/// Create the endpoint router for upscaling
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new().route("/api/upscale", post(upscale))
}

/// Handle upscale requests
async fn upscale(
    State(server): State<Arc<Server>>,
    Json(request): Json<UpscaleRequest>,
) -> Result<Json<UpscaleResponse>> {
    tracing::debug!(provider = ?request.provider, scale = request.target_scale, "upscale handler called");

    let response = server.upscale(&request).await?;

    tracing::debug!("upscale complete");

    Ok(Json(response))
}
