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

pub use error::{RembgError, Result};
pub use server::{RembgServerBuilder, Server};
pub use types::{
    BirefnetModel, RemovalOptions, RemovalProvider, RemoveBackgroundRequest,
    RemoveBackgroundResponse,
};

/// Build the removal dispatcher from configuration
pub fn build_server(config: &prism_config::Config, client: reqwest::Client) -> Arc<Server> {
    Arc::new(RembgServerBuilder::new(config, client).build())
}

/// Create the endpoint router for background removal
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new().route("/api/remove-background", post(remove_background))
}

/// Handle background removal requests
async fn remove_background(
    State(server): State<Arc<Server>>,
    Json(request): Json<RemoveBackgroundRequest>,
) -> Result<Json<RemoveBackgroundResponse>> {
    tracing::debug!(provider = ?request.provider, "removal handler called");

    let result_url = server.remove(&request).await?;

    tracing::debug!("background removal complete");

    Ok(Json(RemoveBackgroundResponse {
        result_url,
        provider: request.provider,
    }))
}
