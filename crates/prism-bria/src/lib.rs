#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod server;
mod types;

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};
use serde::Serialize;
use serde_json::Value;

pub use error::{BriaError, Result};
pub use server::{BriaServerBuilder, Server};
pub use types::{ACTION_PATHS, BriaToolRequest, action_path, valid_actions};

/// Build the Bria tool proxy from configuration
pub fn build_server(config: &prism_config::Config, client: reqwest::Client) -> Arc<Server> {
    Arc::new(BriaServerBuilder::new(config, client).build())
}

/// Create the endpoint router for the Bria tool proxy
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new().route("/api/bria", post(bria_tool))
}

#[derive(Debug, Serialize)]
struct BriaToolResponse {
    result: Value,
    action: String,
}

/// Forward a tool request to the matching Bria endpoint
async fn bria_tool(
    State(server): State<Arc<Server>>,
    Json(request): Json<BriaToolRequest>,
) -> Result<Json<BriaToolResponse>> {
    tracing::debug!(action = ?request.action, "bria tool handler called");

    let action = request.action;
    let result = server.call(action.as_deref(), request.params).await?;

    Ok(Json(BriaToolResponse {
        result,
        // call() rejects missing actions, so this is always present here
        action: action.unwrap_or_default(),
    }))
}
