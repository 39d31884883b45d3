use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::RemovalBackend;
use crate::{
    error::{RembgError, Result},
    types::{BirefnetModel, RemovalOptions},
};

/// Default fal.ai synchronous endpoint base
const DEFAULT_BASE_URL: &str = "https://fal.run";

/// Operating resolution used by the original pipeline
const OPERATING_RESOLUTION: &str = "1024x1024";

/// Common fal.ai success envelope for single-image models
#[derive(Deserialize)]
struct FalImageResponse {
    image: FalImage,
}

#[derive(Deserialize)]
struct FalImage {
    url: String,
}

async fn post_fal(
    client: &Client,
    api_key: &SecretString,
    url: &str,
    body: &impl Serialize,
) -> Result<String> {
    let response = client
        .post(url)
        .header("Authorization", format!("Key {}", api_key.expose_secret()))
        .json(body)
        .send()
        .await
        .map_err(|e| RembgError::Connection {
            provider: "fal",
            message: e.to_string(),
        })?;

    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| format!("fal error {status}"));

        tracing::error!(%status, "fal removal API error");

        return Err(RembgError::Upstream(error_text));
    }

    let wire_response: FalImageResponse = response
        .json()
        .await
        .map_err(|e| RembgError::Upstream(format!("invalid fal response: {e}")))?;

    Ok(wire_response.image.url)
}

/// fal.ai BiRefNet v2 adapter
pub(crate) struct BiRefNetRemoval {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

impl BiRefNetRemoval {
    pub fn new(client: Client, api_key: SecretString, base_url: Option<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

#[derive(Serialize)]
struct BiRefNetRequest<'a> {
    image_url: &'a str,
    model: BirefnetModel,
    operating_resolution: &'static str,
    output_format: &'static str,
}

#[async_trait]
impl RemovalBackend for BiRefNetRemoval {
    async fn remove(&self, image_url: &str, options: &RemovalOptions) -> Result<String> {
        let url = format!(
            "{}/fal-ai/birefnet",
            self.base_url.trim_end_matches('/')
        );

        let wire_request = BiRefNetRequest {
            image_url,
            model: options.birefnet_model.unwrap_or_default(),
            operating_resolution: OPERATING_RESOLUTION,
            output_format: "png",
        };

        tracing::debug!(model = ?wire_request.model, "sending birefnet removal request");

        post_fal(&self.client, &self.api_key, &url, &wire_request).await
    }
}

/// fal.ai hosted BRIA RMBG-2.0 adapter
pub(crate) struct FalBriaRemoval {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

impl FalBriaRemoval {
    pub fn new(client: Client, api_key: SecretString, base_url: Option<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

#[derive(Serialize)]
struct FalBriaRequest<'a> {
    image_url: &'a str,
}

#[async_trait]
impl RemovalBackend for FalBriaRemoval {
    async fn remove(&self, image_url: &str, _options: &RemovalOptions) -> Result<String> {
        let url = format!(
            "{}/fal-ai/bria/rmbg",
            self.base_url.trim_end_matches('/')
        );

        tracing::debug!("sending fal bria removal request");

        post_fal(&self.client, &self.api_key, &url, &FalBriaRequest { image_url }).await
    }
}
