use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use prism_core::ImageRef;

use super::GenerationBackend;
use crate::{
    error::{ImageGenError, Result},
    types::GenerateRequest,
};

/// Default fal.ai synchronous endpoint base
const DEFAULT_BASE_URL: &str = "https://fal.run";

/// Model path for generation
const MODEL_PATH: &str = "fal-ai/nano-banana-pro";

/// fal.ai generation adapter (nano-banana-pro)
pub(crate) struct FalGeneration {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

impl FalGeneration {
    pub fn new(client: Client, api_key: SecretString, base_url: Option<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

/// Wire format for the fal.ai request
#[derive(Serialize)]
struct FalRequest<'a> {
    prompt: &'a str,
    num_images: u32,
    aspect_ratio: &'a str,
    resolution: &'a str,
    output_format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
}

/// Wire format for the fal.ai response
#[derive(Deserialize)]
struct FalResponse {
    images: Vec<FalImage>,
}

#[derive(Deserialize)]
struct FalImage {
    url: String,
    width: Option<u32>,
    height: Option<u32>,
}

#[async_trait]
impl GenerationBackend for FalGeneration {
    async fn generate(&self, request: &GenerateRequest) -> Result<Vec<ImageRef>> {
        let url = format!("{}/{MODEL_PATH}", self.base_url.trim_end_matches('/'));

        let wire_request = FalRequest {
            prompt: request.prompt.trim(),
            num_images: request.clamped_num_images(),
            aspect_ratio: &request.aspect_ratio,
            resolution: &request.resolution,
            output_format: "png",
            seed: request.seed,
        };

        tracing::debug!(model = MODEL_PATH, "sending fal generation request");

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Key {}", self.api_key.expose_secret()),
            )
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| ImageGenError::Connection {
                provider: "fal",
                message: e.to_string(),
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| format!("fal error {status}"));

            tracing::error!(%status, "fal generation API error");

            return Err(ImageGenError::Upstream(error_text));
        }

        let wire_response: FalResponse = response
            .json()
            .await
            .map_err(|e| ImageGenError::Upstream(format!("invalid fal response: {e}")))?;

        Ok(wire_response
            .images
            .into_iter()
            .map(|img| ImageRef {
                url: img.url,
                width: img.width.unwrap_or(0),
                height: img.height.unwrap_or(0),
            })
            .collect())
    }
}
