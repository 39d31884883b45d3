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

/// Default Bria engine base
const DEFAULT_BASE_URL: &str = "https://engine.prod.bria-api.com/v2";

/// Bria FIBO generation adapter
///
/// One adapter instance serves either the full or the lite model; the
/// dispatcher registers one of each.
pub(crate) struct BriaGeneration {
    client: Client,
    api_token: SecretString,
    base_url: String,
    lite: bool,
}

impl BriaGeneration {
    pub fn new(client: Client, api_token: SecretString, base_url: Option<String>, lite: bool) -> Self {
        Self {
            client,
            api_token,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            lite,
        }
    }
}

#[derive(Serialize)]
struct BriaRequest<'a> {
    prompt: &'a str,
    aspect_ratio: &'a str,
    sync: bool,
    /// Full model only
    #[serde(skip_serializing_if = "Option::is_none")]
    resolution: Option<&'static str>,
}

#[derive(Deserialize)]
struct BriaResponse {
    result: Option<BriaResult>,
}

#[derive(Deserialize)]
struct BriaResult {
    image_url: Option<String>,
    url: Option<String>,
}

#[derive(Deserialize)]
struct BriaErrorEnvelope {
    error: Option<BriaErrorDetail>,
}

#[derive(Deserialize)]
struct BriaErrorDetail {
    message: Option<String>,
}

#[async_trait]
impl GenerationBackend for BriaGeneration {
    async fn generate(&self, request: &GenerateRequest) -> Result<Vec<ImageRef>> {
        let path = if self.lite {
            "/image/generate/lite"
        } else {
            "/image/generate"
        };
        let url = format!("{}{path}", self.base_url.trim_end_matches('/'));

        let wire_request = BriaRequest {
            prompt: request.prompt.trim(),
            aspect_ratio: &request.aspect_ratio,
            sync: true,
            resolution: (!self.lite).then_some("1MP"),
        };

        tracing::debug!(lite = self.lite, "sending bria generation request");

        let response = self
            .client
            .post(&url)
            .header("api_token", self.api_token.expose_secret())
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| ImageGenError::Connection {
                provider: "bria",
                message: e.to_string(),
            })?;

        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<BriaErrorEnvelope>()
                .await
                .ok()
                .and_then(|envelope| envelope.error.and_then(|detail| detail.message))
                .unwrap_or_else(|| format!("Bria error {}", status.as_u16()));

            tracing::error!(%status, "bria generation API error");

            return Err(ImageGenError::Upstream(message));
        }

        let wire_response: BriaResponse = response
            .json()
            .await
            .map_err(|e| ImageGenError::Upstream(format!("invalid Bria response: {e}")))?;

        let image_url = wire_response
            .result
            .and_then(|result| result.image_url.or(result.url))
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ImageGenError::Upstream("No image URL in Bria response".to_string()))?;

        Ok(vec![ImageRef {
            url: image_url,
            width: 0,
            height: 0,
        }])
    }
}
