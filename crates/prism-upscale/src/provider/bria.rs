use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use prism_core::strip_data_uri_prefix;

use super::{UpscaleBackend, UpscaleOutcome};
use crate::error::{Result, UpscaleError};

/// Default Bria engine base
const DEFAULT_BASE_URL: &str = "https://engine.prod.bria-api.com/v2";

/// Bria increase_resolution adapter
pub(crate) struct BriaUpscale {
    client: Client,
    api_token: SecretString,
    base_url: String,
}

impl BriaUpscale {
    pub fn new(client: Client, api_token: SecretString, base_url: Option<String>) -> Self {
        Self {
            client,
            api_token,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

#[derive(Serialize)]
struct BriaRequest<'a> {
    image: &'a str,
    desired_increase: u32,
    sync: bool,
}

#[derive(Deserialize)]
struct BriaResponse {
    result: Option<BriaResult>,
}

#[derive(Deserialize)]
struct BriaResult {
    image_url: Option<String>,
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
impl UpscaleBackend for BriaUpscale {
    async fn upscale(
        &self,
        image_url: &str,
        scale: u32,
        _face_enhance: bool,
    ) -> Result<UpscaleOutcome> {
        let url = format!(
            "{}/image/edit/increase_resolution",
            self.base_url.trim_end_matches('/')
        );

        let wire_request = BriaRequest {
            image: strip_data_uri_prefix(image_url),
            desired_increase: scale,
            sync: true,
        };

        tracing::debug!(scale, "sending bria upscale request");

        let response = self
            .client
            .post(&url)
            .header("api_token", self.api_token.expose_secret())
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| UpscaleError::Connection {
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

            tracing::error!(%status, "bria upscale API error");

            return Err(UpscaleError::Upstream(message));
        }

        let wire_response: BriaResponse = response
            .json()
            .await
            .map_err(|e| UpscaleError::Upstream(format!("invalid Bria response: {e}")))?;

        let result_url = wire_response
            .result
            .and_then(|result| result.image_url)
            .filter(|result_url| !result_url.is_empty())
            .ok_or_else(|| UpscaleError::Upstream("No image URL in Bria response".to_string()))?;

        Ok(UpscaleOutcome {
            url: result_url,
            width: None,
            height: None,
        })
    }
}
