use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{UpscaleBackend, UpscaleOutcome};
use crate::error::{Result, UpscaleError};

/// Default Replicate API base
const DEFAULT_BASE_URL: &str = "https://api.replicate.com/v1";

/// Model identifier for upscaling
const MODEL: &str = "nightmareai/real-esrgan";

/// Replicate Real-ESRGAN adapter
pub(crate) struct ReplicateUpscale {
    client: Client,
    api_token: SecretString,
    base_url: String,
}

impl ReplicateUpscale {
    pub fn new(client: Client, api_token: SecretString, base_url: Option<String>) -> Self {
        Self {
            client,
            api_token,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ReplicateRequest<'a> {
    input: ReplicateInput<'a>,
}

#[derive(Serialize)]
struct ReplicateInput<'a> {
    image: &'a str,
    scale: u32,
    face_enhance: bool,
}

#[derive(Deserialize)]
struct ReplicatePrediction {
    output: Option<Value>,
    error: Option<String>,
}

#[async_trait]
impl UpscaleBackend for ReplicateUpscale {
    async fn upscale(
        &self,
        image_url: &str,
        scale: u32,
        face_enhance: bool,
    ) -> Result<UpscaleOutcome> {
        let url = format!(
            "{}/models/{MODEL}/predictions",
            self.base_url.trim_end_matches('/')
        );

        let wire_request = ReplicateRequest {
            input: ReplicateInput {
                image: image_url,
                scale,
                face_enhance,
            },
        };

        tracing::debug!(model = MODEL, "sending replicate upscale request");

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_token.expose_secret()),
            )
            .header("Prefer", "wait")
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| UpscaleError::Connection {
                provider: "replicate",
                message: e.to_string(),
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| format!("Replicate error {status}"));

            tracing::error!(%status, "replicate upscale API error");

            return Err(UpscaleError::Upstream(error_text));
        }

        let prediction: ReplicatePrediction = response
            .json()
            .await
            .map_err(|e| UpscaleError::Upstream(format!("invalid Replicate response: {e}")))?;

        if let Some(message) = prediction.error {
            return Err(UpscaleError::Upstream(message));
        }

        let result_url = match prediction.output {
            Some(Value::String(result_url)) => result_url,
            Some(Value::Array(items)) => items
                .first()
                .and_then(Value::as_str)
                .map(ToOwned::to_owned)
                .ok_or_else(|| {
                    UpscaleError::Upstream("Unexpected Replicate ESRGAN response format".to_string())
                })?,
            _ => {
                return Err(UpscaleError::Upstream(
                    "Unexpected Replicate ESRGAN response format".to_string(),
                ));
            }
        };

        Ok(UpscaleOutcome {
            url: result_url,
            width: None,
            height: None,
        })
    }
}
