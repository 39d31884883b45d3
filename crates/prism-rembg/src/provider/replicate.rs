use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::RemovalBackend;
use crate::{
    error::{RembgError, Result},
    types::RemovalOptions,
};

/// Default Replicate API base
const DEFAULT_BASE_URL: &str = "https://api.replicate.com/v1";

/// Model identifier for background removal
const MODEL: &str = "cjwbw/rembg";

/// Replicate rembg adapter
pub(crate) struct ReplicateRemoval {
    client: Client,
    api_token: SecretString,
    base_url: String,
}

impl ReplicateRemoval {
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
}

#[derive(Deserialize)]
struct ReplicatePrediction {
    output: Option<Value>,
    error: Option<String>,
}

#[async_trait]
impl RemovalBackend for ReplicateRemoval {
    async fn remove(&self, image_url: &str, _options: &RemovalOptions) -> Result<String> {
        let url = format!(
            "{}/models/{MODEL}/predictions",
            self.base_url.trim_end_matches('/')
        );

        let wire_request = ReplicateRequest {
            input: ReplicateInput { image: image_url },
        };

        tracing::debug!(model = MODEL, "sending replicate removal request");

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
            .map_err(|e| RembgError::Connection {
                provider: "replicate",
                message: e.to_string(),
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| format!("Replicate error {status}"));

            tracing::error!(%status, "replicate removal API error");

            return Err(RembgError::Upstream(error_text));
        }

        let prediction: ReplicatePrediction = response
            .json()
            .await
            .map_err(|e| RembgError::Upstream(format!("invalid Replicate response: {e}")))?;

        if let Some(message) = prediction.error {
            return Err(RembgError::Upstream(message));
        }

        match prediction.output {
            Some(Value::String(result_url)) => Ok(result_url),
            Some(Value::Array(items)) => items
                .first()
                .and_then(Value::as_str)
                .map(ToOwned::to_owned)
                .ok_or_else(|| {
                    RembgError::Upstream("Unexpected Replicate rembg response format".to_string())
                }),
            _ => Err(RembgError::Upstream(
                "Unexpected Replicate rembg response format".to_string(),
            )),
        }
    }
}
