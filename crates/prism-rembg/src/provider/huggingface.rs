use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use prism_core::{fetch_image_bytes, to_png_data_uri};

use super::RemovalBackend;
use crate::{
    error::{RembgError, Result},
    types::RemovalOptions,
};

/// Default Hugging Face inference router base
const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/hf-inference";

/// Model identifier for background removal
const MODEL: &str = "briaai/RMBG-2.0";

/// Hugging Face RMBG-2.0 adapter
///
/// The segmentation endpoint takes raw image bytes, so the source is
/// fetched (or decoded from a data URI) first. The raw result bytes
/// come back as a data URI.
pub(crate) struct HuggingFaceRemoval {
    client: Client,
    token: SecretString,
    base_url: String,
}

impl HuggingFaceRemoval {
    pub fn new(client: Client, token: SecretString, base_url: Option<String>) -> Self {
        Self {
            client,
            token,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

#[async_trait]
impl RemovalBackend for HuggingFaceRemoval {
    async fn remove(&self, image_url: &str, _options: &RemovalOptions) -> Result<String> {
        let source = fetch_image_bytes(&self.client, image_url)
            .await
            .map_err(|e| RembgError::Upstream(format!("Failed to fetch source image: {e}")))?;

        let url = format!("{}/models/{MODEL}", self.base_url.trim_end_matches('/'));

        tracing::debug!(model = MODEL, "sending huggingface removal request");

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.token.expose_secret()),
            )
            .header("Content-Type", "application/octet-stream")
            .body(source)
            .send()
            .await
            .map_err(|e| RembgError::Connection {
                provider: "huggingface",
                message: e.to_string(),
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| format!("Hugging Face error {status}"));

            tracing::error!(%status, "huggingface removal API error");

            return Err(RembgError::Upstream(error_text));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RembgError::Upstream(format!("invalid Hugging Face response: {e}")))?;

        Ok(to_png_data_uri(&bytes))
    }
}
