use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use prism_core::{ImageRef, to_png_data_uri};

use super::GenerationBackend;
use crate::{
    error::{ImageGenError, Result},
    types::GenerateRequest,
};

/// Default Hugging Face inference router base
const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/hf-inference";

/// Model identifier for generation
const MODEL: &str = "black-forest-labs/FLUX.1-dev";

/// Inference steps used by the original pipeline
const NUM_INFERENCE_STEPS: u32 = 28;

/// Hugging Face generation adapter (FLUX.1-dev)
///
/// The inference API returns raw image bytes, which are re-encoded as
/// a data URI so the caller sees the same shape as URL-returning
/// providers. Aspect ratio, resolution, and image count are not
/// supported by this endpoint and are ignored.
pub(crate) struct HuggingFaceGeneration {
    client: Client,
    token: SecretString,
    base_url: String,
}

impl HuggingFaceGeneration {
    pub fn new(client: Client, token: SecretString, base_url: Option<String>) -> Self {
        Self {
            client,
            token,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

#[derive(Serialize)]
struct HfRequest<'a> {
    inputs: &'a str,
    parameters: HfParameters,
}

#[derive(Serialize)]
struct HfParameters {
    num_inference_steps: u32,
}

#[async_trait]
impl GenerationBackend for HuggingFaceGeneration {
    async fn generate(&self, request: &GenerateRequest) -> Result<Vec<ImageRef>> {
        let url = format!("{}/models/{MODEL}", self.base_url.trim_end_matches('/'));

        let wire_request = HfRequest {
            inputs: request.prompt.trim(),
            parameters: HfParameters {
                num_inference_steps: NUM_INFERENCE_STEPS,
            },
        };

        tracing::debug!(model = MODEL, "sending huggingface generation request");

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.token.expose_secret()),
            )
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| ImageGenError::Connection {
                provider: "huggingface",
                message: e.to_string(),
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| format!("Hugging Face error {status}"));

            tracing::error!(%status, "huggingface generation API error");

            return Err(ImageGenError::Upstream(error_text));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ImageGenError::Upstream(format!("invalid Hugging Face response: {e}")))?;

        Ok(vec![ImageRef {
            url: to_png_data_uri(&bytes),
            width: 0,
            height: 0,
        }])
    }
}
