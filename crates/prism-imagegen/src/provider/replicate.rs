use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use prism_core::ImageRef;

use super::GenerationBackend;
use crate::{
    error::{ImageGenError, Result},
    types::GenerateRequest,
};

/// Default Replicate API base
const DEFAULT_BASE_URL: &str = "https://api.replicate.com/v1";

/// Model identifier for generation
const MODEL: &str = "black-forest-labs/flux-schnell";

/// Replicate generation adapter (flux-schnell)
///
/// Uses the synchronous `Prefer: wait` mode so a single request blocks
/// until the prediction finishes.
pub(crate) struct ReplicateGeneration {
    client: Client,
    api_token: SecretString,
    base_url: String,
}

impl ReplicateGeneration {
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
    prompt: &'a str,
    num_outputs: u32,
    aspect_ratio: &'a str,
    output_format: &'static str,
}

#[derive(Deserialize)]
struct ReplicatePrediction {
    /// Either a URL string or an array of URL strings depending on the model
    output: Option<Value>,
    error: Option<String>,
}

/// Normalize a prediction output into URL strings
pub(crate) fn output_urls(output: &Value) -> Vec<String> {
    match output {
        Value::String(url) => vec![url.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(ToOwned::to_owned))
            .collect(),
        _ => Vec::new(),
    }
}

#[async_trait]
impl GenerationBackend for ReplicateGeneration {
    async fn generate(&self, request: &GenerateRequest) -> Result<Vec<ImageRef>> {
        let url = format!(
            "{}/models/{MODEL}/predictions",
            self.base_url.trim_end_matches('/')
        );

        let wire_request = ReplicateRequest {
            input: ReplicateInput {
                prompt: request.prompt.trim(),
                num_outputs: request.clamped_num_images(),
                aspect_ratio: &request.aspect_ratio,
                output_format: "png",
            },
        };

        tracing::debug!(model = MODEL, "sending replicate generation request");

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
            .map_err(|e| ImageGenError::Connection {
                provider: "replicate",
                message: e.to_string(),
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| format!("Replicate error {status}"));

            tracing::error!(%status, "replicate generation API error");

            return Err(ImageGenError::Upstream(error_text));
        }

        let prediction: ReplicatePrediction = response
            .json()
            .await
            .map_err(|e| ImageGenError::Upstream(format!("invalid Replicate response: {e}")))?;

        if let Some(message) = prediction.error {
            return Err(ImageGenError::Upstream(message));
        }

        let urls = prediction
            .output
            .as_ref()
            .map(output_urls)
            .unwrap_or_default();

        if urls.is_empty() {
            return Err(ImageGenError::Upstream(
                "Unexpected Replicate flux-schnell response format".to_string(),
            ));
        }

        // Replicate does not report dimensions
        Ok(urls
            .into_iter()
            .map(|url| ImageRef {
                url,
                width: 0,
                height: 0,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_output_yields_single_url() {
        let urls = output_urls(&json!("https://replicate.delivery/a.png"));
        assert_eq!(urls, vec!["https://replicate.delivery/a.png"]);
    }

    #[test]
    fn array_output_yields_all_urls() {
        let urls = output_urls(&json!(["https://x/1.png", "https://x/2.png"]));
        assert_eq!(urls.len(), 2);
    }

    #[test]
    fn unexpected_output_yields_nothing() {
        assert!(output_urls(&json!({"nested": true})).is_empty());
        assert!(output_urls(&json!(42)).is_empty());
    }
}
