use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use prism_core::strip_data_uri_prefix;

use super::RemovalBackend;
use crate::{
    error::{RembgError, Result},
    types::RemovalOptions,
};

/// Default Bria engine base
const DEFAULT_BASE_URL: &str = "https://engine.prod.bria-api.com/v2";

/// Bria direct RMBG-2.0 adapter
///
/// Bria wants raw base64 without the data-URI prefix; plain URLs pass
/// through untouched.
pub(crate) struct BriaRemoval {
    client: Client,
    api_token: SecretString,
    base_url: String,
}

impl BriaRemoval {
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
impl RemovalBackend for BriaRemoval {
    async fn remove(&self, image_url: &str, _options: &RemovalOptions) -> Result<String> {
        let url = format!(
            "{}/image/edit/remove_background",
            self.base_url.trim_end_matches('/')
        );

        let wire_request = BriaRequest {
            image: strip_data_uri_prefix(image_url),
            sync: true,
        };

        tracing::debug!("sending bria removal request");

        let response = self
            .client
            .post(&url)
            .header("api_token", self.api_token.expose_secret())
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| RembgError::Connection {
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

            tracing::error!(%status, "bria removal API error");

            return Err(RembgError::Upstream(message));
        }

        let wire_response: BriaResponse = response
            .json()
            .await
            .map_err(|e| RembgError::Upstream(format!("invalid Bria response: {e}")))?;

        wire_response
            .result
            .and_then(|result| result.image_url)
            .filter(|result_url| !result_url.is_empty())
            .ok_or_else(|| RembgError::Upstream("No image URL in Bria response".to_string()))
    }
}
