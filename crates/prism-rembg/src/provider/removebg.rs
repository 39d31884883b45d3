use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};

use prism_core::{strip_data_uri_prefix, to_png_data_uri};

use super::RemovalBackend;
use crate::{
    error::{RembgError, Result},
    types::RemovalOptions,
};

/// Default remove.bg API base
const DEFAULT_BASE_URL: &str = "https://api.remove.bg/v1.0";

/// remove.bg adapter
///
/// Takes multipart input (decoded bytes for data URIs, a plain URL
/// otherwise) and answers with raw PNG bytes, which are re-encoded as
/// a data URI.
pub(crate) struct RemoveBgRemoval {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

impl RemoveBgRemoval {
    pub fn new(client: Client, api_key: SecretString, base_url: Option<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

#[async_trait]
impl RemovalBackend for RemoveBgRemoval {
    async fn remove(&self, image_url: &str, _options: &RemovalOptions) -> Result<String> {
        let url = format!("{}/removebg", self.base_url.trim_end_matches('/'));

        let mut form = Form::new().text("size", "auto");

        if image_url.starts_with("data:") {
            let bytes = BASE64
                .decode(strip_data_uri_prefix(image_url))
                .map_err(|_| RembgError::InvalidRequest("invalid base64 image data".to_string()))?;
            form = form.part("image_file", Part::bytes(bytes).file_name("image.png"));
        } else {
            form = form.text("image_url", image_url.to_string());
        }

        tracing::debug!("sending remove.bg request");

        let response = self
            .client
            .post(&url)
            .header("X-Api-Key", self.api_key.expose_secret())
            .multipart(form)
            .send()
            .await
            .map_err(|e| RembgError::Connection {
                provider: "remove.bg",
                message: e.to_string(),
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            tracing::error!(%status, "remove.bg API error");

            return Err(RembgError::Upstream(format!(
                "remove.bg error {}: {error_text}",
                status.as_u16()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RembgError::Upstream(format!("invalid remove.bg response: {e}")))?;

        Ok(to_png_data_uri(&bytes))
    }
}
