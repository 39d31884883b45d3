use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::{UpscaleBackend, UpscaleOutcome};
use crate::error::{Result, UpscaleError};

/// Default fal.ai synchronous endpoint base
const DEFAULT_BASE_URL: &str = "https://fal.run";

/// fal.ai Real-ESRGAN adapter
pub(crate) struct FalUpscale {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

impl FalUpscale {
    pub fn new(client: Client, api_key: SecretString, base_url: Option<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

/// Real-ESRGAN checkpoint for the requested factor
const fn model_for_scale(scale: u32) -> &'static str {
    if scale == 4 {
        "RealESRGAN_x4plus"
    } else {
        "RealESRGAN_x2plus"
    }
}

#[derive(Serialize)]
struct FalRequest<'a> {
    image_url: &'a str,
    scale: u32,
    face_enhance: bool,
    model: &'static str,
}

#[derive(Deserialize)]
struct FalResponse {
    image: FalImage,
}

#[derive(Deserialize)]
struct FalImage {
    url: String,
    width: Option<u32>,
    height: Option<u32>,
}

#[async_trait]
impl UpscaleBackend for FalUpscale {
    async fn upscale(
        &self,
        image_url: &str,
        scale: u32,
        face_enhance: bool,
    ) -> Result<UpscaleOutcome> {
        let url = format!(
            "{}/fal-ai/real-esrgan",
            self.base_url.trim_end_matches('/')
        );

        let wire_request = FalRequest {
            image_url,
            scale,
            face_enhance,
            model: model_for_scale(scale),
        };

        tracing::debug!(model = wire_request.model, "sending fal upscale request");

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
            .map_err(|e| UpscaleError::Connection {
                provider: "fal",
                message: e.to_string(),
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| format!("fal error {status}"));

            tracing::error!(%status, "fal upscale API error");

            return Err(UpscaleError::Upstream(error_text));
        }

        let wire_response: FalResponse = response
            .json()
            .await
            .map_err(|e| UpscaleError::Upstream(format!("invalid fal response: {e}")))?;

        Ok(UpscaleOutcome {
            url: wire_response.image.url,
            width: wire_response.image.width,
            height: wire_response.image.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkpoint_follows_scale() {
        assert_eq!(model_for_scale(4), "RealESRGAN_x4plus");
        assert_eq!(model_for_scale(2), "RealESRGAN_x2plus");
    }
}
