use reqwest::Client;
use tokio_util::sync::CancellationToken;

use prism_config::RetryConfig;
use prism_core::ImageRef;

use crate::{
    error::{ImageGenError, Result},
    provider::{
        GenerationBackend, bria::BriaGeneration, fal::FalGeneration,
        huggingface::HuggingFaceGeneration, replicate::ReplicateGeneration,
    },
    retry::call_with_retry,
    types::{GenerateRequest, GenerationProvider},
};

/// Generation dispatcher
///
/// Selects the adapter named by the request and applies the retry
/// policy: the primary (fal) provider is retried with backoff, every
/// other provider surfaces its first failure immediately.
pub struct Server {
    fal: Option<Box<dyn GenerationBackend>>,
    replicate: Option<Box<dyn GenerationBackend>>,
    huggingface: Option<Box<dyn GenerationBackend>>,
    bria: Option<Box<dyn GenerationBackend>>,
    bria_lite: Option<Box<dyn GenerationBackend>>,
    retry: RetryConfig,
}

impl Server {
    /// Dispatch a generation request to its provider
    pub async fn dispatch(
        &self,
        request: &GenerateRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<ImageRef>> {
        if request.prompt.trim().is_empty() {
            return Err(ImageGenError::InvalidRequest("prompt is required".to_string()));
        }

        let backend = self.backend(request.provider)?;

        if request.provider.is_primary() {
            call_with_retry(backend, request, &self.retry, cancel)
                .await
                .map_err(ImageGenError::classify)
        } else {
            backend.generate(request).await
        }
    }

    fn backend(&self, provider: GenerationProvider) -> Result<&dyn GenerationBackend> {
        let (slot, label) = match provider {
            GenerationProvider::Fal => (&self.fal, "fal"),
            GenerationProvider::ReplicateFluxSchnell => (&self.replicate, "Replicate"),
            GenerationProvider::HfFlux => (&self.huggingface, "Hugging Face"),
            GenerationProvider::Bria => (&self.bria, "Bria"),
            GenerationProvider::BriaLite => (&self.bria_lite, "Bria"),
        };

        slot.as_deref().ok_or(ImageGenError::NotConfigured(label))
    }
}

/// Builder for constructing the generation dispatcher from configuration
pub struct ImageGenServerBuilder<'a> {
    config: &'a prism_config::Config,
    client: Client,
}

impl<'a> ImageGenServerBuilder<'a> {
    pub const fn new(config: &'a prism_config::Config, client: Client) -> Self {
        Self { config, client }
    }

    pub fn build(self) -> Server {
        let providers = &self.config.providers;

        let fal = providers.fal.as_ref().map(|creds| {
            tracing::debug!("Initializing fal generation provider");
            Box::new(FalGeneration::new(
                self.client.clone(),
                creds.api_key.clone(),
                creds.base_url.clone(),
            )) as Box<dyn GenerationBackend>
        });

        let replicate = providers.replicate.as_ref().map(|creds| {
            tracing::debug!("Initializing replicate generation provider");
            Box::new(ReplicateGeneration::new(
                self.client.clone(),
                creds.api_key.clone(),
                creds.base_url.clone(),
            )) as Box<dyn GenerationBackend>
        });

        let huggingface = providers.huggingface.as_ref().map(|creds| {
            tracing::debug!("Initializing huggingface generation provider");
            Box::new(HuggingFaceGeneration::new(
                self.client.clone(),
                creds.api_key.clone(),
                creds.base_url.clone(),
            )) as Box<dyn GenerationBackend>
        });

        let bria = providers.bria.as_ref().map(|creds| {
            tracing::debug!("Initializing bria generation provider");
            Box::new(BriaGeneration::new(
                self.client.clone(),
                creds.api_key.clone(),
                creds.base_url.clone(),
                false,
            )) as Box<dyn GenerationBackend>
        });

        let bria_lite = providers.bria.as_ref().map(|creds| {
            Box::new(BriaGeneration::new(
                self.client.clone(),
                creds.api_key.clone(),
                creds.base_url.clone(),
                true,
            )) as Box<dyn GenerationBackend>
        });

        Server {
            fal,
            replicate,
            huggingface,
            bria,
            bria_lite,
            retry: self.config.generation.retry.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_server() -> Server {
        Server {
            fal: None,
            replicate: None,
            huggingface: None,
            bria: None,
            bria_lite: None,
            retry: RetryConfig::default(),
        }
    }

    #[tokio::test]
    async fn blank_prompt_is_rejected_before_dispatch() {
        let server = empty_server();
        let request: GenerateRequest = serde_json::from_str(r#"{"prompt": "   "}"#).unwrap();

        let err = server
            .dispatch(&request, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ImageGenError::InvalidRequest(m) if m == "prompt is required"));
    }

    #[tokio::test]
    async fn unconfigured_provider_is_named() {
        let server = empty_server();
        let request: GenerateRequest =
            serde_json::from_str(r#"{"prompt": "x", "provider": "bria"}"#).unwrap();

        let err = server
            .dispatch(&request, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ImageGenError::NotConfigured("Bria")));
    }
}
