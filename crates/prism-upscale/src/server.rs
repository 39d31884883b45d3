use reqwest::Client;

use crate::{
    error::{Result, UpscaleError},
    provider::{UpscaleBackend, bria::BriaUpscale, fal::FalUpscale, replicate::ReplicateUpscale},
    types::{OutputSize, SizeReport, UpscaleProvider, UpscaleRequest, UpscaleResponse},
};

/// Upscale dispatcher
pub struct Server {
    fal: Option<Box<dyn UpscaleBackend>>,
    replicate: Option<Box<dyn UpscaleBackend>>,
    bria: Option<Box<dyn UpscaleBackend>>,
}

impl Server {
    /// Upscale the requested image
    pub async fn upscale(&self, request: &UpscaleRequest) -> Result<UpscaleResponse> {
        if request.image_url.is_empty() {
            return Err(UpscaleError::InvalidRequest("imageUrl is required".to_string()));
        }

        if !matches!(request.target_scale, 2 | 4) {
            return Err(UpscaleError::InvalidRequest(
                "targetScale must be 2 or 4".to_string(),
            ));
        }

        let backend = self.backend(request.provider)?;

        let outcome = backend
            .upscale(&request.image_url, request.target_scale, request.face_enhance)
            .await?;

        // Fall back to an estimate when the provider reports no dimensions
        let output_size = OutputSize {
            width: outcome.width.unwrap_or_else(|| {
                request
                    .original_width
                    .unwrap_or(0)
                    .saturating_mul(request.target_scale)
            }),
            height: outcome.height.unwrap_or_else(|| {
                request
                    .original_height
                    .unwrap_or(0)
                    .saturating_mul(request.target_scale)
            }),
        };

        Ok(UpscaleResponse {
            result_url: outcome.url,
            original_size: SizeReport {
                width: request.original_width,
                height: request.original_height,
            },
            output_size,
            scale_applied: request.target_scale,
        })
    }

    fn backend(&self, provider: UpscaleProvider) -> Result<&dyn UpscaleBackend> {
        let (slot, label) = match provider {
            UpscaleProvider::RealEsrgan => (&self.fal, "fal"),
            UpscaleProvider::ReplicateEsrgan => (&self.replicate, "Replicate"),
            UpscaleProvider::Bria => (&self.bria, "Bria"),
        };

        slot.as_deref().ok_or(UpscaleError::NotConfigured(label))
    }
}

/// Builder for constructing the upscale dispatcher from configuration
pub struct UpscaleServerBuilder<'a> {
    config: &'a prism_config::Config,
    client: Client,
}

impl<'a> UpscaleServerBuilder<'a> {
    pub const fn new(config: &'a prism_config::Config, client: Client) -> Self {
        Self { config, client }
    }

    pub fn build(self) -> Server {
        let providers = &self.config.providers;

        let fal = providers.fal.as_ref().map(|creds| {
            tracing::debug!("Initializing fal upscale provider");
            Box::new(FalUpscale::new(
                self.client.clone(),
                creds.api_key.clone(),
                creds.base_url.clone(),
            )) as Box<dyn UpscaleBackend>
        });

        let replicate = providers.replicate.as_ref().map(|creds| {
            tracing::debug!("Initializing replicate upscale provider");
            Box::new(ReplicateUpscale::new(
                self.client.clone(),
                creds.api_key.clone(),
                creds.base_url.clone(),
            )) as Box<dyn UpscaleBackend>
        });

        let bria = providers.bria.as_ref().map(|creds| {
            tracing::debug!("Initializing bria upscale provider");
            Box::new(BriaUpscale::new(
                self.client.clone(),
                creds.api_key.clone(),
                creds.base_url.clone(),
            )) as Box<dyn UpscaleBackend>
        });

        Server { fal, replicate, bria }
    }
}
