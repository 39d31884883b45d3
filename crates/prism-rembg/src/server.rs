use reqwest::Client;

use crate::{
    error::{RembgError, Result},
    provider::{
        RemovalBackend,
        bria::BriaRemoval,
        fal::{BiRefNetRemoval, FalBriaRemoval},
        huggingface::HuggingFaceRemoval,
        removebg::RemoveBgRemoval,
        replicate::ReplicateRemoval,
    },
    types::{RemovalProvider, RemoveBackgroundRequest},
};

/// Background removal dispatcher
///
/// Flat enum-to-adapter mapping; no retry, a failed call surfaces
/// immediately.
pub struct Server {
    birefnet: Option<Box<dyn RemovalBackend>>,
    fal_bria: Option<Box<dyn RemovalBackend>>,
    removebg: Option<Box<dyn RemovalBackend>>,
    huggingface: Option<Box<dyn RemovalBackend>>,
    replicate: Option<Box<dyn RemovalBackend>>,
    bria: Option<Box<dyn RemovalBackend>>,
}

impl Server {
    /// Remove the background from the requested image
    pub async fn remove(&self, request: &RemoveBackgroundRequest) -> Result<String> {
        if request.image_url.is_empty() {
            return Err(RembgError::InvalidRequest("imageUrl is required".to_string()));
        }

        let backend = self.backend(request.provider)?;

        backend.remove(&request.image_url, &request.options).await
    }

    fn backend(&self, provider: RemovalProvider) -> Result<&dyn RemovalBackend> {
        let (slot, label) = match provider {
            RemovalProvider::Birefnet => (&self.birefnet, "fal"),
            RemovalProvider::Bria => (&self.fal_bria, "fal"),
            RemovalProvider::RemoveBg => (&self.removebg, "remove.bg"),
            RemovalProvider::HfRmbg => (&self.huggingface, "Hugging Face"),
            RemovalProvider::ReplicateRembg => (&self.replicate, "Replicate"),
            RemovalProvider::BriaRmbg => (&self.bria, "Bria"),
        };

        slot.as_deref().ok_or(RembgError::NotConfigured(label))
    }
}

/// Builder for constructing the removal dispatcher from configuration
pub struct RembgServerBuilder<'a> {
    config: &'a prism_config::Config,
    client: Client,
}

impl<'a> RembgServerBuilder<'a> {
    pub const fn new(config: &'a prism_config::Config, client: Client) -> Self {
        Self { config, client }
    }

    pub fn build(self) -> Server {
        let providers = &self.config.providers;

        let birefnet = providers.fal.as_ref().map(|creds| {
            tracing::debug!("Initializing birefnet removal provider");
            Box::new(BiRefNetRemoval::new(
                self.client.clone(),
                creds.api_key.clone(),
                creds.base_url.clone(),
            )) as Box<dyn RemovalBackend>
        });

        let fal_bria = providers.fal.as_ref().map(|creds| {
            Box::new(FalBriaRemoval::new(
                self.client.clone(),
                creds.api_key.clone(),
                creds.base_url.clone(),
            )) as Box<dyn RemovalBackend>
        });

        let removebg = providers.removebg.as_ref().map(|creds| {
            tracing::debug!("Initializing remove.bg provider");
            Box::new(RemoveBgRemoval::new(
                self.client.clone(),
                creds.api_key.clone(),
                creds.base_url.clone(),
            )) as Box<dyn RemovalBackend>
        });

        let huggingface = providers.huggingface.as_ref().map(|creds| {
            tracing::debug!("Initializing huggingface removal provider");
            Box::new(HuggingFaceRemoval::new(
                self.client.clone(),
                creds.api_key.clone(),
                creds.base_url.clone(),
            )) as Box<dyn RemovalBackend>
        });

        let replicate = providers.replicate.as_ref().map(|creds| {
            tracing::debug!("Initializing replicate removal provider");
            Box::new(ReplicateRemoval::new(
                self.client.clone(),
                creds.api_key.clone(),
                creds.base_url.clone(),
            )) as Box<dyn RemovalBackend>
        });

        let bria = providers.bria.as_ref().map(|creds| {
            tracing::debug!("Initializing bria removal provider");
            Box::new(BriaRemoval::new(
                self.client.clone(),
                creds.api_key.clone(),
                creds.base_url.clone(),
            )) as Box<dyn RemovalBackend>
        });

        Server {
            birefnet,
            fal_bria,
            removebg,
            huggingface,
            replicate,
            bria,
        }
    }
}
