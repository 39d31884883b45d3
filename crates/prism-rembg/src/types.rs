use serde::{Deserialize, Serialize};

/// Background removal request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveBackgroundRequest {
    /// Image to process: remote URL or data URI
    pub image_url: String,
    /// Which upstream service handles the request
    #[serde(default)]
    pub provider: RemovalProvider,
    /// Provider-specific tuning
    #[serde(default)]
    pub options: RemovalOptions,
}

/// Optional per-provider tuning
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovalOptions {
    /// BiRefNet model variant
    #[serde(default)]
    pub birefnet_model: Option<BirefnetModel>,
}

/// BiRefNet model variants as named by the fal.ai API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum BirefnetModel {
    #[serde(rename = "General Use (Light)")]
    GeneralUseLight,
    #[default]
    #[serde(rename = "General Use (Heavy)")]
    GeneralUseHeavy,
    #[serde(rename = "Portrait")]
    Portrait,
}

/// Supported background removal providers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum RemovalProvider {
    /// fal.ai BiRefNet v2
    #[default]
    #[serde(rename = "birefnet")]
    Birefnet,
    /// fal.ai hosted BRIA RMBG-2.0
    #[serde(rename = "bria")]
    Bria,
    /// remove.bg
    #[serde(rename = "removebg")]
    RemoveBg,
    /// Hugging Face RMBG-2.0
    #[serde(rename = "hf-rmbg")]
    HfRmbg,
    /// Replicate rembg
    #[serde(rename = "replicate-rembg")]
    ReplicateRembg,
    /// Bria direct API
    #[serde(rename = "bria-rmbg")]
    BriaRmbg,
}

/// Background removal response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveBackgroundResponse {
    /// Processed image: remote URL or data URI
    pub result_url: String,
    /// Provider that produced the result
    pub provider: RemovalProvider,
}
