use serde::{Deserialize, Serialize};

/// Upscale request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpscaleRequest {
    /// Image to upscale: remote URL or data URI
    pub image_url: String,
    /// Upscale factor, 2 or 4
    #[serde(default = "default_target_scale")]
    pub target_scale: u32,
    /// Run the face enhancement pass where the provider supports it
    #[serde(default = "default_face_enhance")]
    pub face_enhance: bool,
    /// Which upstream service handles the request
    #[serde(default)]
    pub provider: UpscaleProvider,
    /// Source width, reported back and used to estimate output size
    /// when the provider does not report dimensions
    #[serde(default)]
    pub original_width: Option<u32>,
    /// Source height, see `original_width`
    #[serde(default)]
    pub original_height: Option<u32>,
}

const fn default_target_scale() -> u32 {
    2
}

const fn default_face_enhance() -> bool {
    true
}

/// Supported upscale providers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum UpscaleProvider {
    /// fal.ai Real-ESRGAN
    #[default]
    #[serde(rename = "real-esrgan")]
    RealEsrgan,
    /// Replicate Real-ESRGAN
    #[serde(rename = "replicate-esrgan")]
    ReplicateEsrgan,
    /// Bria increase_resolution
    #[serde(rename = "bria")]
    Bria,
}

/// Upscale response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpscaleResponse {
    /// Upscaled image: remote URL or data URI
    pub result_url: String,
    /// Source dimensions as supplied by the caller, null when unknown
    pub original_size: SizeReport,
    /// Output dimensions: provider-reported when available, otherwise
    /// estimated from the source dimensions and scale
    pub output_size: OutputSize,
    /// Scale factor that was applied
    pub scale_applied: u32,
}

/// Dimensions that may be unknown
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SizeReport {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Known output dimensions (0 when neither reported nor estimable)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OutputSize {
    pub width: u32,
    pub height: u32,
}
