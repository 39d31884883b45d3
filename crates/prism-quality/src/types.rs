use serde::{Deserialize, Serialize};

use prism_core::Dimensions;

/// Quality check request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityCheckRequest {
    /// Image as it was before background removal
    #[serde(default)]
    pub original_image_url: Option<String>,
    /// Background-removed image
    #[serde(default)]
    pub processed_image_url: Option<String>,
}

/// Metadata extracted from a decoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageMeta {
    pub width: u32,
    pub height: u32,
    pub has_alpha: bool,
    pub channel_count: u8,
    pub byte_length: usize,
}

impl ImageMeta {
    /// Total pixel count
    pub const fn pixels(&self) -> u64 {
        self.dimensions().pixels()
    }

    pub const fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}

/// What the caller should do about a quality verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    /// Resolution dropped; run the result through an upscaler
    Upscale,
    /// Output looks broken; redo the removal
    Retry,
    /// Output is fine as-is
    Ok,
}

/// Quality verdict for a background-removal result
///
/// Derived and stateless; recomputed on every check, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityVerdict {
    /// All three checks passed
    pub passed: bool,
    /// Processed/original pixel-count ratio
    pub quality_ratio: f64,
    /// Output has a usable alpha channel
    pub has_transparency: bool,
    /// Remediation advice
    pub recommendation: Recommendation,
    /// Upscale factor to use, present iff recommendation is upscale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_scale: Option<u32>,
    /// Original image dimensions
    pub original_size: Dimensions,
    /// Processed image dimensions
    pub output_size: Dimensions,
}
