use serde::Deserialize;

/// Thresholds for the background-removal quality heuristic
///
/// The defaults are tuned to catch providers that silently downsample
/// or return near-empty transparent images. They are policy constants,
/// not physical laws, which is why they live in configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QualityConfig {
    /// Minimum processed/original pixel-count ratio to pass
    #[serde(default = "default_min_quality_ratio")]
    pub min_quality_ratio: f64,
    /// Minimum expected bytes per pixel of the processed image
    #[serde(default = "default_min_bytes_per_pixel")]
    pub min_bytes_per_pixel: f64,
    /// Max dimension below which a 4x (rather than 2x) upscale is suggested
    #[serde(default = "default_small_image_threshold")]
    pub small_image_threshold: u32,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            min_quality_ratio: default_min_quality_ratio(),
            min_bytes_per_pixel: default_min_bytes_per_pixel(),
            small_image_threshold: default_small_image_threshold(),
        }
    }
}

const fn default_min_quality_ratio() -> f64 {
    0.8
}

const fn default_min_bytes_per_pixel() -> f64 {
    0.5
}

const fn default_small_image_threshold() -> u32 {
    512
}
