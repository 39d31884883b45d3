use prism_config::QualityConfig;

use crate::types::{ImageMeta, QualityVerdict, Recommendation};

/// Evaluate a background-removal result against its source
///
/// Pure function of the two metadata records and the thresholds.
/// Three checks feed the verdict:
///
/// 1. resolution retention: processed/original pixel count,
/// 2. transparency: the output must carry a real alpha channel,
/// 3. a minimum-byte-size floor that catches near-empty output.
///
/// Missing original dimensions force the ratio to 1.0, deliberately
/// skipping the resolution check rather than blocking on absent
/// metadata.
pub fn evaluate(
    original: &ImageMeta,
    processed: &ImageMeta,
    config: &QualityConfig,
) -> QualityVerdict {
    let original_pixels = original.pixels();
    let processed_pixels = processed.pixels();

    #[allow(clippy::cast_precision_loss)]
    let quality_ratio = if original_pixels > 0 {
        processed_pixels as f64 / original_pixels as f64
    } else {
        1.0
    };

    let has_transparency = processed.has_alpha && processed.channel_count == 4;

    #[allow(clippy::cast_precision_loss)]
    let min_expected_bytes = processed_pixels as f64 * config.min_bytes_per_pixel;
    #[allow(clippy::cast_precision_loss)]
    let file_size_ok = processed.byte_length as f64 >= min_expected_bytes;

    let resolution_ok = quality_ratio >= config.min_quality_ratio;

    let passed = resolution_ok && has_transparency && file_size_ok;

    // Precedence: a failed size check outranks everything, then
    // resolution loss, then missing transparency
    let recommendation = if !file_size_ok {
        Recommendation::Retry
    } else if !resolution_ok {
        Recommendation::Upscale
    } else if has_transparency {
        Recommendation::Ok
    } else {
        Recommendation::Retry
    };

    let suggested_scale = (recommendation == Recommendation::Upscale).then(|| {
        if processed.dimensions().max_dimension() < config.small_image_threshold {
            4
        } else {
            2
        }
    });

    QualityVerdict {
        passed,
        quality_ratio,
        has_transparency,
        recommendation,
        suggested_scale,
        original_size: original.dimensions(),
        output_size: processed.dimensions(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> QualityConfig {
        QualityConfig::default()
    }

    fn opaque(width: u32, height: u32, byte_length: usize) -> ImageMeta {
        ImageMeta {
            width,
            height,
            has_alpha: false,
            channel_count: 3,
            byte_length,
        }
    }

    fn rgba(width: u32, height: u32, byte_length: usize) -> ImageMeta {
        ImageMeta {
            width,
            height,
            has_alpha: true,
            channel_count: 4,
            byte_length,
        }
    }

    /// Bytes comfortably above the 0.5 bytes/pixel floor
    fn ample_bytes(width: u32, height: u32) -> usize {
        usize::try_from(width * height).unwrap()
    }

    #[test]
    fn ratio_is_pixel_quotient() {
        let original = rgba(1000, 1000, ample_bytes(1000, 1000));
        let processed = rgba(500, 500, ample_bytes(500, 500));

        let verdict = evaluate(&original, &processed, &config());
        assert!((verdict.quality_ratio - 0.25).abs() < 1e-9);
    }

    #[test]
    fn zero_original_pixels_fails_open() {
        let original = rgba(0, 0, 0);
        let processed = rgba(800, 800, ample_bytes(800, 800));

        let verdict = evaluate(&original, &processed, &config());
        assert!((verdict.quality_ratio - 1.0).abs() < f64::EPSILON);
        assert!(verdict.passed);
        assert_eq!(verdict.recommendation, Recommendation::Ok);
    }

    #[test]
    fn passes_only_when_all_three_hold() {
        // Exhaustive truth table over (resolution_ok, transparency, size_ok).
        // Original 1000x1000; processed 900x900 keeps the ratio at 0.81,
        // 400x400 drops it to 0.16.
        let original = rgba(1000, 1000, ample_bytes(1000, 1000));

        for resolution_ok in [true, false] {
            for transparency in [true, false] {
                for size_ok in [true, false] {
                    let (width, height) = if resolution_ok { (900, 900) } else { (400, 400) };
                    let bytes = if size_ok { ample_bytes(width, height) } else { 10 };
                    let processed = if transparency {
                        rgba(width, height, bytes)
                    } else {
                        opaque(width, height, bytes)
                    };

                    let verdict = evaluate(&original, &processed, &config());

                    assert_eq!(
                        verdict.passed,
                        resolution_ok && transparency && size_ok,
                        "passed mismatch at ({resolution_ok}, {transparency}, {size_ok})"
                    );

                    let expected = if !size_ok {
                        Recommendation::Retry
                    } else if !resolution_ok {
                        Recommendation::Upscale
                    } else if transparency {
                        Recommendation::Ok
                    } else {
                        Recommendation::Retry
                    };
                    assert_eq!(
                        verdict.recommendation, expected,
                        "recommendation mismatch at ({resolution_ok}, {transparency}, {size_ok})"
                    );

                    assert_eq!(
                        verdict.suggested_scale.is_some(),
                        verdict.recommendation == Recommendation::Upscale,
                        "suggested_scale presence mismatch"
                    );
                }
            }
        }
    }

    #[test]
    fn threshold_sized_output_suggests_2x() {
        let original = rgba(1000, 1000, ample_bytes(1000, 1000));
        // Max dimension exactly at the threshold gets the smaller factor
        let processed = rgba(512, 400, ample_bytes(512, 400));

        let verdict = evaluate(&original, &processed, &config());
        assert_eq!(verdict.recommendation, Recommendation::Upscale);
        assert_eq!(verdict.suggested_scale, Some(2));
    }

    #[test]
    fn retention_above_threshold_passes() {
        // Scenario: 1000x1000 -> 900x900 RGBA with ample bytes
        let original = rgba(1000, 1000, ample_bytes(1000, 1000));
        let processed = rgba(900, 900, ample_bytes(900, 900));

        let verdict = evaluate(&original, &processed, &config());
        assert!(verdict.passed);
        assert_eq!(verdict.recommendation, Recommendation::Ok);
        assert!(verdict.suggested_scale.is_none());
    }

    #[test]
    fn opaque_output_recommends_retry() {
        // Scenario: processed 400x400 without alpha; ratio and size are
        // irrelevant because transparency is the failing check
        let original = rgba(400, 400, ample_bytes(400, 400));
        let processed = opaque(400, 400, ample_bytes(400, 400));

        let verdict = evaluate(&original, &processed, &config());
        assert!(!verdict.passed);
        assert!(!verdict.has_transparency);
        assert_eq!(verdict.recommendation, Recommendation::Retry);
    }

    #[test]
    fn shrunken_output_recommends_upscale() {
        // Scenario: 1000x1000 -> 300x300 RGBA, ratio well below 0.8
        let original = rgba(1000, 1000, ample_bytes(1000, 1000));
        let processed = rgba(300, 300, ample_bytes(300, 300));

        let verdict = evaluate(&original, &processed, &config());
        assert!(!verdict.passed);
        assert_eq!(verdict.recommendation, Recommendation::Upscale);
        assert_eq!(verdict.suggested_scale, Some(4));
    }

    #[test]
    fn alpha_without_four_channels_is_not_transparency() {
        // Grayscale+alpha decodes to 2 channels; the heuristic wants RGBA
        let original = rgba(100, 100, ample_bytes(100, 100));
        let processed = ImageMeta {
            width: 100,
            height: 100,
            has_alpha: true,
            channel_count: 2,
            byte_length: ample_bytes(100, 100),
        };

        let verdict = evaluate(&original, &processed, &config());
        assert!(!verdict.has_transparency);
        assert_eq!(verdict.recommendation, Recommendation::Retry);
    }

    #[test]
    fn undersized_file_outranks_resolution_loss() {
        // Both the size floor and the ratio fail; retry wins
        let original = rgba(1000, 1000, ample_bytes(1000, 1000));
        let processed = rgba(300, 300, 10);

        let verdict = evaluate(&original, &processed, &config());
        assert_eq!(verdict.recommendation, Recommendation::Retry);
        assert!(verdict.suggested_scale.is_none());
    }
}
