use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded = crate::env::expand_env(&raw)
            .map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self =
            toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if no upstream provider is configured or a
    /// policy value is out of range
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_has_providers()?;
        self.validate_generation()?;
        self.validate_quality()?;
        Ok(())
    }

    /// Ensure at least one upstream service is configured
    fn validate_has_providers(&self) -> anyhow::Result<()> {
        let p = &self.providers;
        let has_any = p.fal.is_some()
            || p.replicate.is_some()
            || p.huggingface.is_some()
            || p.bria.is_some()
            || p.removebg.is_some();

        if !has_any {
            anyhow::bail!(
                "at least one provider must be configured (fal, replicate, huggingface, bria, or removebg)"
            );
        }

        Ok(())
    }

    /// Validate the generation retry policy
    fn validate_generation(&self) -> anyhow::Result<()> {
        if self.generation.retry.max_attempts == 0 {
            anyhow::bail!("generation.retry.max_attempts must be at least 1");
        }

        Ok(())
    }

    /// Validate quality heuristic thresholds
    fn validate_quality(&self) -> anyhow::Result<()> {
        let q = &self.quality;

        if !(q.min_quality_ratio > 0.0 && q.min_quality_ratio <= 1.0) {
            anyhow::bail!("quality.min_quality_ratio must be within (0, 1]");
        }

        if q.min_bytes_per_pixel < 0.0 {
            anyhow::bail!("quality.min_bytes_per_pixel must not be negative");
        }

        Ok(())
    }
}
