use std::path::{Path, PathBuf};

use pixel_filters::noise::MAX_NOISE_AMPLITUDE;
use pixel_filters::{BoundaryPolicy, Tuning};
use serde::{Deserialize, Deserializer};

use crate::error::ProcessError;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "IMGFX_CONFIG";

/// Largest Gaussian sampler radius accepted from config.
pub const MAX_GAUSSIAN_RADIUS: u32 = 8;

/// Engine tuning loaded from a YAML file.
///
/// Every field is optional:
///
/// ```yaml
/// noise_amplitude: 0.1
/// gaussian_radius: 2
/// gaussian_sigma: 0.8
/// boundary: clamp      # or zero
/// seed: 42             # omit for a fresh seed per run
/// optimize_png: false
/// ```
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Half-width of the `-random-noise` distribution
    pub noise_amplitude: f32,

    /// Gaussian sampler window radius
    pub gaussian_radius: u32,

    /// Gaussian sampler standard deviation
    pub gaussian_sigma: f32,

    /// Out-of-image policy for blur, sharpen and edge detection
    #[serde(deserialize_with = "deserialize_boundary")]
    pub boundary: BoundaryPolicy,

    /// Seed for random dither and noise
    pub seed: Option<u64>,

    /// Re-compress PNG output with oxipng
    pub optimize_png: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let tuning = Tuning::default();
        Self {
            noise_amplitude: tuning.noise_amplitude,
            gaussian_radius: tuning.gaussian.radius,
            gaussian_sigma: tuning.gaussian.sigma,
            boundary: tuning.boundary,
            seed: None,
            optimize_png: false,
        }
    }
}

fn deserialize_boundary<'de, D>(deserializer: D) -> Result<BoundaryPolicy, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(serde::de::Error::custom)
}

impl EngineConfig {
    /// Parse and validate YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self, ProcessError> {
        // An empty file is a valid, all-default config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_yaml::from_str(content).map_err(|e| ProcessError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ProcessError> {
        let content = std::fs::read_to_string(path).map_err(|e| ProcessError::io(path, e))?;
        let config = Self::from_yaml_str(&content)?;
        tracing::info!(path = %path.display(), ?config, "Loaded configuration");
        Ok(config)
    }

    /// Pick the config for this run.
    ///
    /// An explicit `--config` path must load. A path from the environment
    /// that fails to load is reported and replaced by defaults.
    pub fn resolve(
        explicit: Option<&Path>,
        from_env: Option<PathBuf>,
    ) -> Result<Self, ProcessError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match from_env {
            Some(path) => match Self::load(&path) {
                Ok(config) => Ok(config),
                Err(e) => {
                    tracing::warn!(%e, env = CONFIG_ENV, "Failed to load config, using defaults");
                    Ok(Self::default())
                }
            },
            None => Ok(Self::default()),
        }
    }

    /// Reject values the engine cannot use.
    pub fn validate(&self) -> Result<(), ProcessError> {
        if !(0.0..=MAX_NOISE_AMPLITUDE).contains(&self.noise_amplitude) {
            return Err(ProcessError::Config(format!(
                "noise_amplitude must be between 0 and {MAX_NOISE_AMPLITUDE}, got {}",
                self.noise_amplitude
            )));
        }
        if !self.gaussian_sigma.is_finite() || self.gaussian_sigma <= 0.0 {
            return Err(ProcessError::Config(format!(
                "gaussian_sigma must be > 0, got {}",
                self.gaussian_sigma
            )));
        }
        if self.gaussian_radius > MAX_GAUSSIAN_RADIUS {
            return Err(ProcessError::Config(format!(
                "gaussian_radius must be <= {MAX_GAUSSIAN_RADIUS}, got {}",
                self.gaussian_radius
            )));
        }
        Ok(())
    }

    /// Engine constants for this config.
    pub fn tuning(&self) -> Tuning {
        Tuning::default()
            .noise_amplitude(self.noise_amplitude)
            .gaussian(self.gaussian_radius, self.gaussian_sigma)
            .boundary(self.boundary)
    }
}
