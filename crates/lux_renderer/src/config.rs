//! Render configuration.

use crate::error::{RenderError, Result};
use crate::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Bounces from the camera before Russian roulette may end a path.
pub const RR_START_BOUNCE: u32 = 3;

/// Which direction distributions the integrator draws from at each bounce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingStrategy {
    /// BSDF sampling only (plain path tracing)
    Material,
    /// Next-event estimation toward the lights only
    Light,
    /// One sample from each, combined with the balance heuristic
    #[default]
    Mis,
    /// One sample from a 50/50 blend of the light and material distributions
    Mixture,
}

impl SamplingStrategy {
    pub const ALL: [SamplingStrategy; 4] = [
        SamplingStrategy::Material,
        SamplingStrategy::Light,
        SamplingStrategy::Mis,
        SamplingStrategy::Mixture,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SamplingStrategy::Material => "material",
            SamplingStrategy::Light => "light",
            SamplingStrategy::Mis => "mis",
            SamplingStrategy::Mixture => "mixture",
        }
    }
}

impl fmt::Display for SamplingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown sampling strategy '{0}' (expected material, light, mis or mixture)")]
pub struct ParseStrategyError(String);

impl FromStr for SamplingStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name() == lower)
            .ok_or_else(|| ParseStrategyError(s.to_string()))
    }
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub image_width: u32,
    pub image_height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Background color when ray doesn't hit anything
    pub background: Color,
    /// Whether to use sky gradient instead of solid background
    pub use_sky_gradient: bool,
    pub strategy: SamplingStrategy,
    pub russian_roulette: bool,
    /// Roulette applies once `depth < max_depth - rr_start_bounce`
    pub rr_start_bounce: u32,
    /// Fixed seed for reproducible renders; `None` draws from OS entropy
    pub seed: Option<u64>,
    /// Worker threads; `None` uses rayon's default
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 400,
            image_height: 225,
            samples_per_pixel: 100,
            max_depth: 50,
            background: Color::ZERO,
            use_sky_gradient: false,
            strategy: SamplingStrategy::default(),
            russian_roulette: true,
            rr_start_bounce: RR_START_BOUNCE,
            seed: None,
            threads: None,
        }
    }
}

impl RenderConfig {
    /// Load a configuration from a JSON file. Missing fields keep their
    /// defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: RenderConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.image_width as f32 / self.image_height.max(1) as f32
    }

    /// Check that the configuration describes a renderable image.
    pub fn validate(&self) -> Result<()> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "image size must be non-zero, got {}x{}",
                self.image_width, self.image_height
            )));
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidConfig(
                "samples_per_pixel must be at least 1".into(),
            ));
        }
        if self.max_depth == 0 {
            return Err(RenderError::InvalidConfig(
                "max_depth must be at least 1".into(),
            ));
        }
        if !self.background.is_finite() || self.background.min_element() < 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "background must be finite and non-negative, got {:?}",
                self.background
            )));
        }
        if self.threads == Some(0) {
            return Err(RenderError::InvalidConfig(
                "threads must be at least 1 when set".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RenderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.strategy, SamplingStrategy::Mis);
        assert_eq!(config.rr_start_bounce, RR_START_BOUNCE);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_width = RenderConfig {
            image_width: 0,
            ..Default::default()
        };
        assert!(matches!(zero_width.validate(), Err(RenderError::InvalidConfig(_))));

        let zero_spp = RenderConfig {
            samples_per_pixel: 0,
            ..Default::default()
        };
        assert!(zero_spp.validate().is_err());

        let negative_bg = RenderConfig {
            background: Color::new(-1.0, 0.0, 0.0),
            ..Default::default()
        };
        assert!(negative_bg.validate().is_err());

        let no_threads = RenderConfig {
            threads: Some(0),
            ..Default::default()
        };
        assert!(no_threads.validate().is_err());
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("mis".parse::<SamplingStrategy>(), Ok(SamplingStrategy::Mis));
        assert_eq!("Light".parse::<SamplingStrategy>(), Ok(SamplingStrategy::Light));
        assert_eq!(
            " material ".parse::<SamplingStrategy>(),
            Ok(SamplingStrategy::Material)
        );
        assert_eq!("mixture".parse::<SamplingStrategy>(), Ok(SamplingStrategy::Mixture));
        assert!("bdpt".parse::<SamplingStrategy>().is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "samples_per_pixel": 16, "strategy": "light", "background": [0.1, 0.2, 0.3] }"#;
        let config: RenderConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.samples_per_pixel, 16);
        assert_eq!(config.strategy, SamplingStrategy::Light);
        assert_eq!(config.background, Color::new(0.1, 0.2, 0.3));
        assert_eq!(config.max_depth, RenderConfig::default().max_depth);
    }

    #[test]
    fn test_from_json_file() {
        let path = std::env::temp_dir().join(format!("lux_config_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "image_width": 64, "image_height": 32, "seed": 7 }"#).unwrap();

        let config = RenderConfig::from_json_file(&path).unwrap();
        assert_eq!((config.image_width, config.image_height), (64, 32));
        assert_eq!(config.seed, Some(7));
        assert!((config.aspect_ratio() - 2.0).abs() < 1e-6);

        std::fs::write(&path, r#"{ "max_depth": 0 }"#).unwrap();
        assert!(matches!(
            RenderConfig::from_json_file(&path),
            Err(RenderError::InvalidConfig(_))
        ));

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            RenderConfig::from_json_file(&path),
            Err(RenderError::ConfigParse(_))
        ));

        std::fs::remove_file(&path).ok();
    }
}
