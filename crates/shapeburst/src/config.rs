//! Simulation configuration.
//!
//! Every tunable lives in [`SimConfig`]. Defaults reproduce the classic
//! demo: bursts of 40 shapes, speed 0.1 px/ms, 20 px shapes, up to four
//! seconds of visibility.
//!
//! Configs are JSON. Missing fields take their default, so `{}` is a valid
//! config and `{"batch_size": 5}` changes just the burst size:
//!
//! ```json
//! {
//!   "batch_size": 40,
//!   "speed": 0.1,
//!   "shape_size": 20.0,
//!   "max_lifetime": 4000.0,
//!   "expire_action": "despawn",
//!   "stroke_width": 1.0,
//!   "palette": { "background": [1.0, 1.0, 1.0, 1.0], ... },
//!   "viewport": { "width": 800.0, "height": 600.0 },
//!   "seed": 7
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::math::Viewport;
use crate::render::Color;

/// What happens to an entity when its lifetime runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpireAction {
    /// Detach `Renderable` only. The entity keeps moving, invisible, for
    /// the rest of the run.
    Hide,
    /// Detach `Renderable`, then destroy the entity.
    #[default]
    Despawn,
}

/// Fill and stroke colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Color,
    pub circle_fill: Color,
    pub circle_stroke: Color,
    pub box_fill: Color,
    pub box_stroke: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::hex(0xffffff),
            circle_fill: Color::hex(0x888888),
            circle_stroke: Color::hex(0x222222),
            box_fill: Color::hex(0xf28d89),
            box_stroke: Color::hex(0x800904),
        }
    }
}

/// Tunables for a [`Simulation`](crate::Simulation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Entities spawned per click.
    pub batch_size: usize,
    /// Maximum speed per axis, in pixels per millisecond.
    pub speed: f32,
    /// Nominal shape size in pixels. Per-entity sizes fall in
    /// `(0, shape_size / 2]`, and `shape_size / 2` is the wrap margin.
    pub shape_size: f32,
    /// Longest possible visibility, in milliseconds.
    pub max_lifetime: f32,
    pub expire_action: ExpireAction,
    pub stroke_width: f32,
    pub palette: Palette,
    /// Viewport before the host reports a real size.
    pub viewport: Viewport,
    /// Fixed RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            batch_size: 40,
            speed: 0.1,
            shape_size: 20.0,
            max_lifetime: 4000.0,
            expire_action: ExpireAction::default(),
            stroke_width: 1.0,
            palette: Palette::default(),
            viewport: Viewport::default(),
            seed: None,
        }
    }
}

impl SimConfig {
    /// Half the nominal shape size. Upper bound of a sampled size and the
    /// wrap margin.
    pub fn half_size(&self) -> f32 {
        self.shape_size * 0.5
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Pretty JSON, suitable for writing a starter config file.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation can't run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid("batch_size must be at least 1".into()));
        }
        if !(self.speed.is_finite() && self.speed >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "speed must be a non-negative number, got {}",
                self.speed
            )));
        }
        if !(self.shape_size.is_finite() && self.shape_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "shape_size must be positive, got {}",
                self.shape_size
            )));
        }
        if !(self.max_lifetime.is_finite() && self.max_lifetime > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_lifetime must be positive, got {}",
                self.max_lifetime
            )));
        }
        if !(self.stroke_width.is_finite() && self.stroke_width >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "stroke_width must be non-negative, got {}",
                self.stroke_width
            )));
        }
        if !(self.viewport.width > 0.0 && self.viewport.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_default() {
        assert_eq!(SimConfig::from_json_str("{}").unwrap(), SimConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = SimConfig::from_json_str(r#"{"batch_size": 5, "expire_action": "hide", "seed": 9}"#).unwrap();
        assert_eq!(config.batch_size, 5);
        assert_eq!(config.expire_action, ExpireAction::Hide);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.speed, 0.1);
    }

    #[test]
    fn default_palette_matches_classic_colors() {
        let palette = Palette::default();
        assert_eq!(palette.background, Color::WHITE);
        assert_eq!(palette.box_fill, Color::hex(0xf28d89));
    }

    #[test]
    fn zero_batch_is_invalid() {
        let err = SimConfig::from_json_str(r#"{"batch_size": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn negative_lifetime_is_invalid() {
        let config = SimConfig {
            max_lifetime: -1.0,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = SimConfig::from_json_str("{ batch_size: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = SimConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn pretty_json_reloads() {
        let config = SimConfig {
            seed: Some(3),
            ..SimConfig::default()
        };
        let json = config.to_json_pretty().unwrap();
        assert_eq!(SimConfig::from_json_str(&json).unwrap(), config);
    }
}
