//! Interaction tuning: default sizes, toolbar defaults and resize clamps.

use crate::shapes::SerializableColor;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Tunable constants for the interaction state machine.
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InteractionConfig {
    /// Initial rectangle side and circle diameter.
    pub default_size: f64,
    /// Base size added to the drag offset while sizing a new shape.
    pub min_size: f64,
    /// Font size for new text before the toolbar changes it.
    pub default_font_size: u32,
    /// Font size mirrored into the toolbar when a non-text shape is selected.
    pub fallback_font_size: u32,
    /// Fill for new shapes before the toolbar changes it.
    pub default_fill: SerializableColor,
    /// Distance moved by one arrow key press.
    pub nudge_step: f64,
    /// Smallest rectangle side (and circle diameter) after a handle resize.
    pub min_transform_size: f64,
    /// Smallest text wrap width after a handle resize.
    pub text_min_width: f64,
    /// Smallest text font size after a handle resize.
    pub text_min_font_size: u32,
    /// Line height handed to the inline edit surface.
    pub line_height: f64,
    /// Font family handed to the inline edit surface.
    pub font_family: String,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            default_size: 100.0,
            min_size: 100.0,
            default_font_size: 50,
            fallback_font_size: 50,
            default_fill: SerializableColor::black(),
            nudge_step: 1.0,
            min_transform_size: 20.0,
            text_min_width: 20.0,
            text_min_font_size: 12,
            line_height: 1.0,
            font_family: "Arial".to_string(),
        }
    }
}

impl InteractionConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded interaction config from {}", path.display());
        Ok(config)
    }

    /// Reject values the state machine can't work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("defaultSize", self.default_size),
            ("minSize", self.min_size),
            ("nudgeStep", self.nudge_step),
            ("minTransformSize", self.min_transform_size),
            ("textMinWidth", self.text_min_width),
            ("lineHeight", self.line_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        let font_sizes = [
            ("defaultFontSize", self.default_font_size),
            ("fallbackFontSize", self.fallback_font_size),
            ("textMinFontSize", self.text_min_font_size),
        ];
        for (name, value) in font_sizes {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{} must be at least 1", name)));
            }
        }
        if self.font_family.trim().is_empty() {
            return Err(ConfigError::Invalid("fontFamily must not be empty".to_string()));
        }
        Ok(())
    }
}
