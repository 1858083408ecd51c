//! Editor configuration.

use crate::presets::{FILL, STROKE, ShapePresets};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Zoom multiplier used when none (or an unusable one) is configured.
pub const DEFAULT_SCALE_STEP: f64 = 0.5;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid editor configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options accepted when creating an [`EditorState`](crate::EditorState).
///
/// Every field is optional. In JSON the keys are `defaultFillColor`,
/// `defaultStrokeColor`, `scaleStep` and `presets`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub default_fill_color: Option<String>,
    pub default_stroke_color: Option<String>,
    pub scale_step: Option<f64>,
    pub presets: ShapePresets,
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration object from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_default_fill_color(mut self, color: impl Into<String>) -> Self {
        self.default_fill_color = Some(color.into());
        self
    }

    pub fn with_default_stroke_color(mut self, color: impl Into<String>) -> Self {
        self.default_stroke_color = Some(color.into());
        self
    }

    pub fn with_scale_step(mut self, step: f64) -> Self {
        self.scale_step = Some(step);
        self
    }

    pub fn with_presets(mut self, presets: ShapePresets) -> Self {
        self.presets = presets;
        self
    }

    /// Initial fill color; missing or empty falls back to [`FILL`].
    pub fn fill_color(&self) -> String {
        resolve_color(self.default_fill_color.as_deref(), FILL)
    }

    /// Initial stroke color; missing or empty falls back to [`STROKE`].
    pub fn stroke_color(&self) -> String {
        resolve_color(self.default_stroke_color.as_deref(), STROKE)
    }

    /// Zoom multiplier; missing, zero, negative or non-finite falls back to
    /// [`DEFAULT_SCALE_STEP`].
    pub fn scale_step(&self) -> f64 {
        self.scale_step.map_or(DEFAULT_SCALE_STEP, resolve_scale_step)
    }
}

fn resolve_color(color: Option<&str>, fallback: &str) -> String {
    match color {
        Some(color) if !color.is_empty() => color.to_string(),
        Some(_) => {
            log::warn!("Empty color configured, using {}", fallback);
            fallback.to_string()
        }
        None => fallback.to_string(),
    }
}

/// Validate a zoom multiplier.
pub(crate) fn resolve_scale_step(step: f64) -> f64 {
    if step.is_finite() && step > 0.0 {
        step
    } else {
        log::warn!("Unusable scale step {}, using {}", step, DEFAULT_SCALE_STEP);
        DEFAULT_SCALE_STEP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::new();
        assert_eq!(config.fill_color(), FILL);
        assert_eq!(config.stroke_color(), STROKE);
        assert!((config.scale_step() - DEFAULT_SCALE_STEP).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_json_camel_case() {
        let config = EditorConfig::from_json(
            r#"{"defaultFillColor": "red", "defaultStrokeColor": "blue", "scaleStep": 0.8}"#,
        )
        .unwrap();
        assert_eq!(config.fill_color(), "red");
        assert_eq!(config.stroke_color(), "blue");
        assert!((config.scale_step() - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_json_empty_object() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_from_json_rejects_wrong_types() {
        let result = EditorConfig::from_json(r#"{"scaleStep": "fast"}"#);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_unusable_values_fall_back() {
        let config = EditorConfig::new()
            .with_default_fill_color("")
            .with_default_stroke_color("")
            .with_scale_step(0.0);
        assert_eq!(config.fill_color(), FILL);
        assert_eq!(config.stroke_color(), STROKE);
        assert!((config.scale_step() - DEFAULT_SCALE_STEP).abs() < f64::EPSILON);

        assert!((resolve_scale_step(-2.0) - DEFAULT_SCALE_STEP).abs() < f64::EPSILON);
        assert!((resolve_scale_step(f64::NAN) - DEFAULT_SCALE_STEP).abs() < f64::EPSILON);
        assert!((resolve_scale_step(f64::INFINITY) - DEFAULT_SCALE_STEP).abs() < f64::EPSILON);
        assert!((resolve_scale_step(2.0) - 2.0).abs() < f64::EPSILON);
    }
}
