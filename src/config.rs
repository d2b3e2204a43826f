//! Application configuration, read from an optional JSON file.
//!
//! Every field has a default, so `{}` is a valid configuration.

use crate::charts::{
    parse_hex_color, to_hex_color, ChartConfig, ChartStyle, KeyMode, LayoutConfig,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 700.0,
        }
    }
}

/// Chart style as written in the config file; colours are `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub fill: String,
    pub highlight: String,
    pub stroke: String,
    pub stroke_width: f32,
    pub opacity: f32,
    pub hover_opacity: f32,
    pub font_size: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        let style = ChartStyle::default();
        Self {
            fill: to_hex_color(style.fill),
            highlight: to_hex_color(style.highlight),
            stroke: to_hex_color(style.stroke),
            stroke_width: style.stroke_width,
            opacity: style.opacity,
            hover_opacity: style.hover_opacity,
            font_size: style.font_size,
        }
    }
}

impl StyleConfig {
    fn to_style(&self) -> Result<ChartStyle, ConfigError> {
        let color = |field: &str, text: &str| {
            parse_hex_color(text).ok_or_else(|| invalid(field, format!("`{text}` is not #RRGGBB")))
        };
        let unit = |field: &str, value: f32| {
            if value.is_finite() && (0.0..=1.0).contains(&value) {
                Ok(value)
            } else {
                Err(invalid(field, format!("{value} is outside [0, 1]")))
            }
        };
        let positive = |field: &str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(value)
            } else {
                Err(invalid(field, format!("{value} must be positive")))
            }
        };

        Ok(ChartStyle {
            fill: color("style.fill", &self.fill)?,
            highlight: color("style.highlight", &self.highlight)?,
            stroke: color("style.stroke", &self.stroke)?,
            stroke_width: positive("style.stroke_width", self.stroke_width)?,
            opacity: unit("style.opacity", self.opacity)?,
            hover_opacity: unit("style.hover_opacity", self.hover_opacity)?,
            font_size: positive("style.font_size", self.font_size)?,
        })
    }
}

fn invalid(field: &str, reason: String) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub layout: LayoutConfig,
    pub style: StyleConfig,
    pub key_mode: KeyMode,
    /// Length of update transitions in milliseconds
    pub transition_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            layout: LayoutConfig::default(),
            style: StyleConfig::default(),
            key_mode: KeyMode::default(),
            transition_ms: 500,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.chart_config()?;
        Ok(config)
    }

    /// Validated chart configuration.
    pub fn chart_config(&self) -> Result<ChartConfig, ConfigError> {
        self.layout
            .validate()
            .map_err(|field| invalid(&format!("layout.{field}"), "out of range".to_string()))?;

        Ok(ChartConfig {
            layout: self.layout,
            style: self.style.to_style()?,
            key_mode: self.key_mode,
            transition: Duration::from_millis(self.transition_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{DEFAULT_FILL, HIGHLIGHT_FILL};
    use std::io::Write;

    #[test]
    fn empty_object_gives_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());

        let chart = config.chart_config().unwrap();
        assert_eq!(chart, ChartConfig::default());
        assert_eq!(chart.style.fill, DEFAULT_FILL);
        assert_eq!(chart.style.highlight, HIGHLIGHT_FILL);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_json(
            r##"{"layout": {"ceiling": 100.0}, "key_mode": "label", "style": {"fill": "#112233"}}"##,
        )
        .unwrap();
        let chart = config.chart_config().unwrap();
        assert_eq!(chart.layout.ceiling, 100.0);
        assert_eq!(chart.layout.usable_width, 0.97);
        assert_eq!(chart.key_mode, KeyMode::Label);
        assert_eq!(chart.style.fill, egui::Color32::from_rgb(0x11, 0x22, 0x33));
        assert_eq!(chart.style.opacity, 0.5);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = AppConfig::from_json(r#"{"layout": {"ceiling": -1.0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "layout.ceiling"));

        let err = AppConfig::from_json(r#"{"style": {"opacity": 2.0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "style.opacity"));

        let err = AppConfig::from_json(r#"{"style": {"fill": "teal"}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "style.fill"));
    }

    #[test]
    fn rejects_unknown_key_mode() {
        let err = AppConfig::from_json(r#"{"key_mode": "random"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"transition_ms": 250, "window": {{"width": 800.0}}}}"#).unwrap();
        file.flush().unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.transition_ms, 250);
        assert_eq!(config.window.width, 800.0);
        assert_eq!(config.window.height, 700.0);
        assert_eq!(
            config.chart_config().unwrap().transition,
            Duration::from_millis(250)
        );
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
