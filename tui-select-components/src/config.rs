//! Loading select field configuration from JSON

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tui_select_core::{InvalidKey, SelectKeys, Theme};

use crate::style::SelectFieldStyle;

/// Theme, key map and style for the select fields of an app
///
/// ```json
/// {
///   "theme": { "colors": { "primary": "#03dac6" } },
///   "keys": { "dismiss": ["esc", "q"] },
///   "style": { "mode": "flat", "max_height": 8 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectFieldConfig {
    pub theme: Theme,
    pub keys: SelectKeys,
    pub style: SelectFieldStyle,
}

/// Configuration loading error
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    InvalidKey(InvalidKey),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Could not read config {}: {}", path.display(), source)
            }
            ConfigError::Parse(e) => write!(f, "Invalid config: {}", e),
            ConfigError::InvalidKey(e) => write!(f, "Invalid key binding: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
            ConfigError::InvalidKey(e) => Some(e),
        }
    }
}

impl From<InvalidKey> for ConfigError {
    fn from(e: InvalidKey) -> Self {
        ConfigError::InvalidKey(e)
    }
}

impl SelectFieldConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.keys.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), "loaded select field config");
        Ok(config)
    }

    /// Field style with the config-level theme filled in where the style has none
    pub fn field_style(&self) -> SelectFieldStyle {
        SelectFieldStyle {
            theme: Some(self.style.theme.unwrap_or(self.theme)),
            ..self.style
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_empty_config_is_default() {
        let config = SelectFieldConfig::from_json("{}").unwrap();
        assert_eq!(config, SelectFieldConfig::default());
    }

    #[test]
    fn test_field_style_inherits_theme() {
        let config = SelectFieldConfig::from_json(
            r##"{"theme": {"colors": {"primary": "#03dac6"}}, "style": {"max_height": 8}}"##,
        )
        .unwrap();
        let style = config.field_style();
        assert_eq!(style.max_height, 8);
        assert_eq!(style.highlight_color(), Color::Rgb(3, 218, 198));
    }

    #[test]
    fn test_field_theme_wins_over_config_theme() {
        let mut config = SelectFieldConfig::default();
        config.style.theme = Some(Theme::light());
        assert_eq!(config.field_style().theme(), Theme::light());
    }

    #[test]
    fn test_invalid_key_rejected() {
        let err = SelectFieldConfig::from_json(r#"{"keys": {"next": ["super+j"]}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidKey(InvalidKey(ref k)) if k == "super+j"));
    }

    #[test]
    fn test_parse_error() {
        let err = SelectFieldConfig::from_json(r#"{"style": {"mode": "sideways"}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = SelectFieldConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
