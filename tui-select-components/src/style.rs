//! Presentation configuration for select fields

use ratatui::style::{Color, Style};
use serde::{Deserialize, Serialize};
use tui_select_core::Theme;

/// Default cap on the number of overlay rows shown before scrolling
pub const DEFAULT_MAX_HEIGHT: u16 = 200;

/// How the anchor field is drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldMode {
    /// Underline only
    Flat,
    /// Full border with the label in the top edge
    #[default]
    Outlined,
}

/// Overrides for the area around the field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerStyle {
    /// Background color (None = transparent)
    pub bg_color: Option<Color>,
    /// Horizontal padding (left and right)
    pub padding_x: u16,
    /// Vertical padding (top and bottom)
    pub padding_y: u16,
}

/// Presentation of a select field and its overlay
///
/// Everything here is optional in config files; omitted fields keep their
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectFieldStyle {
    pub mode: FieldMode,
    /// Patched onto the displayed text
    pub input_style: Style,
    /// Maximum overlay rows before the list scrolls
    pub max_height: u16,
    /// Color of the selected row (None = theme primary)
    pub active_color: Option<Color>,
    /// Per-field theme (None = default theme)
    pub theme: Option<Theme>,
    pub container: ContainerStyle,
}

impl Default for SelectFieldStyle {
    fn default() -> Self {
        Self {
            mode: FieldMode::default(),
            input_style: Style::default(),
            max_height: DEFAULT_MAX_HEIGHT,
            active_color: None,
            theme: None,
            container: ContainerStyle::default(),
        }
    }
}

impl SelectFieldStyle {
    pub fn with_mode(mut self, mode: FieldMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn with_active_color(mut self, color: Color) -> Self {
        self.active_color = Some(color);
        self
    }

    pub fn with_max_height(mut self, rows: u16) -> Self {
        self.max_height = rows;
        self
    }

    /// Theme in effect for this field
    pub fn theme(&self) -> Theme {
        self.theme.unwrap_or_default()
    }

    /// Foreground of the row matching the current value
    pub fn highlight_color(&self) -> Color {
        self.active_color
            .unwrap_or_else(|| self.theme().colors.primary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let style = SelectFieldStyle::default();
        assert_eq!(style.max_height, 200);
        assert_eq!(style.mode, FieldMode::Outlined);
        assert_eq!(style.highlight_color(), Theme::default().colors.primary);
    }

    #[test]
    fn test_active_color_overrides_theme() {
        let style = SelectFieldStyle::default()
            .with_theme(Theme::light())
            .with_active_color(Color::Green);
        assert_eq!(style.highlight_color(), Color::Green);

        let themed = SelectFieldStyle::default().with_theme(Theme::light());
        assert_eq!(themed.highlight_color(), Theme::light().colors.primary);
    }

    #[test]
    fn test_deserialize_partial() {
        let style: SelectFieldStyle =
            serde_json::from_str(r#"{"mode": "flat", "max_height": 5}"#).unwrap();
        assert_eq!(style.mode, FieldMode::Flat);
        assert_eq!(style.max_height, 5);
        assert_eq!(style.active_color, None);
    }
}
