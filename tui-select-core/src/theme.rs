//! Color theme shared by select fields

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Named colors a field draws with
///
/// `primary` is the default highlight for the selected row, `text` the color
/// of every other row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    pub primary: Color,
    pub text: Color,
    pub placeholder: Color,
    pub surface: Color,
    pub border: Color,
    pub border_focused: Color,
    /// Background of the row under the keyboard cursor
    pub cursor: Color,
}

/// Theme for select fields and their overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub dark: bool,
    pub colors: ThemeColors,
}

impl Theme {
    /// Light palette
    pub fn light() -> Self {
        Self {
            dark: false,
            colors: ThemeColors {
                primary: Color::Rgb(98, 0, 238),
                text: Color::Black,
                placeholder: Color::Gray,
                surface: Color::White,
                border: Color::Gray,
                border_focused: Color::Rgb(98, 0, 238),
                cursor: Color::Rgb(230, 230, 235),
            },
        }
    }

    /// Dark palette (default, since most terminals are dark)
    pub fn dark() -> Self {
        Self {
            dark: true,
            colors: ThemeColors {
                primary: Color::Rgb(187, 134, 252),
                text: Color::White,
                placeholder: Color::DarkGray,
                surface: Color::Rgb(30, 30, 40),
                border: Color::DarkGray,
                border_focused: Color::Cyan,
                cursor: Color::Rgb(45, 50, 70),
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Theme::dark().colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_colors_fall_back_to_dark() {
        let theme: Theme =
            serde_json::from_str(r##"{"colors": {"primary": "#ff8800"}}"##).unwrap();
        assert_eq!(theme.colors.primary, Color::Rgb(255, 136, 0));
        assert_eq!(theme.colors.text, Theme::dark().colors.text);
        assert!(theme.dark);
    }

    #[test]
    fn test_named_colors() {
        let colors: ThemeColors = serde_json::from_str(r#"{"text": "yellow"}"#).unwrap();
        assert_eq!(colors.text, Color::Yellow);
    }
}
