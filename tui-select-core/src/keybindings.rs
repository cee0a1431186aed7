//! Key strings and the select field key map

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Commands a select field understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectCommand {
    /// Ask the host to open the overlay (anchor focused, overlay closed)
    Open,
    /// Move the overlay cursor down
    Next,
    /// Move the overlay cursor up
    Prev,
    /// Jump to the first row
    First,
    /// Jump to the last row
    Last,
    /// Select the row under the cursor
    Confirm,
    /// Ask the host to close the overlay without selecting
    Dismiss,
}

/// Key strings bound to each [`SelectCommand`]
///
/// Deserializes from a map such as `{"next": ["down", "j"], "dismiss": ["esc"]}`.
/// Commands left out keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectKeys {
    pub open: Vec<String>,
    pub next: Vec<String>,
    pub prev: Vec<String>,
    pub first: Vec<String>,
    pub last: Vec<String>,
    pub confirm: Vec<String>,
    pub dismiss: Vec<String>,
}

fn strings(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

impl Default for SelectKeys {
    fn default() -> Self {
        Self {
            open: strings(&["enter", "space", "down"]),
            next: strings(&["down", "j"]),
            prev: strings(&["up", "k"]),
            first: strings(&["home", "g"]),
            last: strings(&["end", "G"]),
            confirm: strings(&["enter", "space"]),
            dismiss: strings(&["esc", "tab"]),
        }
    }
}

/// A key string in a [`SelectKeys`] map that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidKey(pub String);

impl std::fmt::Display for InvalidKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid key string: {:?}", self.0)
    }
}

impl std::error::Error for InvalidKey {}

impl SelectKeys {
    /// Check that every bound key string parses
    pub fn validate(&self) -> Result<(), InvalidKey> {
        self.bindings()
            .flat_map(|(_, keys)| keys.iter())
            .find(|k| parse_key_string(k).is_none())
            .map_or(Ok(()), |bad| Err(InvalidKey(bad.clone())))
    }

    /// Command for a key while the overlay is closed
    pub fn anchor_command(&self, key: &KeyEvent) -> Option<SelectCommand> {
        any_matches(&self.open, key).then_some(SelectCommand::Open)
    }

    /// Command for a key while the overlay is open
    ///
    /// Navigation is checked before confirm/dismiss so a key bound to both
    /// (unusual) navigates.
    pub fn overlay_command(&self, key: &KeyEvent) -> Option<SelectCommand> {
        self.bindings()
            .filter(|(cmd, _)| *cmd != SelectCommand::Open)
            .find(|(_, keys)| any_matches(keys, key))
            .map(|(cmd, _)| cmd)
    }

    fn bindings(&self) -> impl Iterator<Item = (SelectCommand, &Vec<String>)> {
        [
            (SelectCommand::Open, &self.open),
            (SelectCommand::Next, &self.next),
            (SelectCommand::Prev, &self.prev),
            (SelectCommand::First, &self.first),
            (SelectCommand::Last, &self.last),
            (SelectCommand::Confirm, &self.confirm),
            (SelectCommand::Dismiss, &self.dismiss),
        ]
        .into_iter()
    }
}

fn any_matches(bindings: &[String], key: &KeyEvent) -> bool {
    bindings
        .iter()
        .filter_map(|s| parse_key_string(s))
        .any(|bound| key_matches(&bound, key))
}

/// Compare a bound key with an incoming one, ignoring kind and state
///
/// Character keys compare exactly and ignore SHIFT, since terminals report
/// `G` as `Char('G')` with or without the modifier.
pub fn key_matches(bound: &KeyEvent, key: &KeyEvent) -> bool {
    match (bound.code, key.code) {
        (KeyCode::Char(a), KeyCode::Char(b)) => {
            a == b
                && bound.modifiers.difference(KeyModifiers::SHIFT)
                    == key.modifiers.difference(KeyModifiers::SHIFT)
        }
        (a, b) => a == b && bound.modifiers == key.modifiers,
    }
}

/// Parse a key string like "q", "G", "esc", "ctrl+p", "shift+tab" into a KeyEvent
///
/// Modifier and named-key parts are case-insensitive; a single character
/// keeps its case.
pub fn parse_key_string(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim();
    if key_str.is_empty() {
        return None;
    }

    let (mod_parts, key_part) = match key_str.rsplit_once('+') {
        // "+" on its own, or "ctrl++"
        Some((mods, "")) => (mods.trim_end_matches('+'), "+"),
        Some((mods, key)) => (mods, key),
        None => ("", key_str),
    };

    let mut modifiers = KeyModifiers::empty();
    for part in mod_parts.split('+').map(str::trim).filter(|p| !p.is_empty()) {
        match part.to_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return None,
        }
    }

    let key_part = key_part.trim();
    let code = if key_part.chars().count() == 1 {
        KeyCode::Char(key_part.chars().next()?)
    } else {
        let named = key_part.to_lowercase();
        match named.as_str() {
            "esc" | "escape" => KeyCode::Esc,
            "enter" | "return" => KeyCode::Enter,
            "tab" if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
            "tab" => KeyCode::Tab,
            "backtab" => {
                modifiers |= KeyModifiers::SHIFT;
                KeyCode::BackTab
            }
            "backspace" => KeyCode::Backspace,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            "delete" => KeyCode::Delete,
            "insert" => KeyCode::Insert,
            "space" => KeyCode::Char(' '),
            f => {
                let n: u8 = f.strip_prefix('f')?.parse().ok()?;
                if !(1..=12).contains(&n) {
                    return None;
                }
                KeyCode::F(n)
            }
        }
    };

    Some(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

/// Format a key string for a help line ("ctrl+p" -> "^P", "esc" -> "Esc")
pub fn format_key_for_display(key_str: &str) -> String {
    let Some(key) = parse_key_string(key_str) else {
        return key_str.to_string();
    };

    let mut out = String::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        out.push('^');
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        out.push_str("Alt+");
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) && key.code != KeyCode::BackTab {
        out.push_str("Shift+");
    }

    let name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            c.to_uppercase().to_string()
        }
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::BackTab => "Shift+Tab".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Up => "↑".into(),
        KeyCode::Down => "↓".into(),
        KeyCode::Left => "←".into(),
        KeyCode::Right => "→".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PgUp".into(),
        KeyCode::PageDown => "PgDn".into(),
        KeyCode::Delete => "Del".into(),
        KeyCode::Insert => "Ins".into(),
        KeyCode::F(n) => format!("F{}", n),
        other => format!("{:?}", other),
    };
    out.push_str(&name);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_and_named() {
        assert_eq!(parse_key_string("q").map(|k| k.code), Some(KeyCode::Char('q')));
        assert_eq!(parse_key_string("ESC").map(|k| k.code), Some(KeyCode::Esc));
        assert_eq!(parse_key_string("space").map(|k| k.code), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key_string("f5").map(|k| k.code), Some(KeyCode::F(5)));
        assert!(parse_key_string("f13").is_none());
        assert!(parse_key_string("").is_none());
        assert!(parse_key_string("hyper+x").is_none());
    }

    #[test]
    fn test_parse_keeps_char_case() {
        assert_eq!(parse_key_string("G").map(|k| k.code), Some(KeyCode::Char('G')));
        assert_eq!(parse_key_string("g").map(|k| k.code), Some(KeyCode::Char('g')));
    }

    #[test]
    fn test_parse_modifiers() {
        let k = parse_key_string("Ctrl+p").unwrap();
        assert_eq!(k.code, KeyCode::Char('p'));
        assert!(k.modifiers.contains(KeyModifiers::CONTROL));

        let k = parse_key_string("shift+tab").unwrap();
        assert_eq!(k.code, KeyCode::BackTab);

        let k = parse_key_string("ctrl++").unwrap();
        assert_eq!(k.code, KeyCode::Char('+'));
        assert!(k.modifiers.contains(KeyModifiers::CONTROL));
    }

    #[test]
    fn test_shifted_char_matches_binding() {
        let bound = parse_key_string("G").unwrap();
        let incoming = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert!(key_matches(&bound, &incoming));

        let lower = KeyEvent::new(KeyCode::Char('g'), KeyModifiers::NONE);
        assert!(!key_matches(&bound, &lower));
    }

    #[test]
    fn test_default_commands() {
        let keys = SelectKeys::default();
        let enter = parse_key_string("enter").unwrap();
        let down = parse_key_string("down").unwrap();
        let esc = parse_key_string("esc").unwrap();
        let x = parse_key_string("x").unwrap();

        assert_eq!(keys.anchor_command(&enter), Some(SelectCommand::Open));
        assert_eq!(keys.anchor_command(&down), Some(SelectCommand::Open));
        assert_eq!(keys.anchor_command(&x), None);

        assert_eq!(keys.overlay_command(&down), Some(SelectCommand::Next));
        assert_eq!(keys.overlay_command(&enter), Some(SelectCommand::Confirm));
        assert_eq!(keys.overlay_command(&esc), Some(SelectCommand::Dismiss));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let keys: SelectKeys = serde_json::from_str(r#"{"next": ["n"]}"#).unwrap();
        assert_eq!(keys.next, vec!["n".to_string()]);
        assert_eq!(keys.dismiss, SelectKeys::default().dismiss);
    }

    #[test]
    fn test_validate_reports_bad_key() {
        let keys = SelectKeys {
            confirm: vec!["enter".into(), "meta+q".into()],
            ..Default::default()
        };
        assert_eq!(keys.validate(), Err(InvalidKey("meta+q".into())));
        assert!(SelectKeys::default().validate().is_ok());
    }

    #[test]
    fn test_format_key_for_display() {
        assert_eq!(format_key_for_display("ctrl+p"), "^P");
        assert_eq!(format_key_for_display("esc"), "Esc");
        assert_eq!(format_key_for_display("space"), "Space");
        assert_eq!(format_key_for_display("j"), "j");
        assert_eq!(format_key_for_display("shift+tab"), "Shift+Tab");
    }
}
