//! Test utilities for select field hosts and components
//!
//! - [`key`]: build a `KeyEvent` from a string (`key("ctrl+p")`)
//! - [`click`] / [`scroll`]: build mouse events at a cell
//! - [`RenderHarness`]: render into a `TestBackend` and inspect the buffer
//! - [`TestHarness`]: host state plus an action channel
//! - `assert_emitted!` and friends for checking emitted actions
//!
//! # Example
//!
//! ```ignore
//! use tui_select::testing::{key, RenderHarness};
//!
//! let mut render = RenderHarness::new(40, 12);
//! let output = render.render_to_string_plain(|frame| {
//!     field.render(frame, Rect::new(0, 0, 40, 3), props);
//! });
//! assert!(output.contains("Canada"));
//! ```

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Frame, Terminal};
use tokio::sync::mpsc;

use crate::event::EventKind;
use crate::keybindings::parse_key_string;
use crate::Action;

/// Create a `KeyEvent` from a key string.
///
/// # Examples
///
/// ```
/// use tui_select_core::testing::key;
/// use crossterm::event::{KeyCode, KeyModifiers};
///
/// let k = key("q");
/// assert_eq!(k.code, KeyCode::Char('q'));
///
/// let k = key("ctrl+p");
/// assert!(k.modifiers.contains(KeyModifiers::CONTROL));
/// ```
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key_string(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// Create a `KeyEvent` for a character with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Key press wrapped as an `EventKind`
pub fn key_event(s: &str) -> EventKind {
    EventKind::Key(key(s))
}

/// Left-button press at a cell
pub fn click(column: u16, row: u16) -> EventKind {
    EventKind::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

/// Scroll wheel at a cell (positive delta = down)
pub fn scroll(column: u16, row: u16, delta: isize) -> EventKind {
    EventKind::Scroll { column, row, delta }
}

/// Convert a buffer to plain text, one line per row, trailing spaces trimmed
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    buffer_rect_to_string_plain(buffer, buffer.area)
}

/// Convert a region of a buffer to plain text
pub fn buffer_rect_to_string_plain(buffer: &Buffer, area: Rect) -> String {
    let area = area.intersection(buffer.area);
    (area.y..area.y + area.height)
        .map(|y| {
            let line: String = (area.x..area.x + area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect();
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Find the first cell where `text` starts, scanning rows top to bottom
pub fn find_text(buffer: &Buffer, text: &str) -> Option<(u16, u16)> {
    let needle: Vec<String> = text.chars().map(|c| c.to_string()).collect();
    if needle.is_empty() {
        return None;
    }
    let area = buffer.area;
    (area.y..area.y + area.height).find_map(|y| {
        let row: Vec<&str> = (area.x..area.x + area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect();
        row.windows(needle.len())
            .position(|window| window.iter().zip(&needle).all(|(a, b)| *a == b.as_str()))
            .map(|offset| (area.x + offset as u16, y))
    })
}

/// Renders components into an in-memory terminal
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// Create a harness with a `width` x `height` test terminal
    ///
    /// # Panics
    ///
    /// Panics if the test terminal cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .unwrap_or_else(|e| panic!("failed to create test terminal: {}", e));
        Self { terminal }
    }

    /// Render one frame and return the resulting buffer
    ///
    /// # Panics
    ///
    /// Panics if drawing fails.
    pub fn render(&mut self, f: impl FnOnce(&mut Frame)) -> &Buffer {
        self.terminal
            .draw(f)
            .unwrap_or_else(|e| panic!("failed to draw test frame: {}", e));
        self.terminal.backend().buffer()
    }

    /// Render one frame and return it as plain text
    pub fn render_to_string_plain(&mut self, f: impl FnOnce(&mut Frame)) -> String {
        buffer_to_string_plain(self.render(f))
    }

    /// Buffer from the most recent frame
    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }
}

/// Host state plus an action channel, for driving components in tests
///
/// # Example
///
/// ```ignore
/// let mut harness = TestHarness::<FormState, FormAction>::new(FormState::default());
/// harness.emit_all(field.handle_event(&key_event("enter"), props));
/// assert_eq!(harness.drain_emitted(), vec![FormAction::Open]);
/// ```
pub struct TestHarness<S, A: Action> {
    /// Host state under test
    pub state: S,
    tx: mpsc::UnboundedSender<A>,
    rx: mpsc::UnboundedReceiver<A>,
}

impl<S, A: Action> TestHarness<S, A> {
    /// Create a new test harness with the given initial state.
    pub fn new(state: S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { state, tx, rx }
    }

    /// Clone of the action sender
    pub fn sender(&self) -> mpsc::UnboundedSender<A> {
        self.tx.clone()
    }

    /// Emit an action
    pub fn emit(&self, action: A) {
        let _ = self.tx.send(action);
    }

    /// Emit everything a component returned, in order
    pub fn emit_all(&self, actions: impl IntoIterator<Item = A>) {
        for action in actions {
            self.emit(action);
        }
    }

    /// Drain all emitted actions from the channel.
    pub fn drain_emitted(&mut self) -> Vec<A> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    /// Drain emitted actions and run each through `reducer`
    ///
    /// Returns the drained actions so tests can still assert on them.
    pub fn apply(&mut self, reducer: fn(&mut S, A) -> bool) -> Vec<A> {
        let actions = self.drain_emitted();
        for action in &actions {
            reducer(&mut self.state, action.clone());
        }
        actions
    }
}

impl<S: Default, A: Action> Default for TestHarness<S, A> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

/// Assert that a specific action was emitted.
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that a specific action was NOT emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Count how many actions match a pattern.
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Open,
        Set(i32),
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Open => "Open",
                TestAction::Set(_) => "Set",
            }
        }
    }

    #[test]
    fn test_key_special() {
        assert_eq!(key("esc").code, KeyCode::Esc);
        assert_eq!(key("enter").code, KeyCode::Enter);
        assert_eq!(key("shift+tab").code, KeyCode::BackTab);
        assert_eq!(char_key('x').code, KeyCode::Char('x'));
    }

    #[test]
    fn test_click_builds_left_press() {
        assert_eq!(click(3, 9).click_position(), Some((3, 9)));
    }

    #[test]
    fn test_render_harness_plain_text() {
        let mut render = RenderHarness::new(12, 2);
        let output = render.render_to_string_plain(|frame| {
            frame.render_widget(Paragraph::new("hi there"), frame.area());
        });
        assert_eq!(output, "hi there\n");
        assert_eq!(find_text(render.buffer(), "there"), Some((3, 0)));
        assert_eq!(find_text(render.buffer(), "nope"), None);
    }

    #[test]
    fn test_harness_apply_runs_reducer_in_order() {
        fn reducer(state: &mut Vec<i32>, action: TestAction) -> bool {
            if let TestAction::Set(v) = action {
                state.push(v);
            }
            true
        }

        let mut harness = TestHarness::<Vec<i32>, TestAction>::default();
        harness.emit_all([TestAction::Set(1), TestAction::Open, TestAction::Set(2)]);
        let applied = harness.apply(reducer);

        assert_eq!(applied.len(), 3);
        assert_eq!(harness.state, vec![1, 2]);
        assert!(harness.drain_emitted().is_empty());
    }

    #[test]
    fn test_assert_macros() {
        let actions = vec![TestAction::Open, TestAction::Set(42)];

        assert_emitted!(actions, TestAction::Open);
        assert_emitted!(actions, TestAction::Set(42));
        assert_not_emitted!(actions, TestAction::Set(99));
        assert_eq!(count_emitted!(actions, TestAction::Set(_)), 1);
    }
}
