//! Component trait for controlled UI elements

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A controlled UI component that renders from props and emits actions
///
/// Components follow these rules:
/// 1. Props carry ALL host-owned data needed for rendering (selection, visibility)
/// 2. `handle_event` returns actions, never mutates host state
/// 3. `render` is a function of props plus internal UI state
///
/// Internal UI state (cached display text, measured geometry, cursor position)
/// lives in `&mut self`. Anything the host owns changes only through actions.
///
/// # Example
///
/// ```ignore
/// use tui_select::prelude::*;
///
/// impl Component<AppAction> for Toggle {
///     type Props<'a> = ToggleProps;
///
///     fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> impl IntoIterator<Item = AppAction> {
///         match event {
///             EventKind::Key(key) if props.is_focused && key.code == KeyCode::Enter => {
///                 Some((props.on_toggle)())
///             }
///             _ => None,
///         }
///     }
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
///         let text = if props.on { "[x]" } else { "[ ]" };
///         frame.render_widget(Paragraph::new(text), area);
///     }
/// }
/// ```
pub trait Component<A> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Handle an event and return actions for the host to dispatch
    ///
    /// Returns any `IntoIterator<Item = A>`: `None`, `Some(action)`, or a `Vec`
    /// when one gesture produces several actions. Order is significant; the
    /// host must dispatch them in the order yielded.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Render the component to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
