//! Read-only text field that anchors a select overlay

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_select_core::{AnchorRef, Component, EventKind, SelectCommand, SelectKeys, Theme};

use crate::style::{ContainerStyle, FieldMode};

/// Props for Anchor component
pub struct AnchorProps<'a, A> {
    /// Text currently shown in the field
    pub text: &'a str,
    /// Title drawn in the field's border
    pub label: Option<&'a str>,
    /// Shown dimmed while `text` is empty
    pub placeholder: Option<&'a str>,
    pub is_focused: bool,
    /// Whether the overlay is open (flips the indicator)
    pub is_open: bool,
    pub mode: FieldMode,
    /// Patched onto the text style
    pub input_style: Style,
    pub container: &'a ContainerStyle,
    pub theme: Theme,
    pub keys: &'a SelectKeys,
    /// Callback when the field is activated
    pub on_activate: fn() -> A,
}

/// The always-visible part of a select field
///
/// Draws the current display text like a text input that cannot be typed
/// into, and records its own area in an [`AnchorRef`] on every render so the
/// overlay (and the host) can read it back.
#[derive(Default)]
pub struct Anchor {
    handle: AnchorRef,
}

impl Anchor {
    /// Create an anchor with a fresh handle
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an anchor that reports into a host-supplied handle
    pub fn with_handle(handle: AnchorRef) -> Self {
        Self { handle }
    }

    /// Shared handle to this anchor
    pub fn handle(&self) -> &AnchorRef {
        &self.handle
    }

    fn indicator(is_open: bool) -> &'static str {
        if is_open {
            "▴"
        } else {
            "▾"
        }
    }
}

impl<A> Component<A> for Anchor {
    type Props<'a> = AnchorProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if let Some((column, row)) = event.click_position() {
            return self
                .handle
                .contains(column, row)
                .then(|| (props.on_activate)());
        }

        match event {
            EventKind::Key(key) if props.is_focused && event.is_key_press() => {
                match props.keys.anchor_command(key) {
                    Some(SelectCommand::Open) => Some((props.on_activate)()),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.handle.set_layout(area.into());

        let colors = props.theme.colors;

        if let Some(bg) = props.container.bg_color {
            for y in area.y..area.y.saturating_add(area.height) {
                for x in area.x..area.x.saturating_add(area.width) {
                    frame.buffer_mut()[(x, y)].set_bg(bg);
                    frame.buffer_mut()[(x, y)].set_symbol(" ");
                }
            }
        }

        // Padding comes from config and may exceed the area
        let pad_x = props.container.padding_x.min(area.width / 2);
        let pad_y = props.container.padding_y.min(area.height / 2);
        let content_area = Rect {
            x: area.x.saturating_add(pad_x),
            y: area.y.saturating_add(pad_y),
            width: area.width.saturating_sub(pad_x.saturating_mul(2)),
            height: area.height.saturating_sub(pad_y.saturating_mul(2)),
        };

        let border_style = Style::default().fg(if props.is_focused || props.is_open {
            colors.border_focused
        } else {
            colors.border
        });
        let borders = match props.mode {
            FieldMode::Outlined => Borders::ALL,
            FieldMode::Flat => Borders::BOTTOM,
        };
        let mut block = Block::default()
            .borders(borders)
            .border_style(border_style);
        if let Some(label) = props.label {
            block = block.title(Line::styled(format!(" {} ", label), border_style));
        }
        let inner = block.inner(content_area);

        let mut base = Style::default();
        if let Some(bg) = props.container.bg_color {
            base = base.bg(bg);
        }

        let text = if props.text.is_empty() {
            Span::styled(
                props.placeholder.unwrap_or_default(),
                base.fg(colors.placeholder),
            )
        } else {
            Span::styled(props.text, base.fg(colors.text).patch(props.input_style))
        };

        frame.render_widget(block, content_area);
        frame.render_widget(Paragraph::new(Line::from(text)), inner);

        // Indicator in the last inner column
        if inner.width > 1 && inner.height > 0 {
            let x = inner.x + inner.width - 1;
            frame.buffer_mut().set_string(
                x,
                inner.y,
                Self::indicator(props.is_open),
                base.fg(border_style.fg.unwrap_or(colors.border)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_select_core::testing::{click, key_event, RenderHarness};

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Show,
    }

    struct Fixture {
        container: ContainerStyle,
        theme: Theme,
        keys: SelectKeys,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                container: ContainerStyle::default(),
                theme: Theme::default(),
                keys: SelectKeys::default(),
            }
        }

        fn props<'a>(&'a self, text: &'a str, is_focused: bool) -> AnchorProps<'a, TestAction> {
            AnchorProps {
                text,
                label: Some("Country"),
                placeholder: Some("Pick one"),
                is_focused,
                is_open: false,
                mode: FieldMode::Outlined,
                input_style: Style::default(),
                container: &self.container,
                theme: self.theme,
                keys: &self.keys,
                on_activate: || TestAction::Show,
            }
        }
    }

    #[test]
    fn test_enter_activates_when_focused() {
        let fx = Fixture::new();
        let mut anchor = Anchor::new();

        let actions: Vec<_> = anchor
            .handle_event(&key_event("enter"), fx.props("", true))
            .into_iter()
            .collect();
        assert_eq!(actions, vec![TestAction::Show]);
    }

    #[test]
    fn test_keys_ignored_when_unfocused() {
        let fx = Fixture::new();
        let mut anchor = Anchor::new();

        let actions: Vec<_> = anchor
            .handle_event(&key_event("enter"), fx.props("", false))
            .into_iter()
            .collect();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_click_inside_measured_area_activates() {
        let fx = Fixture::new();
        let mut anchor = Anchor::new();
        let mut render = RenderHarness::new(30, 6);
        render.render(|frame| anchor.render(frame, Rect::new(0, 1, 20, 3), fx.props("", false)));

        let inside: Vec<_> = anchor
            .handle_event(&click(5, 2), fx.props("", false))
            .into_iter()
            .collect();
        assert_eq!(inside, vec![TestAction::Show]);

        let outside: Vec<_> = anchor
            .handle_event(&click(25, 2), fx.props("", false))
            .into_iter()
            .collect();
        assert!(outside.is_empty());
    }

    #[test]
    fn test_click_before_first_layout_is_ignored() {
        let fx = Fixture::new();
        let mut anchor = Anchor::new();
        let actions: Vec<_> = anchor
            .handle_event(&click(0, 0), fx.props("", false))
            .into_iter()
            .collect();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_render_records_geometry() {
        let fx = Fixture::new();
        let handle = AnchorRef::new();
        let mut anchor = Anchor::with_handle(handle.clone());
        let mut render = RenderHarness::new(30, 6);
        render.render(|frame| anchor.render(frame, Rect::new(2, 1, 20, 3), fx.props("", false)));

        assert_eq!(handle.measure().map(|g| g.rect()), Some(Rect::new(2, 1, 20, 3)));
    }

    #[test]
    fn test_oversized_padding_renders_without_panic() {
        let mut fx = Fixture::new();
        fx.container.padding_x = 40000;
        fx.container.padding_y = u16::MAX;
        let handle = AnchorRef::new();
        let mut anchor = Anchor::with_handle(handle.clone());
        let mut render = RenderHarness::new(30, 6);

        let output = render.render_to_string_plain(|frame| {
            anchor.render(frame, Rect::new(2, 1, 20, 3), fx.props("Canada", true))
        });
        assert!(!output.contains("Canada"));
        assert_eq!(handle.measure().map(|g| g.rect()), Some(Rect::new(2, 1, 20, 3)));
    }

    #[test]
    fn test_render_text_label_and_placeholder() {
        let fx = Fixture::new();
        let mut anchor = Anchor::new();
        let mut render = RenderHarness::new(30, 3);

        let output = render.render_to_string_plain(|frame| {
            anchor.render(frame, frame.area(), fx.props("Canada", true))
        });
        assert!(output.contains("Canada"));
        assert!(output.contains("Country"));
        assert!(output.contains('▾'));

        let output = render.render_to_string_plain(|frame| {
            anchor.render(frame, frame.area(), fx.props("", true))
        });
        assert!(output.contains("Pick one"));
    }
}
