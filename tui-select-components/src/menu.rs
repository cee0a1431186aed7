//! Popup list of selectable rows bound to an anchor

use std::marker::PhantomData;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListState},
    Frame,
};
use tui_select_core::{Component, EventKind, LayoutGeometry, SelectCommand, SelectKeys, Theme};

use crate::item::{position_of, ListItem};

/// Props for Menu component
pub struct MenuProps<'a, T, A> {
    /// Rows, in render order
    pub list: &'a [ListItem<T>],
    /// Current selection (its row is drawn in `active_color`)
    pub value: Option<&'a T>,
    /// Last measured anchor box; nothing is drawn before the first layout
    pub anchor: Option<LayoutGeometry>,
    /// Maximum visible rows before scrolling
    pub max_height: u16,
    pub active_color: Color,
    pub theme: Theme,
    pub keys: &'a SelectKeys,
    /// Callback receiving the chosen value
    pub on_select: Option<fn(T) -> A>,
    /// Callback when the overlay should close
    pub on_dismiss: Option<fn() -> A>,
}

/// Overlay listing the rows of a select field
///
/// Sits directly below its anchor and exactly as wide. Keeps a keyboard
/// cursor and scroll offset; selection and visibility stay with the host.
pub struct Menu<T> {
    cursor: usize,
    scroll_offset: usize,
    /// Rows that fit in the last rendered viewport
    viewport: usize,
    /// Overlay rect from the last render
    area: Option<Rect>,
    _value: PhantomData<fn() -> T>,
}

impl<T> Default for Menu<T> {
    fn default() -> Self {
        Self {
            cursor: 0,
            scroll_offset: 0,
            viewport: 0,
            area: None,
            _value: PhantomData,
        }
    }
}

impl<T: PartialEq + Clone> Menu<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Area the overlay occupies for `rows` entries below `anchor`
    ///
    /// Width and left edge come from the anchor, the top edge is the anchor's
    /// top plus its height. Rows are capped at `max_height`, then the whole
    /// box (borders included) is clamped to `bounds`.
    pub fn overlay_area(anchor: LayoutGeometry, rows: usize, max_height: u16, bounds: Rect) -> Rect {
        let rows = u16::try_from(rows).unwrap_or(u16::MAX).min(max_height);
        anchor.below(rows.saturating_add(2), bounds)
    }

    /// Reset the cursor for a fresh opening: on the selected row, else the first
    pub fn open(&mut self, list: &[ListItem<T>], value: Option<&T>) {
        self.cursor = value.and_then(|v| position_of(list, v)).unwrap_or(0);
        self.scroll_offset = 0;
        self.viewport = 0;
        self.area = None;
    }

    /// Row under the keyboard cursor
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Overlay rect from the last render
    pub fn area(&self) -> Option<Rect> {
        self.area
    }

    fn ensure_visible(&mut self) {
        if self.viewport == 0 {
            return;
        }

        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + self.viewport {
            self.scroll_offset = self.cursor.saturating_sub(self.viewport - 1);
        }
    }

    fn move_cursor(&mut self, command: SelectCommand, len: usize) {
        let last = len.saturating_sub(1);
        self.cursor = match command {
            SelectCommand::Next => (self.cursor + 1).min(last),
            SelectCommand::Prev => self.cursor.saturating_sub(1),
            SelectCommand::First => 0,
            SelectCommand::Last => last,
            _ => self.cursor,
        };
        self.ensure_visible();
    }

    fn scroll_by(&mut self, delta: isize, len: usize) {
        let max_offset = len.saturating_sub(self.viewport);
        self.scroll_offset = self
            .scroll_offset
            .saturating_add_signed(delta)
            .min(max_offset);
        if self.viewport > 0 {
            self.cursor = self
                .cursor
                .clamp(self.scroll_offset, self.scroll_offset + self.viewport - 1)
                .min(len.saturating_sub(1));
        }
    }

    /// Row index under a cell, if the cell is on a row
    fn row_at(&self, column: u16, row: u16, len: usize) -> Option<usize> {
        let inner = Block::default().borders(Borders::ALL).inner(self.area?);
        if !inner.contains((column, row).into()) {
            return None;
        }
        let index = self.scroll_offset + usize::from(row - inner.y);
        (index < len).then_some(index)
    }

    fn select<A>(&self, index: usize, props: &MenuProps<'_, T, A>) -> Vec<A> {
        let Some(item) = props.list.get(index) else {
            return Vec::new();
        };
        tracing::debug!(index, label = %item.label, "select field row chosen");

        let mut actions = Vec::with_capacity(2);
        if let Some(on_select) = props.on_select {
            actions.push(on_select(item.value.clone()));
        }
        if let Some(on_dismiss) = props.on_dismiss {
            actions.push(on_dismiss());
        }
        actions
    }

    fn dismiss<A>(props: &MenuProps<'_, T, A>) -> Vec<A> {
        tracing::debug!("select field dismissed");
        props.on_dismiss.map(|f| f()).into_iter().collect()
    }
}

impl<T: PartialEq + Clone + 'static, A> Component<A> for Menu<T> {
    type Props<'a> = MenuProps<'a, T, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        let len = props.list.len();

        if let Some((column, row)) = event.click_position() {
            if let Some(index) = self.row_at(column, row, len) {
                self.cursor = index;
                return self.select(index, &props);
            }
            let inside = self
                .area
                .is_some_and(|area| area.contains((column, row).into()));
            return if inside {
                Vec::new()
            } else {
                Self::dismiss(&props)
            };
        }

        match event {
            EventKind::Key(key) if event.is_key_press() => {
                match props.keys.overlay_command(key) {
                    Some(SelectCommand::Dismiss) => Self::dismiss(&props),
                    Some(SelectCommand::Confirm) => self.select(self.cursor, &props),
                    Some(command) => {
                        self.move_cursor(command, len);
                        Vec::new()
                    }
                    None => Vec::new(),
                }
            }
            EventKind::Scroll { column, row, delta } => {
                let over = self
                    .area
                    .is_some_and(|area| area.contains((*column, *row).into()));
                if over {
                    self.scroll_by(*delta, len);
                }
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let Some(anchor) = props.anchor else {
            return;
        };

        let overlay = Self::overlay_area(anchor, props.list.len(), props.max_height, area);
        self.area = Some(overlay);
        if overlay.height == 0 || overlay.width == 0 {
            return;
        }

        let colors = props.theme.colors;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.border_focused))
            .style(Style::default().bg(colors.surface));
        self.viewport = usize::from(block.inner(overlay).height);
        self.cursor = self.cursor.min(props.list.len().saturating_sub(1));
        self.ensure_visible();

        let rows: Vec<ratatui::widgets::ListItem> = props
            .list
            .iter()
            .map(|item| {
                let fg = if props.value == Some(&item.value) {
                    props.active_color
                } else {
                    colors.text
                };
                ratatui::widgets::ListItem::new(item.row_line()).style(Style::default().fg(fg))
            })
            .collect();

        let list = List::new(rows).block(block).highlight_style(
            Style::default()
                .bg(colors.cursor)
                .add_modifier(Modifier::BOLD),
        );

        let mut state = ListState::default().with_selected((!props.list.is_empty()).then_some(self.cursor));
        *state.offset_mut() = self.scroll_offset;

        frame.render_widget(Clear, overlay);
        frame.render_stateful_widget(list, overlay, &mut state);
    }
}
