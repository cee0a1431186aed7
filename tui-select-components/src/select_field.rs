//! Controlled select field: anchor plus popup overlay

use ratatui::{layout::Rect, Frame};
use tui_select_core::{AnchorRef, Component, EventKind, LayoutGeometry, SelectKeys};

use crate::anchor::{Anchor, AnchorProps};
use crate::item::{label_for, ListItem};
use crate::menu::{Menu, MenuProps};
use crate::style::SelectFieldStyle;

/// Props for SelectField component
pub struct SelectFieldProps<'a, T, A> {
    /// Entries, in render order
    pub list: &'a [ListItem<T>],
    /// Current selection, owned by the host
    pub value: Option<&'a T>,
    /// Whether the overlay is open, owned by the host
    pub visible: bool,
    /// Whether the field has keyboard focus
    pub is_focused: bool,
    pub label: Option<&'a str>,
    pub placeholder: Option<&'a str>,
    pub style: &'a SelectFieldStyle,
    pub keys: &'a SelectKeys,
    /// Callback when the anchor is activated (request to open)
    pub on_show: fn() -> A,
    /// Callback receiving the chosen value
    pub on_select: Option<fn(T) -> A>,
    /// Callback when the overlay should close
    pub on_dismiss: Option<fn() -> A>,
}

/// Inputs the display text was last derived from
struct SyncSnapshot<T> {
    entries: Vec<(String, T)>,
    value: Option<T>,
}

impl<T: PartialEq> SyncSnapshot<T> {
    fn matches(&self, list: &[ListItem<T>], value: Option<&T>) -> bool {
        self.value.as_ref() == value
            && self.entries.len() == list.len()
            && self
                .entries
                .iter()
                .zip(list)
                .all(|((label, v), item)| *label == item.label && *v == item.value)
    }
}

/// A dropdown built from a read-only field and a popup list
///
/// Fully controlled: the host owns `value` and `visible` and changes them in
/// response to the actions this component returns. The component owns the
/// text shown in the field, the anchor's measured geometry, and the overlay's
/// cursor.
///
/// The display text is re-derived only when `list` or `value` differ from the
/// inputs it was last derived from. When the value matches no item the
/// previous text stays.
///
/// The overlay draws outside the area given to `render`. Render select fields
/// after the widgets around them, or call [`SelectField::render_anchor`] and
/// [`SelectField::render_overlay`] separately.
pub struct SelectField<T> {
    anchor: Anchor,
    menu: Menu<T>,
    display_text: String,
    synced: Option<SyncSnapshot<T>>,
    was_visible: bool,
}

impl<T: PartialEq + Clone> Default for SelectField<T> {
    fn default() -> Self {
        Self::with_anchor(AnchorRef::new())
    }
}

impl<T: PartialEq + Clone> SelectField<T> {
    /// Create a new SelectField
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a field whose anchor reports into `anchor`
    ///
    /// The host keeps a clone of the handle to measure or hit-test the anchor.
    pub fn with_anchor(anchor: AnchorRef) -> Self {
        Self {
            anchor: Anchor::with_handle(anchor),
            menu: Menu::new(),
            display_text: String::new(),
            synced: None,
            was_visible: false,
        }
    }

    /// Handle to the anchor element
    pub fn anchor_ref(&self) -> AnchorRef {
        self.anchor.handle().clone()
    }

    /// Anchor geometry from the last layout pass
    pub fn anchor_geometry(&self) -> Option<LayoutGeometry> {
        self.anchor.handle().measure()
    }

    /// Text currently shown in the field
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    /// Overlay area from the last render, if it was open
    pub fn overlay_area(&self) -> Option<Rect> {
        if self.was_visible {
            self.menu.area()
        } else {
            None
        }
    }

    /// Re-derive the display text from `list` and `value`
    ///
    /// Takes the label of the first item whose value equals `value`. If there
    /// is none the current text is kept. Returns whether the text changed.
    pub fn sync(&mut self, list: &[ListItem<T>], value: Option<&T>) -> bool {
        let changed = match value.and_then(|v| label_for(list, v)) {
            Some(label) if label != self.display_text => {
                self.display_text = label.to_string();
                true
            }
            _ => false,
        };

        self.synced = Some(SyncSnapshot {
            entries: list
                .iter()
                .map(|item| (item.label.clone(), item.value.clone()))
                .collect(),
            value: value.cloned(),
        });

        tracing::trace!(
            display = %self.display_text,
            changed,
            "select field display synced"
        );
        changed
    }

    fn sync_if_changed(&mut self, list: &[ListItem<T>], value: Option<&T>) {
        let stale = self
            .synced
            .as_ref()
            .is_none_or(|snapshot| !snapshot.matches(list, value));
        if stale {
            self.sync(list, value);
        }
    }

    /// Track the host's `visible` flag, resetting the overlay when it opens
    fn track_visibility<A>(&mut self, props: &SelectFieldProps<'_, T, A>) {
        if props.visible && !self.was_visible {
            tracing::debug!(rows = props.list.len(), "select field opened");
            self.menu.open(props.list, props.value);
        }
        self.was_visible = props.visible;
    }
}

fn anchor_props<'a, T, A>(text: &'a str, props: &SelectFieldProps<'a, T, A>) -> AnchorProps<'a, A> {
    AnchorProps {
        text,
        label: props.label,
        placeholder: props.placeholder,
        is_focused: props.is_focused,
        is_open: props.visible,
        mode: props.style.mode,
        input_style: props.style.input_style,
        container: &props.style.container,
        theme: props.style.theme(),
        keys: props.keys,
        on_activate: props.on_show,
    }
}

fn menu_props<'a, T, A>(
    anchor: Option<LayoutGeometry>,
    props: &SelectFieldProps<'a, T, A>,
) -> MenuProps<'a, T, A> {
    MenuProps {
        list: props.list,
        value: props.value,
        anchor,
        max_height: props.style.max_height,
        active_color: props.style.highlight_color(),
        theme: props.style.theme(),
        keys: props.keys,
        on_select: props.on_select,
        on_dismiss: props.on_dismiss,
    }
}

impl<T: PartialEq + Clone + 'static> SelectField<T> {
    /// Draw the field into `area` and record its geometry
    pub fn render_anchor<A>(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        props: &SelectFieldProps<'_, T, A>,
    ) {
        self.sync_if_changed(props.list, props.value);
        self.anchor
            .render(frame, area, anchor_props(&self.display_text, props));
    }

    /// Draw the overlay if the host has it open
    ///
    /// Positions against the anchor geometry from the most recent
    /// [`SelectField::render_anchor`], clamped to the frame.
    pub fn render_overlay<A>(&mut self, frame: &mut Frame, props: &SelectFieldProps<'_, T, A>) {
        self.track_visibility(props);
        if !props.visible {
            return;
        }
        let anchor = self.anchor_geometry();
        let area = frame.area();
        self.menu.render(frame, area, menu_props(anchor, props));
    }
}

impl<T: PartialEq + Clone + 'static, A> Component<A> for SelectField<T> {
    type Props<'a> = SelectFieldProps<'a, T, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        self.sync_if_changed(props.list, props.value);
        self.track_visibility(&props);

        if props.visible {
            let anchor = self.anchor_geometry();
            self.menu
                .handle_event(event, menu_props(anchor, &props))
                .into_iter()
                .collect::<Vec<A>>()
        } else {
            let actions: Vec<A> = self
                .anchor
                .handle_event(event, anchor_props(&self.display_text, &props))
                .into_iter()
                .collect();
            if !actions.is_empty() {
                tracing::debug!("select field open requested");
            }
            actions
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.render_anchor(frame, area, &props);
        self.render_overlay(frame, &props);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes() -> Vec<ListItem<u8>> {
        vec![
            ListItem::new("Small", 1),
            ListItem::new("Medium", 2),
            ListItem::new("Large", 3),
        ]
    }

    #[test]
    fn test_snapshot_matches_same_inputs_only() {
        let list = sizes();
        let mut field = SelectField::new();
        field.sync(&list, Some(&2));

        let snapshot = field.synced.as_ref().unwrap();
        assert!(snapshot.matches(&list, Some(&2)));
        assert!(!snapshot.matches(&list, Some(&3)));
        assert!(!snapshot.matches(&list, None));
        assert!(!snapshot.matches(&list[..2], Some(&2)));

        let mut relabeled = sizes();
        relabeled[1].label = "Regular".into();
        assert!(!snapshot.matches(&relabeled, Some(&2)));
    }

    #[test]
    fn test_sync_if_changed_skips_identical_inputs() {
        let list = sizes();
        let mut field = SelectField::new();
        field.sync_if_changed(&list, Some(&1));
        assert_eq!(field.display_text(), "Small");

        // Text edited behind the snapshot's back survives an identical resync
        field.display_text = "stale".into();
        field.sync_if_changed(&list, Some(&1));
        assert_eq!(field.display_text(), "stale");

        field.sync_if_changed(&list, Some(&3));
        assert_eq!(field.display_text(), "Large");
    }

    #[test]
    fn test_empty_label_is_a_match() {
        let list = vec![ListItem::new("", 0u8), ListItem::new("One", 1)];
        let mut field = SelectField::new();
        field.sync(&list, Some(&1));
        assert!(field.sync(&list, Some(&0)));
        assert_eq!(field.display_text(), "");
    }

    #[test]
    fn test_visibility_transition_resets_cursor() {
        let list = sizes();
        let style = SelectFieldStyle::default();
        let keys = SelectKeys::default();
        let props = |visible| SelectFieldProps::<u8, ()> {
            list: &list,
            value: Some(&3),
            visible,
            is_focused: true,
            label: None,
            placeholder: None,
            style: &style,
            keys: &keys,
            on_show: || (),
            on_select: None,
            on_dismiss: None,
        };

        let mut field = SelectField::new();
        field.track_visibility(&props(true));
        assert_eq!(field.menu.cursor(), 2);
        assert!(field.was_visible);

        field.track_visibility(&props(false));
        assert!(!field.was_visible);
        assert_eq!(field.overlay_area(), None);
    }
}
