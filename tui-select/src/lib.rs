//! tui-select: a controlled select field for ratatui apps
//!
//! A dropdown composed of a read-only text field (the anchor) and a popup
//! list placed right under it (the overlay). The host owns the selected value
//! and whether the overlay is open; the field hands back actions built from
//! the callbacks in its props.
//!
//! # Example
//! ```ignore
//! use tui_select::prelude::*;
//!
//! #[derive(Clone, Debug)]
//! enum FormAction {
//!     SizeOpen,
//!     SizeDismiss,
//!     SizeSet(u8),
//! }
//!
//! let sizes = vec![ListItem::new("Small", 1), ListItem::new("Large", 2)];
//! let actions: Vec<_> = field
//!     .handle_event(&event, SelectFieldProps {
//!         list: &sizes,
//!         value: state.size.as_ref(),
//!         visible: state.size_open,
//!         on_show: || FormAction::SizeOpen,
//!         on_select: Some(FormAction::SizeSet),
//!         on_dismiss: Some(|| FormAction::SizeDismiss),
//!         ..
//!     })
//!     .into_iter()
//!     .collect();
//! store.dispatch_all(actions);
//! ```

// Re-export everything from core
pub use tui_select_core::*;

// Re-export the widget
pub use tui_select_components::*;

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use tui_select_core::{Action, Component};

    // Events
    pub use tui_select_core::{process_raw_event, spawn_event_poller, EventKind, RawEvent};

    // Keys, theme, geometry
    pub use tui_select_core::{
        format_key_for_display, AnchorRef, LayoutGeometry, SelectCommand, SelectKeys, Theme,
        ThemeColors,
    };

    // Store
    pub use tui_select_core::{LoggingMiddleware, Middleware, Reducer, Store};

    // Widget
    pub use tui_select_components::{
        ConfigError, ContainerStyle, FieldMode, ListItem, SelectField, SelectFieldConfig,
        SelectFieldProps, SelectFieldStyle, DEFAULT_MAX_HEIGHT,
    };

    // Ratatui re-exports
    pub use tui_select_core::{Color, Frame, Line, Modifier, Rect, Span, Style, Text};
}
