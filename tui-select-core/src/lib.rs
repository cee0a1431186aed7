//! Core traits and types for tui-select
//!
//! This crate holds the pieces a controlled select field is built on:
//!
//! - **Component**: UI elements that render from props and emit actions
//! - **EventKind**: key, mouse, scroll and resize input handed to components
//! - **SelectKeys**: configurable key map for opening, navigating and dismissing
//! - **Theme**: named colors (primary highlight, text, borders)
//! - **AnchorRef**: shared handle to an anchor's measured geometry
//! - **Store**: host-side container for the state a field does not own
//!
//! # Controlled components
//!
//! A select field never decides on its own whether it is open or what is
//! selected. The host keeps both in its state and passes action constructors
//! through props; the field returns the actions a gesture produced and the
//! host dispatches them.
//!
//! ```ignore
//! use tui_select_core::prelude::*;
//!
//! let actions: Vec<_> = field.handle_event(&event, props).into_iter().collect();
//! if store.dispatch_all(actions) {
//!     terminal.draw(|frame| render(frame, &mut field, store.state()))?;
//! }
//! ```

pub mod action;
pub mod component;
pub mod event;
pub mod geometry;
pub mod keybindings;
pub mod store;
pub mod testing;
pub mod theme;

pub use action::Action;
pub use component::Component;
pub use event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};
pub use geometry::{AnchorRef, LayoutGeometry};
pub use keybindings::{
    format_key_for_display, key_matches, parse_key_string, InvalidKey, SelectCommand, SelectKeys,
};
pub use store::{LoggingMiddleware, Middleware, Reducer, Store};
pub use theme::{Theme, ThemeColors};

// Re-export ratatui types for convenience
pub use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};

pub use testing::{
    buffer_rect_to_string_plain, buffer_to_string_plain, char_key, click, find_text, key,
    key_event, scroll, RenderHarness, TestHarness,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::component::Component;
    pub use crate::event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};
    pub use crate::geometry::{AnchorRef, LayoutGeometry};
    pub use crate::keybindings::{format_key_for_display, SelectCommand, SelectKeys};
    pub use crate::store::{LoggingMiddleware, Middleware, Reducer, Store};
    pub use crate::theme::{Theme, ThemeColors};

    pub use ratatui::{
        layout::Rect,
        style::{Color, Modifier, Style},
        text::{Line, Span, Text},
        Frame,
    };
}
