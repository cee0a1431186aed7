//! Select field widget for tui-select
//!
//! A dropdown made of two parts: an anchor that looks like a read-only text
//! field, and a popup menu of rows placed directly beneath it. The host owns
//! the selected value and the open flag; the widget returns actions built from
//! the callbacks passed through Props.
//!
//! # Components
//!
//! - [`SelectField`] - Anchor plus overlay, kept in sync with the selection
//! - [`Anchor`] - Read-only field that records its own geometry
//! - [`Menu`] - Scrollable overlay of selectable rows
//!
//! # Example
//!
//! ```ignore
//! use tui_select_components::{ListItem, SelectField, SelectFieldProps, SelectFieldStyle};
//!
//! let mut field = SelectField::new();
//! let countries = vec![ListItem::new("Canada", "ca"), ListItem::new("Chile", "cl")];
//!
//! // In your render function:
//! field.render(frame, area, SelectFieldProps {
//!     list: &countries,
//!     value: state.country.as_ref(),
//!     visible: state.country_open,
//!     is_focused: state.focus == Focus::Country,
//!     label: Some("Country"),
//!     placeholder: Some("Pick a country"),
//!     style: &style,
//!     keys: &keys,
//!     on_show: || Action::CountryOpen,
//!     on_select: Some(Action::CountrySet),
//!     on_dismiss: Some(|| Action::CountryDismiss),
//! });
//! ```

mod anchor;
mod config;
mod item;
mod menu;
mod select_field;
mod style;

pub use anchor::{Anchor, AnchorProps};
pub use config::{ConfigError, SelectFieldConfig};
pub use item::{label_for, position_of, ListItem};
pub use menu::{Menu, MenuProps};
pub use select_field::{SelectField, SelectFieldProps};
pub use style::{ContainerStyle, FieldMode, SelectFieldStyle, DEFAULT_MAX_HEIGHT};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Anchor, AnchorProps, ConfigError, ContainerStyle, FieldMode, ListItem, Menu, MenuProps,
        SelectField, SelectFieldConfig, SelectFieldProps, SelectFieldStyle,
    };
}
