//! # Pickbox Select
//!
//! An editable select (combobox) whose behavior lives in a host-independent
//! state machine:
//!
//! - **Filter** ([`filter`]): case-sensitive prefix filtering that keeps catalog order
//! - **Placement** ([`placement`]): opens the popover up or down depending on room
//! - **Controller** ([`controller`]): open/close, query, keyboard highlight,
//!   pointer routing, outside dismissal, and change notification
//! - **View** ([`view`]): a plain description of what to draw
//!
//! The host owns the selected value. It passes the value in, receives changes
//! through the `on_change` callback, and passes the new value back with
//! [`SelectController::set_value`].
//!
//! ## Example
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use pickbox_core::Key;
//! use pickbox_select::{select, SelectOption};
//!
//! let chosen = Arc::new(Mutex::new(None));
//! let sink = chosen.clone();
//!
//! let mut country = select(vec![
//!     SelectOption::new("Germany", "de"),
//!     SelectOption::new("France", "fr"),
//! ])
//! .placeholder("Select a country")
//! .on_change(move |value| *sink.lock().unwrap() = value.map(str::to_string))
//! .build();
//!
//! country.key_down(Key::Char('F'));
//! country.key_down(Key::Enter);
//!
//! assert_eq!(chosen.lock().unwrap().as_deref(), Some("fr"));
//! ```

pub mod builder;
pub mod controller;
pub mod filter;
pub mod option;
pub mod placement;
pub mod scroll;
pub mod view;

pub use builder::{select, SelectBuilder};
pub use controller::{
    popover_height, select_events, ChangeCallback, HitTarget, SelectController, SelectState,
};
pub use filter::{filtered_indices, prefix_filter};
pub use option::{find_selected_name, SelectOption};
pub use placement::{resolve_placement, Placement, POPOVER_MAX_HEIGHT};
pub use scroll::{ListViewport, OPTION_ROW_HEIGHT};
pub use view::{ControlView, DropdownView, OptionView, RootView, SelectView, NO_MATCHES};
