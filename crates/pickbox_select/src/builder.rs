//! Fluent construction of a select
//!
//! ```
//! use pickbox_core::geometry::{Rect, Size};
//! use pickbox_select::{select, SelectOption};
//!
//! let controller = select(vec![SelectOption::new("One", "1")])
//!     .value("1")
//!     .placeholder("Select an option")
//!     .bounds(Rect::new(24.0, 80.0, 250.0, 40.0))
//!     .viewport(Size::new(1280.0, 800.0))
//!     .on_change(|value| println!("selected: {:?}", value))
//!     .build();
//!
//! assert_eq!(controller.display_text(), "One");
//! ```

use std::sync::Arc;

use pickbox_core::geometry::{Rect, Size};
use pickbox_core::{InstanceKey, ListenerRegistry};

use crate::controller::{ChangeCallback, SelectController};
use crate::option::SelectOption;

/// Default viewport when the host has not reported one
const DEFAULT_VIEWPORT: Size = Size::new(1280.0, 800.0);

/// Builder for [`SelectController`]
pub struct SelectBuilder {
    key: Option<InstanceKey>,
    options: Vec<SelectOption>,
    value: Option<String>,
    placeholder: String,
    on_change: Option<ChangeCallback>,
    bounds: Rect,
    viewport: Size,
    registry: Option<Arc<ListenerRegistry>>,
}

impl SelectBuilder {
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self {
            key: None,
            options,
            value: None,
            placeholder: String::new(),
            on_change: None,
            bounds: Rect::ZERO,
            viewport: DEFAULT_VIEWPORT,
            registry: None,
        }
    }

    /// Use an explicit instance key instead of a generated `listbox-<uuid>`
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(InstanceKey::explicit(key));
        self
    }

    /// Set the initially selected value
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the initially selected value from an optional
    pub fn maybe_value(mut self, value: Option<String>) -> Self {
        self.value = value;
        self
    }

    /// Set the placeholder text
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the change callback
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(Option<&str>) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(callback));
        self
    }

    /// Control bounds in viewport coordinates
    pub fn bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Viewport size
    pub fn viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    /// Registry for the outside-click and resize listeners
    ///
    /// Without a registry the controller still handles
    /// [`SelectController::outside_pointer_down`] when called directly.
    pub fn registry(mut self, registry: Arc<ListenerRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Mount the select
    pub fn build(self) -> SelectController {
        let key = self.key.unwrap_or_else(|| InstanceKey::new("listbox"));
        SelectController::from_parts(
            key,
            self.options,
            self.value,
            self.placeholder,
            self.on_change,
            self.bounds,
            self.viewport,
            self.registry,
        )
    }
}

/// Create a select over `options`
pub fn select(options: Vec<SelectOption>) -> SelectBuilder {
    SelectBuilder::new(options)
}
