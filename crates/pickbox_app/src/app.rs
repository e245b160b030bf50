//! Demo host application
//!
//! `App` owns the two state slices, the backend, and four select widgets
//! placed in the corners of a viewport so that the top pair drops down and
//! the bottom pair drops up. Every widget is bound to the same selected
//! value: a commit in any corner dispatches `set_value` into the selection
//! store, and the new value is pushed back into all four widgets.
//!
//! Input is routed the way a windowing host routes it: pointer-down first
//! goes to every widget holding an outside-click listener, then to the widget
//! under the pointer; keys go to the focused widget.

use std::sync::Arc;

use pickbox_core::{Key, ListenerKind, ListenerRegistry, Point, Rect, Size, Store};
use pickbox_select::{HitTarget, SelectController, SelectOption};

use crate::api::{
    decode_catalog, fetch_error_message, submit_error_message, FetchMode, OptionSource,
    SelectionSink, SubmitMode,
};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::slices::{LoadStatus, Notice, OptionsState, SelectionState};

/// Width of each demo select
pub const CONTROL_WIDTH: f32 = 250.0;
/// Height of each demo select
pub const CONTROL_HEIGHT: f32 = 40.0;
/// Distance from the viewport edges
pub const CORNER_MARGIN: f32 = 24.0;

/// Value sent by [`SubmitMode::Error`]; the sink rejects it
pub const MALFORMED_SUBMISSION: &str = "oops";

/// Corner a demo select sits in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Corner::TopLeft => "top left",
            Corner::TopRight => "top right",
            Corner::BottomLeft => "bottom left",
            Corner::BottomRight => "bottom right",
        }
    }

    /// Submit variant offered next to this corner's select
    ///
    /// The top-right case demonstrates the rejected submission.
    pub fn submit_mode(&self) -> SubmitMode {
        match self {
            Corner::TopRight => SubmitMode::Error,
            _ => SubmitMode::Ok,
        }
    }

    /// Control bounds inside `viewport`
    pub fn bounds(&self, viewport: Size) -> Rect {
        let left = CORNER_MARGIN;
        let right = (viewport.width - CORNER_MARGIN - CONTROL_WIDTH).max(left);
        let top = CORNER_MARGIN;
        let bottom = (viewport.height - CORNER_MARGIN - CONTROL_HEIGHT).max(top);
        let (x, y) = match self {
            Corner::TopLeft => (left, top),
            Corner::TopRight => (right, top),
            Corner::BottomLeft => (left, bottom),
            Corner::BottomRight => (right, bottom),
        };
        Rect::new(x, y, CONTROL_WIDTH, CONTROL_HEIGHT)
    }
}

/// One demo select
pub struct DemoCase {
    pub corner: Corner,
    pub submit_mode: SubmitMode,
    pub select: SelectController,
}

/// The demo host
pub struct App<B> {
    backend: B,
    config: AppConfig,
    options: Arc<Store<OptionsState>>,
    selection: Arc<Store<SelectionState>>,
    registry: Arc<ListenerRegistry>,
    viewport: Size,
    cases: Vec<DemoCase>,
    focus: Option<usize>,
    synced_catalog: Option<(u64, LoadStatus)>,
}

impl<B: OptionSource + SelectionSink> App<B> {
    /// Create the host with a default 1280×800 viewport
    pub fn new(backend: B, config: AppConfig) -> Self {
        Self::with_viewport(backend, config, Size::new(1280.0, 800.0))
    }

    pub fn with_viewport(backend: B, config: AppConfig, viewport: Size) -> Self {
        let options = Arc::new(Store::<OptionsState>::new());
        let selection = Arc::new(Store::<SelectionState>::new());
        let registry = ListenerRegistry::new();

        let cases = Corner::ALL
            .iter()
            .map(|&corner| {
                let store = Arc::clone(&selection);
                let select = SelectController::builder(Vec::new())
                    .bounds(corner.bounds(viewport))
                    .viewport(viewport)
                    .registry(Arc::clone(&registry))
                    .on_change(move |value| {
                        store.update(|s| s.set_value(value.map(str::to_string)));
                    })
                    .build();
                DemoCase {
                    corner,
                    submit_mode: corner.submit_mode(),
                    select,
                }
            })
            .collect();

        let mut app = Self {
            backend,
            config,
            options,
            selection,
            registry,
            viewport,
            cases,
            focus: None,
            synced_catalog: None,
        };
        app.sync();
        app
    }

    // =========================================================================
    // Thunks
    // =========================================================================

    /// Load the catalog from the backend
    ///
    /// Clears the message log first.
    pub async fn load_options(&mut self, mode: FetchMode) {
        self.selection.update(SelectionState::clear_messages);
        let request_id = self.begin_load();
        let result = self.backend.fetch_options(mode).await;
        self.finish_load(request_id, result.and_then(decode_catalog));
    }

    /// Mark a load as started and return its request id
    pub fn begin_load(&mut self) -> u64 {
        let request_id = self.options.update_with(OptionsState::pending);
        tracing::debug!(request_id, "catalog load started");
        self.sync();
        request_id
    }

    /// Apply the outcome of load `request_id`
    pub fn finish_load(&mut self, request_id: u64, result: Result<Vec<SelectOption>, ApiError>) {
        let applied = match result {
            Ok(items) => {
                tracing::info!(request_id, count = items.len(), "catalog loaded");
                self.options.update_with(|s| s.fulfilled(request_id, items))
            }
            Err(err) => {
                tracing::warn!(request_id, error = %err, "catalog load failed");
                let message = fetch_error_message(&err);
                self.options.update_with(|s| s.rejected(request_id, message))
            }
        };
        if applied {
            self.sync();
        }
    }

    /// Submit the selected value
    ///
    /// Returns false without contacting the sink when nothing is selected or
    /// a submission is already in flight.
    pub async fn submit(&mut self, mode: SubmitMode) -> bool {
        let (value, submitting) = self
            .selection
            .select(|s| (s.value.clone(), s.submitting));
        let Some(value) = value else {
            return false;
        };
        if submitting {
            return false;
        }

        let payload = match mode {
            SubmitMode::Ok => value,
            SubmitMode::Error => MALFORMED_SUBMISSION.to_string(),
        };

        self.selection.update(SelectionState::submit_pending);
        match self.backend.submit_selection(&payload).await {
            Ok(receipt) => {
                tracing::info!(value = %payload, "selection accepted");
                self.selection
                    .update(|s| s.submit_fulfilled(receipt.message));
            }
            Err(err) => {
                tracing::warn!(value = %payload, error = %err, "selection rejected");
                let message = submit_error_message(&err);
                self.selection.update(|s| s.submit_rejected(message));
            }
        }
        true
    }

    /// Press the submit button of `corner`
    pub async fn submit_from(&mut self, corner: Corner) -> bool {
        let mode = self
            .cases
            .iter()
            .find(|c| c.corner == corner)
            .map_or(SubmitMode::Ok, |c| c.submit_mode);
        self.submit(mode).await
    }

    /// Select `value` directly, as a commit from any widget would
    pub fn set_value(&mut self, value: Option<String>) {
        self.selection.update(|s| s.set_value(value));
        self.sync();
    }

    pub fn clear_messages(&mut self) {
        self.selection.update(SelectionState::clear_messages);
    }

    /// Drop the catalog and the selection
    pub fn reset(&mut self) {
        self.options.update(OptionsState::reset);
        self.selection.update(SelectionState::reset);
        self.sync();
    }

    // =========================================================================
    // Input routing
    // =========================================================================

    /// Pointer pressed at `point`
    pub fn pointer_down(&mut self, point: Point) {
        let mut handled = vec![false; self.cases.len()];
        for (idx, case) in self.cases.iter_mut().enumerate() {
            let key = case.select.key().get().to_string();
            if self
                .registry
                .is_listening(ListenerKind::OutsidePointerDown, &key)
            {
                handled[idx] = true;
                case.select.pointer_down(point);
            }
        }

        self.focus = self.case_at(point);
        if let Some(idx) = self.focus {
            if !handled[idx] {
                self.cases[idx].select.pointer_down(point);
            }
        }
        self.sync();
    }

    /// Pointer clicked at `point`
    pub fn click(&mut self, point: Point) {
        if let Some(idx) = self.case_at(point) {
            self.focus = Some(idx);
            self.cases[idx].select.click(point);
        }
        self.sync();
    }

    /// Press and release at `point`
    pub fn tap(&mut self, point: Point) {
        self.pointer_down(point);
        self.click(point);
    }

    /// Key pressed; goes to the focused widget
    ///
    /// Tab moves focus to the next corner.
    pub fn key_down(&mut self, key: Key) {
        let Some(idx) = self.focus else {
            return;
        };
        self.cases[idx].select.key_down(key);
        if key == Key::Tab {
            self.focus = Some((idx + 1) % self.cases.len());
        }
        self.sync();
    }

    /// Text typed into the focused widget's input
    pub fn input_changed(&mut self, text: &str) {
        if let Some(idx) = self.focus {
            self.cases[idx].select.input_changed(text);
        }
    }

    /// Wheel scroll over the focused widget's list
    pub fn scroll(&mut self, dy: f32) {
        if let Some(idx) = self.focus {
            self.cases[idx].select.scroll_list(dy);
        }
    }

    /// Viewport resized: corners move, listening widgets learn the new size
    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
        for case in &mut self.cases {
            case.select.set_bounds(case.corner.bounds(viewport));
            let key = case.select.key().get().to_string();
            if self.registry.is_listening(ListenerKind::ViewportResize, &key) {
                case.select.viewport_resized(viewport);
            }
        }
    }

    /// Give focus to `corner` without clicking it
    pub fn focus(&mut self, corner: Corner) {
        self.focus = self.cases.iter().position(|c| c.corner == corner);
    }

    fn case_at(&self, point: Point) -> Option<usize> {
        self.cases
            .iter()
            .position(|c| c.select.hit_test(point) != HitTarget::Outside)
    }

    /// Push store state into every widget
    fn sync(&mut self) {
        let catalog = self.options.select(|s| (s.request_id, s.status));
        if self.synced_catalog != Some(catalog) {
            let items = self.options.select(|s| s.items.clone());
            for case in &mut self.cases {
                case.select.set_options(items.clone());
            }
            self.synced_catalog = Some(catalog);
        }

        let value = self.selection.select(|s| s.value.clone());
        let placeholder = self.placeholder();
        for case in &mut self.cases {
            case.select.set_value(value.clone());
            case.select.set_placeholder(placeholder);
        }
    }

    // =========================================================================
    // Derived state
    // =========================================================================

    /// Placeholder for the current load status
    pub fn placeholder(&self) -> &'static str {
        self.options.select(|s| match s.status {
            LoadStatus::Loading => "Loading…",
            LoadStatus::Failed => "Failed to load",
            LoadStatus::Succeeded if s.items.is_empty() => "No options",
            LoadStatus::Idle | LoadStatus::Succeeded => "Select an option",
        })
    }

    /// Whether the submit action is unavailable
    pub fn submit_disabled(&self) -> bool {
        let (loaded, empty) = self
            .options
            .select(|s| (s.status == LoadStatus::Succeeded, s.items.is_empty()));
        let (no_value, submitting) = self
            .selection
            .select(|s| (s.value.is_none(), s.submitting));
        no_value || submitting || !loaded || empty
    }

    /// Messages to show under the configured message mode
    pub fn visible_messages(&self) -> Vec<Notice> {
        let mode = self.config.message_mode;
        self.selection.select(|s| s.visible_messages(mode))
    }

    /// `Status: loading`, or `Status: succeeded · options: 1000` once loaded
    pub fn status_line(&self) -> String {
        self.options.select(|s| match s.status {
            LoadStatus::Succeeded => {
                format!("Status: {} · options: {}", s.status.as_str(), s.items.len())
            }
            status => format!("Status: {}", status.as_str()),
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn options_store(&self) -> &Arc<Store<OptionsState>> {
        &self.options
    }

    pub fn selection_store(&self) -> &Arc<Store<SelectionState>> {
        &self.selection
    }

    pub fn options(&self) -> OptionsState {
        self.options.get()
    }

    pub fn selection(&self) -> SelectionState {
        self.selection.get()
    }

    pub fn registry(&self) -> &Arc<ListenerRegistry> {
        &self.registry
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn cases(&self) -> &[DemoCase] {
        &self.cases
    }

    pub fn case(&self, corner: Corner) -> Option<&SelectController> {
        self.cases
            .iter()
            .find(|c| c.corner == corner)
            .map(|c| &c.select)
    }

    pub fn focused(&self) -> Option<Corner> {
        self.focus.map(|idx| self.cases[idx].corner)
    }
}
