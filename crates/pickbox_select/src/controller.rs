//! Selection controller - the select's interaction state machine
//!
//! The controller owns everything the select needs between events: whether
//! the popover is open, the query typed into the input, the highlighted
//! option, the resolved placement, and the one-shot flag that swallows the
//! root activation bubbling out of a popover click. The selected value itself
//! belongs to the host: the controller reports commits and clears through the
//! change callback and only learns about the new value through
//! [`SelectController::set_value`], like any controlled input.
//!
//! Every handler runs synchronously and cannot fail.
//!
//! # Transitions
//!
//! ```text
//!            activate / printable key / caret
//!   Closed ─────────────────────────────────▶ Open
//!     ▲                                        │
//!     └────────────────────────────────────────┘
//!      Escape / Tab / outside pointer-down /
//!      commit (Enter, option click) / clear / caret
//! ```
//!
//! While open, an `OutsidePointerDown` listener is held in the host's
//! [`ListenerRegistry`]; a `ViewportResize` listener is held for the whole
//! lifetime of the controller. Both are released by dropping their guards.
//!
//! # Example
//!
//! ```
//! use pickbox_core::Key;
//! use pickbox_select::{SelectController, SelectOption};
//!
//! let options = (1..=20)
//!     .map(|i| SelectOption::new(i.to_string(), i.to_string()))
//!     .collect();
//! let mut select = SelectController::builder(options).placeholder("Pick one").build();
//!
//! select.key_down(Key::Char('1'));
//! assert!(select.is_open());
//! assert_eq!(select.query(), "1");
//! assert_eq!(select.filtered_len(), 11); // 1, 10..19
//!
//! select.key_down(Key::ArrowDown);
//! assert_eq!(select.active_index(), Some(1));
//!
//! select.key_down(Key::Enter);
//! assert!(!select.is_open());
//! ```

use std::sync::Arc;

use pickbox_core::fsm::{transition, StateTransitions};
use pickbox_core::geometry::{Point, Rect, Size};
use pickbox_core::listeners::{ListenerGuard, ListenerKind, ListenerRegistry};
use pickbox_core::{InstanceKey, Key};

use crate::builder::SelectBuilder;
use crate::filter::filtered_indices;
use crate::option::{find_selected_name, position_of, SelectOption};
use crate::placement::{resolve_placement, Placement, POPOVER_MAX_HEIGHT};
use crate::scroll::{ListViewport, OPTION_ROW_HEIGHT};

/// Callback invoked with the new selection (`None` clears it)
pub type ChangeCallback = Arc<dyn Fn(Option<&str>) + Send + Sync>;

/// Width of the caret toggle at the right edge of the control
pub const CARET_WIDTH: f32 = 32.0;
/// Width of the clear button, left of the caret
pub const CLEAR_WIDTH: f32 = 24.0;
/// Gap between the control and the popover
pub const POPOVER_GAP: f32 = 4.0;

/// Events driving [`SelectState`]
pub mod select_events {
    /// Root click or Enter while closed
    pub const ACTIVATE: u32 = 30001;
    /// Printable key while closed
    pub const PRINTABLE_KEY: u32 = 30002;
    /// Caret click (toggles)
    pub const CARET: u32 = 30003;
    /// Escape while open
    pub const ESCAPE: u32 = 30004;
    /// Tab moves focus away
    pub const TAB: u32 = 30005;
    /// Pointer went down outside the root area
    pub const OUTSIDE_POINTER_DOWN: u32 = 30006;
    /// An option was committed (Enter or click)
    pub const COMMIT: u32 = 30007;
    /// The clear affordance was clicked
    pub const CLEAR: u32 = 30008;
}

/// Popover visibility
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectState {
    #[default]
    Closed,
    Open,
}

impl StateTransitions for SelectState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use select_events::*;
        use SelectState::*;

        match (self, event) {
            (Closed, ACTIVATE) | (Closed, PRINTABLE_KEY) | (Closed, CARET) => Some(Open),

            (Open, ESCAPE)
            | (Open, TAB)
            | (Open, OUTSIDE_POINTER_DOWN)
            | (Open, COMMIT)
            | (Open, CLEAR)
            | (Open, CARET) => Some(Closed),

            _ => None,
        }
    }
}

/// What a pointer position lands on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    /// The clear ("×") button
    Clear,
    /// The caret toggle
    Caret,
    /// The rest of the control (the text input)
    Control,
    /// An option row, by index into the filtered list
    Option(usize),
    /// Popover area that is not an option (the "no matches" row)
    PopoverEmpty,
    /// Anywhere else
    Outside,
}

impl HitTarget {
    fn in_popover(&self) -> bool {
        matches!(self, HitTarget::Option(_) | HitTarget::PopoverEmpty)
    }
}

/// Interaction state machine for one select instance
pub struct SelectController {
    key: InstanceKey,

    // Host-owned inputs
    options: Vec<SelectOption>,
    value: Option<String>,
    placeholder: String,
    on_change: Option<ChangeCallback>,

    // Geometry supplied by the host's layout pass
    bounds: Rect,
    viewport: Size,

    // Controller-owned state
    state: SelectState,
    query: String,
    filtered: Vec<usize>,
    active_index: Option<usize>,
    placement: Placement,
    suppress_next_open: bool,
    focused: bool,
    list: ListViewport,

    registry: Option<Arc<ListenerRegistry>>,
    outside_listener: Option<ListenerGuard>,
    _resize_listener: Option<ListenerGuard>,
}

impl SelectController {
    /// Start building a controller over `options`
    pub fn builder(options: Vec<SelectOption>) -> SelectBuilder {
        SelectBuilder::new(options)
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        key: InstanceKey,
        options: Vec<SelectOption>,
        value: Option<String>,
        placeholder: String,
        on_change: Option<ChangeCallback>,
        bounds: Rect,
        viewport: Size,
        registry: Option<Arc<ListenerRegistry>>,
    ) -> Self {
        let resize_listener = registry
            .as_ref()
            .map(|r| r.attach(ListenerKind::ViewportResize, key.get()));
        let filtered = (0..options.len()).collect();

        Self {
            key,
            options,
            value,
            placeholder,
            on_change,
            bounds,
            viewport,
            state: SelectState::Closed,
            query: String::new(),
            filtered,
            active_index: None,
            placement: Placement::Down,
            suppress_next_open: false,
            focused: false,
            list: ListViewport::new(OPTION_ROW_HEIGHT),
            registry,
            outside_listener: None,
            _resize_listener: resize_listener,
        }
    }

    // =========================================================================
    // Host synchronization
    // =========================================================================

    /// Replace the catalog
    ///
    /// While open, the filtered list is recomputed and the highlight is
    /// clamped into it.
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.options = options;
        self.refilter();
        if self.is_open() {
            self.active_index = match (self.active_index, self.filtered.len()) {
                (_, 0) => None,
                (Some(idx), len) => Some(idx.min(len - 1)),
                (None, _) => Some(0),
            };
            self.scroll_active_into_view();
        }
    }

    /// Mirror the host's selected value
    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    pub fn set_on_change(&mut self, on_change: ChangeCallback) {
        self.on_change = Some(on_change);
    }

    /// Update the control's viewport-relative bounds
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Viewport resize notification
    ///
    /// The new size is used the next time the popover opens; an open popover
    /// keeps its placement.
    pub fn viewport_resized(&mut self, viewport: Size) {
        tracing::trace!(key = self.key.get(), ?viewport, "viewport resized");
        self.viewport = viewport;
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// Key pressed while the select (or its input) has focus
    pub fn key_down(&mut self, key: Key) {
        match (self.state, key) {
            (SelectState::Closed, Key::Enter) => {
                self.open(select_events::ACTIVATE);
            }
            (SelectState::Closed, Key::Char(c)) => {
                if self.open(select_events::PRINTABLE_KEY) {
                    self.apply_query(c.to_string());
                }
            }
            (SelectState::Open, Key::Enter) => self.commit_active(),
            (SelectState::Open, Key::Escape) => {
                self.close(select_events::ESCAPE);
            }
            (_, Key::Tab) => {
                self.focused = false;
                self.close(select_events::TAB);
            }
            (SelectState::Open, Key::ArrowDown) => self.move_active(1),
            (SelectState::Open, Key::ArrowUp) => self.move_active(-1),
            _ => {}
        }
    }

    /// The text input's value changed
    ///
    /// Ignored while closed (the input is read-only then).
    pub fn input_changed(&mut self, text: &str) {
        if !self.is_open() || text == self.query {
            return;
        }
        self.apply_query(text.to_string());
    }

    // =========================================================================
    // Pointer
    // =========================================================================

    /// Resolve what `point` lands on
    pub fn hit_test(&self, point: Point) -> HitTarget {
        if self.bounds.contains(point) {
            let caret_left = self.bounds.right() - CARET_WIDTH;
            if point.x >= caret_left {
                return HitTarget::Caret;
            }
            if self.has_selected() && point.x >= caret_left - CLEAR_WIDTH {
                return HitTarget::Clear;
            }
            return HitTarget::Control;
        }
        if let Some(popover) = self.popover_rect() {
            if popover.contains(point) {
                return match self.list.row_at(point.y - popover.top()) {
                    Some(idx) if idx < self.filtered.len() => HitTarget::Option(idx),
                    _ => HitTarget::PopoverEmpty,
                };
            }
        }
        HitTarget::Outside
    }

    /// Pointer pressed at `point` (window coordinates)
    ///
    /// The outside-dismissal listener sees the event first, as a capture
    /// phase listener would.
    pub fn pointer_down(&mut self, point: Point) {
        if self.outside_pointer_down(point) {
            return;
        }
        if self.hit_test(point).in_popover() {
            self.popover_pointer_down();
        }
    }

    /// Pointer clicked at `point`
    ///
    /// Caret and clear clicks stop at their own handler. Popover clicks run
    /// their handler and then reach the root activation, where the one-shot
    /// suppression flag swallows them.
    pub fn click(&mut self, point: Point) {
        match self.hit_test(point) {
            HitTarget::Clear => self.clear_click(),
            HitTarget::Caret => self.caret_click(),
            HitTarget::Control => self.root_click(),
            HitTarget::Option(idx) => {
                self.option_click(idx);
                self.root_click();
            }
            HitTarget::PopoverEmpty => self.root_click(),
            HitTarget::Outside => {}
        }
    }

    /// Root-level activation (click anywhere on the select)
    pub fn root_click(&mut self) {
        if self.suppress_next_open {
            tracing::trace!(key = self.key.get(), "root activation suppressed");
            self.suppress_next_open = false;
            return;
        }
        self.open(select_events::ACTIVATE);
    }

    /// Caret toggle
    pub fn caret_click(&mut self) {
        if self.is_open() {
            self.close(select_events::CARET);
        } else {
            self.open(select_events::CARET);
        }
    }

    /// Clear the selection
    ///
    /// Emits `None`, clears the query, closes the popover if it was open,
    /// and keeps focus on the input.
    pub fn clear_click(&mut self) {
        self.suppress_next_open = false;
        self.emit_change(None);
        self.close(select_events::CLEAR);
        self.query.clear();
        self.refilter();
        self.focused = true;
    }

    /// Pointer pressed anywhere inside the popover
    pub fn popover_pointer_down(&mut self) {
        self.suppress_next_open = true;
    }

    /// Option row clicked (index into the filtered list)
    ///
    /// The suppression flag is armed after closing, so the root click that
    /// follows in the same gesture is swallowed.
    pub fn option_click(&mut self, index: usize) {
        if self.is_open() {
            if let Some(value) = self.filtered_value(index) {
                self.emit_change(Some(&value));
            }
            self.close(select_events::COMMIT);
        }
        self.suppress_next_open = true;
    }

    /// Global pointer-down notification from the outside-click listener
    ///
    /// Returns true if it closed the popover.
    pub fn outside_pointer_down(&mut self, point: Point) -> bool {
        if !self.is_open() || self.root_area().contains(point) {
            return false;
        }
        self.focused = false;
        self.close(select_events::OUTSIDE_POINTER_DOWN)
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    fn open(&mut self, event: u32) -> bool {
        if !transition(&mut self.state, event) {
            return false;
        }

        self.placement = resolve_placement(self.bounds, self.viewport.height);
        self.query.clear();
        self.refilter();
        self.active_index = if self.filtered.is_empty() {
            None
        } else {
            let selected = position_of(&self.options, self.value.as_deref())
                .and_then(|pos| self.filtered.iter().position(|&idx| idx == pos));
            Some(selected.unwrap_or(0))
        };
        self.focused = true;
        self.suppress_next_open = false;
        self.list.reset();
        self.scroll_active_into_view();
        self.outside_listener = self
            .registry
            .as_ref()
            .map(|r| r.attach(ListenerKind::OutsidePointerDown, self.key.get()));

        tracing::trace!(
            key = self.key.get(),
            placement = self.placement.as_str(),
            active = ?self.active_index,
            "select opened"
        );
        true
    }

    fn close(&mut self, event: u32) -> bool {
        if !transition(&mut self.state, event) {
            return false;
        }

        self.query.clear();
        self.active_index = None;
        self.suppress_next_open = false;
        self.refilter();
        self.list.reset();
        self.outside_listener = None;

        tracing::trace!(key = self.key.get(), event, "select closed");
        true
    }

    fn commit_active(&mut self) {
        if let Some(value) = self.active_index.and_then(|idx| self.filtered_value(idx)) {
            self.emit_change(Some(&value));
        }
        self.close(select_events::COMMIT);
    }

    fn move_active(&mut self, delta: isize) {
        let len = self.filtered.len();
        if len == 0 {
            return;
        }
        let current = self.active_index.map_or(-1, |idx| idx as isize);
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        if self.active_index != Some(next) {
            self.active_index = Some(next);
            self.scroll_active_into_view();
        }
    }

    fn apply_query(&mut self, query: String) {
        self.query = query;
        self.refilter();
        self.active_index = (!self.filtered.is_empty()).then_some(0);
        self.list.reset();
        self.scroll_active_into_view();
    }

    fn refilter(&mut self) {
        self.filtered = filtered_indices(&self.options, &self.query);
        let rows = self.filtered.len();
        self.list.resize(rows, popover_height(rows));
    }

    fn scroll_active_into_view(&mut self) {
        if let (true, Some(idx)) = (self.is_open(), self.active_index) {
            self.list.ensure_visible(idx);
        }
    }

    fn filtered_value(&self, index: usize) -> Option<String> {
        self.filtered
            .get(index)
            .map(|&idx| self.options[idx].value.clone())
    }

    fn emit_change(&self, value: Option<&str>) {
        tracing::debug!(key = self.key.get(), ?value, "select change");
        if let Some(ref cb) = self.on_change {
            cb(value);
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn key(&self) -> &InstanceKey {
        &self.key
    }

    pub fn state(&self) -> SelectState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SelectState::Open
    }

    /// Current query (empty while closed)
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Highlighted position in the filtered list
    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// Placement resolved at the last open
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Whether the next root activation will be swallowed
    pub fn suppress_next_open(&self) -> bool {
        self.suppress_next_open
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Options matching the current query, in catalog order
    pub fn filtered(&self) -> impl Iterator<Item = &SelectOption> + '_ {
        self.filtered.iter().map(move |&idx| &self.options[idx])
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// The highlighted option
    pub fn active_option(&self) -> Option<&SelectOption> {
        self.active_index
            .and_then(|idx| self.filtered.get(idx))
            .map(|&idx| &self.options[idx])
    }

    /// Name of the selected option, if the value is in the catalog
    pub fn selected_name(&self) -> Option<&str> {
        find_selected_name(&self.options, self.value.as_deref())
    }

    pub fn has_selected(&self) -> bool {
        self.selected_name().is_some()
    }

    /// Text shown in the input: the query while open, else the selected name
    pub fn display_text(&self) -> &str {
        if self.is_open() {
            &self.query
        } else {
            self.selected_name().unwrap_or("")
        }
    }

    /// Id of the listbox element
    pub fn list_id(&self) -> &str {
        self.key.get()
    }

    /// Id of the option row at `index`
    pub fn option_id(&self, index: usize) -> String {
        self.key.derive(&format!("opt-{}", index))
    }

    /// Id of the highlighted option row, for `aria-activedescendant`
    pub fn active_id(&self) -> Option<String> {
        self.active_index.map(|idx| self.option_id(idx))
    }

    pub fn list_viewport(&self) -> &ListViewport {
        &self.list
    }

    /// Scroll the option list (wheel input)
    pub fn scroll_list(&mut self, dy: f32) {
        if self.is_open() {
            self.list.scroll_by(dy);
        }
    }

    /// The popover's rect while open
    pub fn popover_rect(&self) -> Option<Rect> {
        if !self.is_open() {
            return None;
        }
        let height = self.list.height();
        let y = match self.placement {
            Placement::Down => self.bounds.bottom() + POPOVER_GAP,
            Placement::Up => self.bounds.top() - POPOVER_GAP - height,
        };
        Some(Rect::new(self.bounds.x(), y, self.bounds.width(), height))
    }

    /// The control plus, while open, the popover and the gap between them
    pub fn root_area(&self) -> Rect {
        match self.popover_rect() {
            Some(popover) => self.bounds.union(&popover),
            None => self.bounds,
        }
    }
}

/// Popover height for `rows` filtered options; an empty list still shows one row
pub fn popover_height(rows: usize) -> f32 {
    (rows.max(1) as f32 * OPTION_ROW_HEIGHT).min(POPOVER_MAX_HEIGHT)
}

impl std::fmt::Debug for SelectController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectController")
            .field("key", &self.key)
            .field("state", &self.state)
            .field("options", &self.options.len())
            .field("value", &self.value)
            .field("query", &self.query)
            .field("filtered", &self.filtered.len())
            .field("active_index", &self.active_index)
            .field("placement", &self.placement)
            .field("suppress_next_open", &self.suppress_next_open)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    type Changes = Arc<Mutex<Vec<Option<String>>>>;

    fn numbered(n: usize) -> Vec<SelectOption> {
        (1..=n)
            .map(|i| SelectOption::new(i.to_string(), i.to_string()))
            .collect()
    }

    /// Control near the top of an 800px viewport
    fn control_rect() -> Rect {
        Rect::new(24.0, 80.0, 250.0, 40.0)
    }

    fn select_with(options: Vec<SelectOption>, value: Option<&str>) -> (SelectController, Changes) {
        let changes: Changes = Arc::new(Mutex::new(Vec::new()));
        let sink = changes.clone();
        let mut builder = SelectController::builder(options)
            .key("test-select")
            .bounds(control_rect())
            .viewport(Size::new(1280.0, 800.0))
            .on_change(move |v| sink.lock().unwrap().push(v.map(str::to_string)));
        if let Some(v) = value {
            builder = builder.value(v);
        }
        (builder.build(), changes)
    }

    fn changes_of(changes: &Changes) -> Vec<Option<String>> {
        changes.lock().unwrap().clone()
    }

    #[test]
    fn test_select_state_transitions() {
        use select_events::*;
        assert_eq!(SelectState::Closed.on_event(ACTIVATE), Some(SelectState::Open));
        assert_eq!(SelectState::Closed.on_event(CARET), Some(SelectState::Open));
        assert_eq!(SelectState::Open.on_event(CARET), Some(SelectState::Closed));
        assert_eq!(SelectState::Open.on_event(COMMIT), Some(SelectState::Closed));
        assert_eq!(SelectState::Closed.on_event(ESCAPE), None);
        assert_eq!(SelectState::Closed.on_event(CLEAR), None);
        assert_eq!(SelectState::Open.on_event(ACTIVATE), None);
    }

    #[test]
    fn test_open_without_selection_highlights_first() {
        let (mut select, _) = select_with(numbered(10), None);
        select.root_click();
        assert!(select.is_open());
        assert!(select.is_focused());
        assert_eq!(select.active_index(), Some(0));
        assert_eq!(select.filtered_len(), 10);
    }

    #[test]
    fn test_open_seeds_active_from_selection() {
        let (mut select, _) = select_with(numbered(100), Some("42"));
        select.key_down(Key::Enter);
        assert!(select.is_open());
        assert_eq!(select.active_index(), Some(41));
        assert_eq!(select.active_option().map(|o| o.value.as_str()), Some("42"));
    }

    #[test]
    fn test_open_seeds_active_scrolls_into_view() {
        let (mut select, _) = select_with(numbered(100), Some("42"));
        select.root_click();
        let vp = select.list_viewport();
        let top = 41.0 * OPTION_ROW_HEIGHT;
        assert!(vp.scroll_top() <= top);
        assert!(vp.scroll_top() + vp.height() >= top + OPTION_ROW_HEIGHT);
    }

    #[test]
    fn test_open_empty_catalog_has_no_active() {
        let (mut select, _) = select_with(Vec::new(), None);
        select.root_click();
        assert!(select.is_open());
        assert_eq!(select.active_index(), None);

        select.key_down(Key::ArrowDown);
        assert_eq!(select.active_index(), None);

        select.key_down(Key::Enter);
        assert!(!select.is_open());
    }

    #[test]
    fn test_printable_key_opens_and_seeds_query() {
        let (mut select, _) = select_with(numbered(1000), None);
        select.key_down(Key::Char('5'));
        assert!(select.is_open());
        assert_eq!(select.query(), "5");
        assert_eq!(select.display_text(), "5");
        assert_eq!(select.active_index(), Some(0));

        let names: Vec<&str> = select.filtered().map(|o| o.name.as_str()).collect();
        assert_eq!(names.len(), 111);
        assert_eq!(names[0], "5");
        assert_eq!(names[1], "50");
        assert_eq!(names.last(), Some(&"599"));
        assert!(names.iter().all(|n| n.starts_with('5')));
    }

    #[test]
    fn test_printable_key_without_matches() {
        let (mut select, _) = select_with(numbered(10), None);
        select.key_down(Key::Char('x'));
        assert!(select.is_open());
        assert_eq!(select.filtered_len(), 0);
        assert_eq!(select.active_index(), None);
    }

    #[test]
    fn test_text_change_resets_active() {
        let (mut select, _) = select_with(numbered(100), None);
        select.root_click();
        select.key_down(Key::ArrowDown);
        select.key_down(Key::ArrowDown);
        assert_eq!(select.active_index(), Some(2));

        select.input_changed("9");
        assert_eq!(select.query(), "9");
        assert_eq!(select.active_index(), Some(0));

        select.input_changed("9x");
        assert_eq!(select.active_index(), None);

        select.input_changed("");
        assert_eq!(select.filtered_len(), 100);
        assert_eq!(select.active_index(), Some(0));
    }

    #[test]
    fn test_same_text_is_noop() {
        let (mut select, _) = select_with(numbered(100), None);
        select.key_down(Key::Char('1'));
        select.key_down(Key::ArrowDown);
        select.input_changed("1");
        assert_eq!(select.active_index(), Some(1));
    }

    #[test]
    fn test_text_change_ignored_while_closed() {
        let (mut select, _) = select_with(numbered(10), None);
        select.input_changed("3");
        assert!(!select.is_open());
        assert_eq!(select.query(), "");
        assert_eq!(select.filtered_len(), 10);
    }

    #[test]
    fn test_arrow_navigation_clamps() {
        let (mut select, _) = select_with(numbered(3), None);
        select.root_click();

        select.key_down(Key::ArrowUp);
        assert_eq!(select.active_index(), Some(0));

        select.key_down(Key::ArrowDown);
        select.key_down(Key::ArrowDown);
        assert_eq!(select.active_index(), Some(2));

        select.key_down(Key::ArrowDown);
        assert_eq!(select.active_index(), Some(2));
        assert_eq!(select.query(), "");
    }

    #[test]
    fn test_arrow_navigation_scrolls() {
        let (mut select, _) = select_with(numbered(100), None);
        select.root_click();
        for _ in 0..10 {
            select.key_down(Key::ArrowDown);
        }
        assert_eq!(select.active_index(), Some(10));
        let vp = select.list_viewport();
        assert_eq!(vp.scroll_top(), 11.0 * OPTION_ROW_HEIGHT - vp.height());

        for _ in 0..10 {
            select.key_down(Key::ArrowUp);
        }
        assert_eq!(select.list_viewport().scroll_top(), 0.0);
    }

    #[test]
    fn test_enter_commits_active() {
        let (mut select, changes) = select_with(numbered(10), None);
        select.key_down(Key::Enter);
        select.key_down(Key::ArrowDown);
        select.key_down(Key::Enter);

        assert!(!select.is_open());
        assert_eq!(select.query(), "");
        assert_eq!(select.active_index(), None);
        assert_eq!(changes_of(&changes), vec![Some("2".to_string())]);
    }

    #[test]
    fn test_enter_with_filter_commits_filtered_value() {
        let (mut select, changes) = select_with(numbered(1000), None);
        select.key_down(Key::Char('7'));
        select.input_changed("77");
        select.key_down(Key::ArrowDown);
        select.key_down(Key::Enter);
        // 77, 770, 771 ...
        assert_eq!(changes_of(&changes), vec![Some("770".to_string())]);
    }

    #[test]
    fn test_escape_and_tab_close_without_change() {
        let (mut select, changes) = select_with(numbered(10), None);
        select.key_down(Key::Char('1'));
        select.key_down(Key::Escape);
        assert!(!select.is_open());
        assert_eq!(select.query(), "");
        assert_eq!(select.filtered_len(), 10);

        select.root_click();
        select.key_down(Key::Tab);
        assert!(!select.is_open());
        assert!(!select.is_focused());
        assert!(changes_of(&changes).is_empty());
    }

    #[test]
    fn test_display_text_falls_back_to_selection() {
        let options = vec![
            SelectOption::new("Alpha", "a"),
            SelectOption::new("Beta", "b"),
        ];
        let (mut select, _) = select_with(options, Some("b"));
        assert_eq!(select.display_text(), "Beta");

        select.key_down(Key::Char('A'));
        assert_eq!(select.display_text(), "A");

        select.key_down(Key::Escape);
        assert_eq!(select.display_text(), "Beta");

        select.set_value(Some("missing".into()));
        assert_eq!(select.display_text(), "");
        assert!(!select.has_selected());
    }

    #[test]
    fn test_option_click_commits_and_suppresses_reopen() {
        let (mut select, changes) = select_with(numbered(10), None);
        select.root_click();

        select.popover_pointer_down();
        select.option_click(3);
        assert!(!select.is_open());
        assert!(select.suppress_next_open());

        // the click bubbling to the root is swallowed exactly once
        select.root_click();
        assert!(!select.is_open());
        assert!(!select.suppress_next_open());

        select.root_click();
        assert!(select.is_open());
        assert_eq!(changes_of(&changes), vec![Some("4".to_string())]);
    }

    #[test]
    fn test_escape_after_popover_press_does_not_swallow_next_open() {
        let (mut select, _) = select_with(numbered(10), None);
        let control = control_rect();
        let on_control = Point::new(control.x() + 10.0, control.y() + 10.0);
        select.root_click();

        let popover = select.popover_rect().unwrap();
        let row = Point::new(popover.x() + 10.0, popover.y() + 5.0);
        select.pointer_down(row);
        assert!(select.suppress_next_open());

        select.key_down(Key::Escape);
        assert!(!select.is_open());
        assert!(!select.suppress_next_open());

        select.pointer_down(on_control);
        select.click(on_control);
        assert!(select.is_open());
    }

    #[test]
    fn test_tab_after_popover_press_clears_suppression() {
        let (mut select, _) = select_with(numbered(10), None);
        select.root_click();
        select.popover_pointer_down();

        select.key_down(Key::Tab);
        assert!(!select.is_open());
        assert!(!select.suppress_next_open());

        select.root_click();
        assert!(select.is_open());
    }

    #[test]
    fn test_outside_dismiss_after_popover_press_clears_suppression() {
        let (mut select, _) = select_with(numbered(10), None);
        let control = control_rect();
        let on_control = Point::new(control.x() + 10.0, control.y() + 10.0);
        select.root_click();
        select.popover_pointer_down();

        select.pointer_down(Point::new(900.0, 700.0));
        assert!(!select.is_open());
        assert!(!select.suppress_next_open());

        select.pointer_down(on_control);
        select.click(on_control);
        assert!(select.is_open());
    }

    #[test]
    fn test_pointer_routing_commits_option() {
        let (mut select, changes) = select_with(numbered(10), None);
        let control = control_rect();
        let on_control = Point::new(control.x() + 10.0, control.y() + 10.0);
        select.pointer_down(on_control);
        select.click(on_control);
        assert!(select.is_open());
        assert_eq!(select.placement(), Placement::Down);

        let popover = select.popover_rect().unwrap();
        let third_row = Point::new(popover.x() + 10.0, popover.y() + 2.5 * OPTION_ROW_HEIGHT);
        assert_eq!(select.hit_test(third_row), HitTarget::Option(2));

        select.pointer_down(third_row);
        select.click(third_row);
        assert!(!select.is_open());
        assert!(!select.suppress_next_open());
        assert_eq!(changes_of(&changes), vec![Some("3".to_string())]);
    }

    #[test]
    fn test_click_on_empty_popover_keeps_open() {
        let (mut select, changes) = select_with(numbered(10), None);
        select.key_down(Key::Char('x'));
        let popover = select.popover_rect().unwrap();
        let inside = Point::new(popover.x() + 5.0, popover.y() + 5.0);
        assert_eq!(select.hit_test(inside), HitTarget::PopoverEmpty);

        select.pointer_down(inside);
        select.click(inside);
        assert!(select.is_open());
        assert!(!select.suppress_next_open());
        assert!(changes_of(&changes).is_empty());
    }

    #[test]
    fn test_caret_toggles() {
        let (mut select, _) = select_with(numbered(10), None);
        let control = control_rect();
        let caret = Point::new(control.right() - 5.0, control.y() + 20.0);
        assert_eq!(select.hit_test(caret), HitTarget::Caret);

        select.click(caret);
        assert!(select.is_open());
        select.click(caret);
        assert!(!select.is_open());
    }

    #[test]
    fn test_clear_emits_none_and_stays_closed() {
        let (mut select, changes) = select_with(numbered(10), Some("3"));
        let control = control_rect();
        let clear = Point::new(control.right() - CARET_WIDTH - 5.0, control.y() + 20.0);
        assert_eq!(select.hit_test(clear), HitTarget::Clear);

        select.pointer_down(clear);
        select.click(clear);
        assert!(!select.is_open());
        assert!(select.is_focused());
        assert_eq!(changes_of(&changes), vec![None]);
    }

    #[test]
    fn test_clear_while_open_closes() {
        let (mut select, changes) = select_with(numbered(10), Some("3"));
        select.key_down(Key::Char('1'));
        select.clear_click();
        assert!(!select.is_open());
        assert_eq!(select.query(), "");
        assert_eq!(select.active_index(), None);
        assert_eq!(changes_of(&changes), vec![None]);
    }

    #[test]
    fn test_clear_hidden_without_selection() {
        let (select, _) = select_with(numbered(10), None);
        let control = control_rect();
        let clear = Point::new(control.right() - CARET_WIDTH - 5.0, control.y() + 20.0);
        assert_eq!(select.hit_test(clear), HitTarget::Control);
    }

    #[test]
    fn test_outside_pointer_down_closes() {
        let (mut select, changes) = select_with(numbered(10), None);
        select.root_click();

        // inside the popover: stays open
        let popover = select.popover_rect().unwrap();
        assert!(!select.outside_pointer_down(Point::new(popover.x() + 1.0, popover.y() + 1.0)));
        assert!(select.is_open());

        select.pointer_down(Point::new(900.0, 700.0));
        assert!(!select.is_open());
        assert!(changes_of(&changes).is_empty());
    }

    #[test]
    fn test_placement_resolved_once_per_open() {
        let (mut select, _) = select_with(numbered(10), None);
        select.set_bounds(Rect::new(24.0, 736.0, 250.0, 40.0));
        select.root_click();
        assert_eq!(select.placement(), Placement::Up);
        let popover = select.popover_rect().unwrap();
        assert!(popover.bottom() <= 736.0);

        // resizing while open does not flip it
        select.viewport_resized(Size::new(1280.0, 2000.0));
        assert_eq!(select.placement(), Placement::Up);

        select.key_down(Key::Escape);
        select.root_click();
        assert_eq!(select.placement(), Placement::Down);
    }

    #[test]
    fn test_set_options_while_open_clamps_active() {
        let (mut select, _) = select_with(numbered(10), None);
        select.root_click();
        for _ in 0..9 {
            select.key_down(Key::ArrowDown);
        }
        assert_eq!(select.active_index(), Some(9));

        select.set_options(numbered(4));
        assert_eq!(select.active_index(), Some(3));

        select.set_options(Vec::new());
        assert_eq!(select.active_index(), None);

        select.set_options(numbered(2));
        assert_eq!(select.active_index(), Some(0));
    }

    #[test]
    fn test_listeners_scoped_to_open_and_mount() {
        let registry = ListenerRegistry::new();
        let mut select = SelectController::builder(numbered(5))
            .key("scoped")
            .registry(registry.clone())
            .bounds(control_rect())
            .viewport(Size::new(1280.0, 800.0))
            .build();

        assert_eq!(registry.count(ListenerKind::ViewportResize), 1);
        assert_eq!(registry.count(ListenerKind::OutsidePointerDown), 0);

        select.root_click();
        assert!(registry.is_listening(ListenerKind::OutsidePointerDown, "scoped"));

        // opening twice does not stack listeners
        select.key_down(Key::Enter);
        select.key_down(Key::Enter);
        select.root_click();
        assert_eq!(registry.count(ListenerKind::OutsidePointerDown), 1);

        select.key_down(Key::Escape);
        assert_eq!(registry.count(ListenerKind::OutsidePointerDown), 0);

        select.root_click();
        drop(select);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_ids() {
        let (mut select, _) = select_with(numbered(10), None);
        assert_eq!(select.list_id(), "test-select");
        assert_eq!(select.active_id(), None);
        select.root_click();
        select.key_down(Key::ArrowDown);
        assert_eq!(select.active_id().as_deref(), Some("test-select-opt-1"));
    }
}
