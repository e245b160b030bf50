//! Scroll state of the popover's option list
//!
//! Options are laid out in fixed-height rows. Keyboard navigation keeps the
//! highlighted row inside the visible window with the smallest scroll that
//! reveals it.

/// Fixed height of an option row
pub const OPTION_ROW_HEIGHT: f32 = 32.0;

/// Visible window over a list of fixed-height rows
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ListViewport {
    /// Distance scrolled from the top of the list
    scroll_top: f32,
    /// Row height
    row_height: f32,
    /// Visible height
    height: f32,
    /// Number of rows in the list
    rows: usize,
}

impl Default for ListViewport {
    fn default() -> Self {
        Self::new(OPTION_ROW_HEIGHT)
    }
}

impl ListViewport {
    pub fn new(row_height: f32) -> Self {
        Self {
            scroll_top: 0.0,
            row_height,
            height: 0.0,
            rows: 0,
        }
    }

    pub fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Total height of all rows
    pub fn content_height(&self) -> f32 {
        self.rows as f32 * self.row_height
    }

    /// Resize the window, clamping the scroll offset to the new content
    pub fn resize(&mut self, rows: usize, height: f32) {
        self.rows = rows;
        self.height = height.max(0.0);
        let max_scroll = (self.content_height() - self.height).max(0.0);
        self.scroll_top = self.scroll_top.clamp(0.0, max_scroll);
    }

    /// Scroll back to the top
    pub fn reset(&mut self) {
        self.scroll_top = 0.0;
    }

    /// Scroll by `dy`, clamped to the content
    pub fn scroll_by(&mut self, dy: f32) {
        let max_scroll = (self.content_height() - self.height).max(0.0);
        self.scroll_top = (self.scroll_top + dy).clamp(0.0, max_scroll);
    }

    /// Scroll the minimum amount that makes row `index` fully visible
    ///
    /// Returns true if the offset changed.
    pub fn ensure_visible(&mut self, index: usize) -> bool {
        let top = index as f32 * self.row_height;
        let bottom = top + self.row_height;
        let before = self.scroll_top;
        if top < self.scroll_top {
            self.scroll_top = top;
        } else if bottom > self.scroll_top + self.height {
            self.scroll_top = bottom - self.height;
        }
        self.scroll_top != before
    }

    /// Row under a y offset measured from the top of the visible window
    pub fn row_at(&self, local_y: f32) -> Option<usize> {
        if local_y < 0.0 || local_y > self.height {
            return None;
        }
        let idx = ((local_y + self.scroll_top) / self.row_height).floor() as usize;
        (idx < self.rows).then_some(idx)
    }

    /// Rows at least partially visible, as a half-open range
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        if self.rows == 0 || self.row_height <= 0.0 {
            return 0..0;
        }
        let first = (self.scroll_top / self.row_height).floor() as usize;
        let last = ((self.scroll_top + self.height) / self.row_height).ceil() as usize;
        first.min(self.rows)..last.min(self.rows)
    }
}
