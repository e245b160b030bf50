//! Catalog loading slice

use pickbox_select::SelectOption;

/// Where the catalog load stands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl LoadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStatus::Idle => "idle",
            LoadStatus::Loading => "loading",
            LoadStatus::Succeeded => "succeeded",
            LoadStatus::Failed => "failed",
        }
    }
}

/// The option catalog and its load status
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OptionsState {
    pub items: Vec<SelectOption>,
    pub status: LoadStatus,
    pub error: Option<String>,
    /// Id of the newest request; older completions are ignored
    pub request_id: u64,
}

impl OptionsState {
    /// A new load started. Returns its request id.
    pub fn pending(&mut self) -> u64 {
        self.request_id += 1;
        self.status = LoadStatus::Loading;
        self.error = None;
        self.request_id
    }

    /// Load `request_id` succeeded. Returns false if it was superseded.
    pub fn fulfilled(&mut self, request_id: u64, items: Vec<SelectOption>) -> bool {
        if request_id != self.request_id {
            tracing::debug!(request_id, current = self.request_id, "ignoring stale catalog");
            return false;
        }
        self.items = items;
        self.status = LoadStatus::Succeeded;
        self.error = None;
        true
    }

    /// Load `request_id` failed; the catalog is cleared
    pub fn rejected(&mut self, request_id: u64, error: impl Into<String>) -> bool {
        if request_id != self.request_id {
            tracing::debug!(request_id, current = self.request_id, "ignoring stale failure");
            return false;
        }
        self.items.clear();
        self.status = LoadStatus::Failed;
        self.error = Some(error.into());
        true
    }

    /// Back to idle with an empty catalog; in-flight loads become stale
    pub fn reset(&mut self) {
        self.items.clear();
        self.status = LoadStatus::Idle;
        self.error = None;
        self.request_id += 1;
    }
}
