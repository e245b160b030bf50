//! Scoped global listeners
//!
//! Some widget behavior needs process-wide input: dismissing a popover when
//! the pointer goes down anywhere outside it, or tracking viewport resizes.
//! Instead of ambient registration, a widget acquires a [`ListenerGuard`]
//! from the host's [`ListenerRegistry`] and the listener lives exactly as
//! long as the guard. Dropping the guard (on close, on unmount, or while
//! unwinding) releases the listener, so listeners cannot leak across mounts.
//!
//! The registry only does bookkeeping. The host asks it which owners are
//! currently listening for a kind of event and routes the event to them.
//!
//! ```
//! use pickbox_core::listeners::{ListenerKind, ListenerRegistry};
//!
//! let registry = ListenerRegistry::new();
//! {
//!     let _guard = registry.attach(ListenerKind::OutsidePointerDown, "select-1");
//!     assert_eq!(registry.count(ListenerKind::OutsidePointerDown), 1);
//! }
//! assert_eq!(registry.count(ListenerKind::OutsidePointerDown), 0);
//! ```

use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Kinds of process-wide listeners a widget can hold
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Pointer-down anywhere in the window (capture phase)
    OutsidePointerDown,
    /// Viewport size changes
    ViewportResize,
}

#[derive(Debug)]
struct ListenerEntry {
    kind: ListenerKind,
    owner: String,
}

#[derive(Debug, Default)]
struct RegistryInner {
    next_id: u64,
    entries: FxHashMap<u64, ListenerEntry>,
}

/// Host-side registry of live listeners
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    inner: Mutex<RegistryInner>,
}

impl ListenerRegistry {
    /// Create a shared registry
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Acquire a listener of `kind` on behalf of `owner`
    ///
    /// The listener is released when the returned guard is dropped.
    pub fn attach(self: &Arc<Self>, kind: ListenerKind, owner: impl Into<String>) -> ListenerGuard {
        let owner = owner.into();
        let id = {
            let mut inner = self.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.entries.insert(
                id,
                ListenerEntry {
                    kind,
                    owner: owner.clone(),
                },
            );
            id
        };
        tracing::trace!(?kind, %owner, id, "listener attached");
        ListenerGuard {
            registry: Arc::clone(self),
            id,
        }
    }

    /// Number of live listeners of `kind`
    pub fn count(&self, kind: ListenerKind) -> usize {
        self.lock()
            .entries
            .values()
            .filter(|e| e.kind == kind)
            .count()
    }

    /// Owners currently listening for `kind`, in no particular order
    pub fn owners(&self, kind: ListenerKind) -> Vec<String> {
        self.lock()
            .entries
            .values()
            .filter(|e| e.kind == kind)
            .map(|e| e.owner.clone())
            .collect()
    }

    /// Whether `owner` holds a listener of `kind`
    pub fn is_listening(&self, kind: ListenerKind, owner: &str) -> bool {
        self.lock()
            .entries
            .values()
            .any(|e| e.kind == kind && e.owner == owner)
    }

    /// Total number of live listeners
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn detach(&self, id: u64) {
        if let Some(entry) = self.lock().entries.remove(&id) {
            tracing::trace!(kind = ?entry.kind, owner = %entry.owner, id, "listener detached");
        }
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// RAII handle for a live listener
#[derive(Debug)]
pub struct ListenerGuard {
    registry: Arc<ListenerRegistry>,
    id: u64,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.registry.detach(self.id);
    }
}
