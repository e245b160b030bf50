//! Stable unique keys for widget instances.
//!
//! Every widget instance needs an identifier that is unique across concurrently
//! mounted instances: the select uses it for its listbox id, its option ids,
//! and as the owner name of its scoped listeners.
//!
//! # Example
//!
//! ```
//! use pickbox_core::key::InstanceKey;
//!
//! let key = InstanceKey::new("listbox");
//! assert!(key.get().starts_with("listbox-"));
//! assert_eq!(key.derive("opt-3"), format!("{}-opt-3", key.get()));
//!
//! let fixed = InstanceKey::explicit("country");
//! assert_eq!(fixed.get(), "country");
//! ```

use uuid::Uuid;

/// A unique key for a widget instance.
///
/// Key format: `{prefix}-{uuid}` where the uuid is rendered without hyphens.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct InstanceKey {
    key: String,
}

impl InstanceKey {
    /// Generate a fresh key with the given prefix
    pub fn new(prefix: &str) -> Self {
        Self {
            key: format!("{}-{}", prefix, Uuid::new_v4().as_simple()),
        }
    }

    /// Use an explicit key (deterministic ids for tests and scripted hosts)
    pub fn explicit(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn get(&self) -> &str {
        &self.key
    }

    /// Create a derived key for sub-elements (`{key}-{suffix}`)
    pub fn derive(&self, suffix: &str) -> String {
        format!("{}-{}", self.key, suffix)
    }
}

impl std::fmt::Debug for InstanceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InstanceKey({})", self.key)
    }
}
