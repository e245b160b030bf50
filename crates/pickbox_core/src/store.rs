//! Pickbox Store - Zustand-inspired centralized state container
//!
//! A `Store<T>` owns one state value and notifies subscribers after every
//! mutation. Host applications keep their slices (catalog loading, the
//! selected value, submission status) in stores and let widgets read from and
//! dispatch into them, so the state outlives any single widget instance.
//!
//! # Example
//!
//! ```
//! use pickbox_core::store::Store;
//!
//! #[derive(Clone, Default, Debug)]
//! struct Counter {
//!     value: i32,
//! }
//!
//! let store = Store::<Counter>::new();
//! let handle = store.subscribe(|c| println!("counter is now {}", c.value));
//!
//! store.update(|c| c.value += 1);
//! assert_eq!(store.get().value, 1);
//!
//! store.unsubscribe(handle);
//! ```

use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

type Subscriber<T> = Box<dyn Fn(&T) + Send + Sync>;

/// A typed, subscribable state container
pub struct Store<T: Clone + Send + Sync + 'static> {
    /// Current state
    state: RwLock<T>,
    /// Subscribers keyed by subscription id
    subscribers: RwLock<FxHashMap<u64, Subscriber<T>>>,
    /// Next subscription id
    next_id: AtomicU64,
}

impl<T: Clone + Send + Sync + Default + 'static> Store<T> {
    /// Create a new store holding `T::default()`
    pub fn new() -> Self {
        Self::with_state(T::default())
    }
}

impl<T: Clone + Send + Sync + 'static> Store<T> {
    /// Create a new store with an initial state
    pub fn with_state(state: T) -> Self {
        Self {
            state: RwLock::new(state),
            subscribers: RwLock::new(FxHashMap::default()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Get a snapshot of the current state
    pub fn get(&self) -> T {
        read(&self.state).clone()
    }

    /// Read the state through a closure without cloning all of it
    pub fn select<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&read(&self.state))
    }

    /// Replace the state
    pub fn set(&self, state: T) {
        {
            let mut current = write(&self.state);
            *current = state.clone();
        }
        self.notify_subscribers(&state);
    }

    /// Update the state using a closure
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        self.update_with(f);
    }

    /// Update state and return a value
    pub fn update_with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let (result, state) = {
            let mut current = write(&self.state);
            let result = f(&mut current);
            (result, current.clone())
        };
        self.notify_subscribers(&state);
        result
    }

    /// Subscribe to state changes
    ///
    /// Subscribers run synchronously after each mutation, outside the state
    /// lock, so they may read the store. They must not subscribe or
    /// unsubscribe from inside the callback.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionHandle
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        write(&self.subscribers).insert(id, Box::new(callback));
        SubscriptionHandle { id }
    }

    /// Remove a subscriber. Returns false if it was already removed.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        write(&self.subscribers).remove(&handle.id).is_some()
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        read(&self.subscribers).len()
    }

    fn notify_subscribers(&self, state: &T) {
        let subscribers = read(&self.subscribers);
        for callback in subscribers.values() {
            callback(state);
        }
    }
}

impl<T: Clone + Send + Sync + Default + 'static> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + std::fmt::Debug + 'static> std::fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &*read(&self.state))
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Handle for unsubscribing from store updates
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    id: u64,
}

// A panicking subscriber must not take the whole store down with it.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicI32;
    use std::sync::Arc;

    #[derive(Clone, Default, Debug, PartialEq)]
    struct TestState {
        count: i32,
        name: String,
    }

    #[test]
    fn test_store_basic() {
        let store = Store::<TestState>::new();

        let state = store.get();
        assert_eq!(state.count, 0);
        assert_eq!(state.name, "");

        store.set(TestState {
            count: 42,
            name: "hello".into(),
        });

        let state = store.get();
        assert_eq!(state.count, 42);
        assert_eq!(state.name, "hello");
    }

    #[test]
    fn test_store_update() {
        let store = Store::<TestState>::new();

        store.update(|s| s.count = 10);
        assert_eq!(store.get().count, 10);

        store.update(|s| s.count += 5);
        assert_eq!(store.get().count, 15);
    }

    #[test]
    fn test_store_update_with() {
        let store = Store::with_state(TestState {
            count: 10,
            name: "foo".into(),
        });

        let old_count = store.update_with(|s| {
            let old = s.count;
            s.count = 20;
            old
        });

        assert_eq!(old_count, 10);
        assert_eq!(store.get().count, 20);
        assert_eq!(store.select(|s| s.name.clone()), "foo");
    }

    #[test]
    fn test_subscriber() {
        let store = Store::<TestState>::new();
        let call_count = Arc::new(AtomicI32::new(0));
        let call_count_clone = call_count.clone();

        let handle = store.subscribe(move |state: &TestState| {
            call_count_clone.fetch_add(1, Ordering::SeqCst);
            assert!(state.count >= 0);
        });

        store.set(TestState {
            count: 1,
            name: "".into(),
        });
        assert_eq!(call_count.load(Ordering::SeqCst), 1);

        store.update(|s| s.count = 2);
        assert_eq!(call_count.load(Ordering::SeqCst), 2);

        assert!(store.unsubscribe(handle));
        store.update(|s| s.count = 3);
        assert_eq!(call_count.load(Ordering::SeqCst), 2);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_subscriber_sees_new_state() {
        let store = Arc::new(Store::<TestState>::new());
        let seen = Arc::new(AtomicI32::new(-1));
        let seen_clone = seen.clone();

        let _handle = store.subscribe(move |s| seen_clone.store(s.count, Ordering::SeqCst));
        store.update(|s| s.count = 7);
        assert_eq!(seen.load(Ordering::SeqCst), 7);
    }
}
