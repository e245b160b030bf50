//! Finite state machines for widget interaction states
//!
//! Widgets describe their interaction states as small `Copy` enums and map
//! numeric event ids to transitions. Keeping the table in one `match` makes
//! every legal transition visible at a glance and testable without a host.
//!
//! # Example
//!
//! ```
//! use pickbox_core::fsm::{transition, StateTransitions};
//!
//! const PRESS: u32 = 1;
//! const RELEASE: u32 = 2;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
//! enum ButtonState {
//!     #[default]
//!     Idle,
//!     Pressed,
//! }
//!
//! impl StateTransitions for ButtonState {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (ButtonState::Idle, PRESS) => Some(ButtonState::Pressed),
//!             (ButtonState::Pressed, RELEASE) => Some(ButtonState::Idle),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut state = ButtonState::Idle;
//! assert!(transition(&mut state, PRESS));
//! assert_eq!(state, ButtonState::Pressed);
//! assert!(!transition(&mut state, PRESS));
//! ```

use std::hash::Hash;

/// A state type that maps events to transitions
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;
}

/// Apply `event` to `state` in place
///
/// Returns true when the state changed.
pub fn transition<S: StateTransitions>(state: &mut S, event: u32) -> bool {
    match state.on_event(event) {
        Some(next) if next != *state => {
            tracing::trace!(from = ?*state, to = ?next, event, "state transition");
            *state = next;
            true
        }
        _ => false,
    }
}
