//! Pickbox Core
//!
//! Framework-independent primitives shared by the Pickbox widgets and host:
//!
//! - **Store**: subscribable state containers for host-owned slices
//! - **State Machines**: `StateTransitions` tables for widget interaction states
//! - **Geometry**: points, sizes, and rects for placement and hit testing
//! - **Events**: logical key presses
//! - **Listeners**: scoped, guard-released global listeners
//! - **Keys**: unique instance keys

pub mod events;
pub mod fsm;
pub mod geometry;
pub mod key;
pub mod listeners;
pub mod store;

pub use events::Key;
pub use fsm::{transition, StateTransitions};
pub use geometry::{Point, Rect, Size};
pub use key::InstanceKey;
pub use listeners::{ListenerGuard, ListenerKind, ListenerRegistry};
pub use store::{Store, SubscriptionHandle};
