//! Host state slices
//!
//! Each slice is a plain state struct plus the reducers that move it between
//! states. The host keeps every slice in a [`pickbox_core::Store`] and
//! dispatches reducers with `Store::update`.

pub mod options;
pub mod selection;

pub use options::{LoadStatus, OptionsState};
pub use selection::{Notice, NoticeKind, SelectionState};
