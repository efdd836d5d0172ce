//! Tug Core
//!
//! The pure heart of the pull-to-refresh control: a small state machine that
//! interprets scroll-offset samples into discrete refresh states.
//!
//! - **States**: `Idle` → `Armed` (pulled past the threshold while dragging)
//!   → `Refreshing` (drag released while armed) → back to `Idle`
//! - **Pure transitions**: [`on_sample`] and [`on_end_refreshing`] return the
//!   new state plus a list of [`SideEffect`] descriptions; nothing in this
//!   crate touches a container, a view or a listener
//! - **Geometry**: [`RefreshGeometry`] derives the arming threshold from the
//!   container's base top inset and the control height
//!
//! # Example
//!
//! ```rust
//! use tug_core::{on_sample, RefreshGeometry, RefreshState, Sample};
//!
//! let geometry = RefreshGeometry::default(); // height 50, base inset 0
//! let pulled = Sample { offset_y: -60.0, dragging: true };
//!
//! let (state, _effects) = on_sample(RefreshState::Idle, pulled, geometry).unwrap();
//! assert_eq!(state, RefreshState::Armed);
//! ```

pub mod geometry;
pub mod state;

pub use geometry::{RefreshGeometry, DEFAULT_CONTROL_HEIGHT};
pub use state::{
    on_end_refreshing, on_sample, CosmeticPhase, Effects, RefreshState, Sample, SideEffect,
};
