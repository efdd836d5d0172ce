//! Tug Control
//!
//! A pull-to-refresh control for scrollable containers.
//!
//! The control tracks the user's drag gesture through (offset, dragging)
//! samples, arms once the pull crosses a threshold, and enters `Refreshing`
//! on release — notifying an external listener exactly once per cycle and
//! reserving space for itself by animating the container's top inset.
//!
//! # Example
//!
//! ```rust
//! use tug_control::{RefreshControl, ScrollRegion, SharedContainer};
//!
//! let region = ScrollRegion::shared(0.0);
//! let container: SharedContainer = region.clone();
//!
//! let control = RefreshControl::new().on_refresh(|| {
//!     // kick off the data refresh; call end_refreshing() when done
//! });
//! control.attach(&container).unwrap();
//!
//! // The host delivers offset changes; crossing -50 while dragging arms,
//! // releasing triggers the refresh.
//! ScrollRegion::set_offset(&region, -60.0, true);
//! ScrollRegion::set_offset(&region, -60.0, false);
//! assert!(control.is_refreshing());
//!
//! control.end_refreshing();
//! ```
//!
//! Refresh completion is caller-driven: `Refreshing` persists until
//! [`RefreshControl::end_refreshing`] is called. There is no timeout.

pub mod binding;
pub mod control;
pub mod error;
pub mod scrollable;
pub mod view;

pub use binding::ScrollObserverBinding;
pub use control::{RefreshControl, RefreshListener};
pub use error::{AttachError, Result};
pub use scrollable::{
    OffsetObserver, ScrollContainer, ScrollRegion, SharedContainer, SubscriptionId,
};
pub use view::RefreshControlView;
