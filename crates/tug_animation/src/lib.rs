//! Tug Animation
//!
//! Time-based visual transitions for the pull-to-refresh control.
//!
//! The control itself never blocks on an animation: it *requests* a
//! transition ([`TransitionSpec`]) and the rendering layer drives it with a
//! [`Tween`] stepped once per frame. Logical refresh state stays
//! authoritative regardless of whether a tween has visually finished.

pub mod easing;
pub mod tween;

pub use easing::Easing;
pub use tween::{TransitionSpec, Tween};
