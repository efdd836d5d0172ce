//! Attach-time error types

use thiserror::Error;

/// Errors raised while binding the control to a scroll container
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachError {
    /// attach() called while already bound to a different container.
    /// Non-fatal: rejected synchronously with no state change.
    #[error("refresh control is already attached to a different scroll container")]
    AlreadyAttached,

    /// The container cannot deliver offset-change notifications. Fatal at
    /// attach time: the control cannot function without offset observation.
    #[error("scroll container does not support offset observation")]
    ObservationUnsupported,
}

/// Result type for attach operations
pub type Result<T> = std::result::Result<T, AttachError>;
