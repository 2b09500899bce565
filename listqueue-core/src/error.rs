//! Error types for queue operations

use thiserror::Error;

/// Queue error types
///
/// Every failure leaves the queue exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("Allocation failed for a {requested}-byte payload")]
    AllocationFailure { requested: usize },

    #[error("Queue is empty")]
    EmptyQueue,

    #[error("Queue is absent")]
    InvalidQueue,
}

/// Result type for queue operations
pub type Result<T> = std::result::Result<T, QueueError>;
