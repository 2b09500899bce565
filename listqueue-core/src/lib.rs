//! Singly linked text queue with O(1) insertion at both ends, head removal,
//! in-place reversal and a stable node-relinking merge sort.
//!
//! A [`ListQueue`] is owned by one caller at a time. It may be moved between
//! threads, but sharing it needs external locking.

pub mod api;
pub mod common_tests;
pub mod error;
pub mod queue;

pub use error::{QueueError, Result};
pub use queue::{IntoIter, Iter, ListQueue};
