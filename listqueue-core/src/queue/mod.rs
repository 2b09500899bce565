//! Singly linked queue of text payloads.
//!
//! # Organization
//!
//! - [`list_queue`] - `ListQueue`: insertion at both ends, head removal, reverse, sort
//! - [`iter`] - Borrowing and owning iterators
//! - `merge_sort` - Node-relinking merge sort (internal)
//! - [`copy_out`] - Bounded, zero-terminated copy of a removed payload

pub mod copy_out;
pub mod iter;
pub mod list_queue;
mod merge_sort;

pub use copy_out::copy_terminated;
pub use iter::{IntoIter, Iter};
pub use list_queue::ListQueue;
