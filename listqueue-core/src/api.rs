//! Total queue operations over a possibly-absent queue.
//!
//! Each function accepts `Option<&mut ListQueue>` (or `Option<&ListQueue>`) so
//! that "no queue" is an ordinary input rather than a crash. Mutations on an
//! absent queue fail with [`QueueError::InvalidQueue`]; queries and in-place
//! reorderings on an absent queue are no-ops.
//!
//! ```
//! use listqueue_core::api;
//!
//! let mut queue = api::create();
//! api::insert_tail(Some(&mut queue), "hello").unwrap();
//!
//! let mut out = [0u8; 2];
//! api::remove_head(Some(&mut queue), Some(&mut out)).unwrap();
//! assert_eq!(b"h\0", &out);
//! assert_eq!(0, api::size(Some(&queue)));
//! ```

use crate::error::{QueueError, Result};
use crate::queue::ListQueue;

pub fn create() -> ListQueue {
    ListQueue::new()
}

/// Releases the queue and every element it holds. `None` is a no-op.
///
pub fn destroy(queue: Option<ListQueue>) {
    drop(queue);
}

pub fn insert_head(queue: Option<&mut ListQueue>, text: &str) -> Result<()> {
    queue.ok_or(QueueError::InvalidQueue)?.insert_head(text)
}

pub fn insert_tail(queue: Option<&mut ListQueue>, text: &str) -> Result<()> {
    queue.ok_or(QueueError::InvalidQueue)?.insert_tail(text)
}

/// Removes the head element, copying it into `out` if given.
///
/// See [`ListQueue::remove_head`] for the copy-out contract.
///
pub fn remove_head(queue: Option<&mut ListQueue>, out: Option<&mut [u8]>) -> Result<()> {
    queue.ok_or(QueueError::InvalidQueue)?.remove_head(out)
}

pub fn size(queue: Option<&ListQueue>) -> usize {
    queue.map_or(0, ListQueue::len)
}

pub fn reverse(queue: Option<&mut ListQueue>) {
    if let Some(queue) = queue {
        queue.reverse();
    }
}

pub fn sort(queue: Option<&mut ListQueue>) {
    if let Some(queue) = queue {
        queue.sort();
    }
}
