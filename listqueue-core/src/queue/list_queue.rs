use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use tracing::{trace, warn};

use crate::error::{QueueError, Result};

use super::copy_out::copy_terminated;
use super::iter::{IntoIter, Iter};
use super::merge_sort::merge_sort;

pub(super) type NodePtr = NonNull<QueueNode>;
pub(super) type Link = Option<NodePtr>;

/// A single chain link: one owned payload and the owning link to the next node.
///
/// Links are raw pointers obtained from `Box::leak`. A node is turned back
/// into a `Box` exactly once, when it is unlinked for good.
///
pub(super) struct QueueNode {
    pub(super) payload: Box<str>,
    pub(super) next: Link,
}

impl QueueNode {
    /// Copies `text` into a payload buffer of exactly its length.
    ///
    /// The reservation is fallible so that running out of memory is reported
    /// as `AllocationFailure` before any node exists.
    ///
    fn copy_payload(text: &str) -> Result<Box<str>> {
        let mut payload = String::new();
        if let Err(error) = payload.try_reserve_exact(text.len()) {
            warn!(requested = text.len(), %error, "payload reservation failed");
            return Err(QueueError::AllocationFailure {
                requested: text.len(),
            });
        }

        payload.push_str(text);
        Ok(payload.into_boxed_str())
    }

    pub(super) fn alloc(payload: Box<str>, next: Link) -> NodePtr {
        NonNull::from(Box::leak(Box::new(QueueNode { payload, next })))
    }

    /// Takes ownership of a node back from the chain.
    ///
    /// # Safety
    /// - `node` must come from `QueueNode::alloc`
    /// - It must already be unlinked and must not be freed twice
    ///
    pub(super) unsafe fn free(node: NodePtr) -> Box<QueueNode> {
        // SAFETY: caller guarantees `node` came from `Box::leak` and is unique.
        unsafe { Box::from_raw(node.as_ptr()) }
    }
}

///
/// Singly linked queue of text payloads with a cached tail for O(1) append.
///
/// ```text
///   head ──►[ "b" ]──►[ "a" ]──►[ "c" ]──► None
///                                 ▲
///   tail ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─┘  (non-owning)
/// ```
///
// INVARIANTS:
// 1. `size` equals the number of nodes reachable from `head`
// 2. `tail` is None iff `head` is None
// 3. Otherwise `tail` points at the one reachable node whose `next` is None
// 4. Every node is owned by exactly one link: `head` or a predecessor's `next`
//
// Every link, `tail` included, is a copy of the pointer produced when the node
// was leaked, so relinking never invalidates another link to the same node.
// Nodes are only freed through `unlink_head`, and `tail` is refreshed by every
// operation that can change the last node.
//
// A queue is owned by a single caller. It can be moved to another thread
// (`Send`) but not shared between threads without external locking.
//
pub struct ListQueue {
    head: Link,
    tail: Link,
    size: usize,
    marker: PhantomData<Box<QueueNode>>,
}

// SAFETY: the queue owns every node reachable from `head`, so moving the queue
// moves everything its pointers can reach. Payloads are plain `str`.
unsafe impl Send for ListQueue {}

impl ListQueue {
    /// Creates a new empty queue.
    ///
    pub fn new() -> Self {
        ListQueue {
            head: None,
            tail: None,
            size: 0,
            marker: PhantomData,
        }
    }

    /// Builds a queue by appending every item in order.
    ///
    /// Stops at the first allocation failure; the partially built queue is
    /// released.
    ///
    pub fn try_from_iter<I, S>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut queue = ListQueue::new();
        for item in items {
            queue.insert_tail(item.as_ref())?;
        }
        Ok(queue)
    }

    /// Number of elements. O(1).
    ///
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Inserts a copy of `text` before the current head.
    ///
    /// On `AllocationFailure` the queue is unchanged.
    ///
    pub fn insert_head(&mut self, text: &str) -> Result<()> {
        let payload = QueueNode::copy_payload(text)?;
        let node = QueueNode::alloc(payload, self.head);

        if self.tail.is_none() {
            self.tail = Some(node);
        }
        self.head = Some(node);
        self.size += 1;
        Ok(())
    }

    /// Appends a copy of `text` after the current tail in O(1).
    ///
    /// On `AllocationFailure` the queue is unchanged.
    ///
    pub fn insert_tail(&mut self, text: &str) -> Result<()> {
        let payload = QueueNode::copy_payload(text)?;
        let node = QueueNode::alloc(payload, None);

        match self.tail {
            // SAFETY: `tail` is a live node owned by this queue and `&mut self`
            // gives exclusive access to the chain.
            Some(last) => unsafe { (*last.as_ptr()).next = Some(node) },
            None => self.head = Some(node),
        }

        self.tail = Some(node);
        self.size += 1;
        Ok(())
    }

    /// Removes the head element.
    ///
    /// When `out` is given, the payload is copied into it truncated to
    /// `out.len() - 1` bytes plus a `0` terminator. Nothing is written past the
    /// end of `out`, and a zero-length `out` receives nothing.
    ///
    /// Returns `EmptyQueue` without touching `out` if there is nothing to remove.
    ///
    pub fn remove_head(&mut self, out: Option<&mut [u8]>) -> Result<()> {
        let node = self.unlink_head().ok_or(QueueError::EmptyQueue)?;
        if let Some(buffer) = out {
            copy_terminated(&node.payload, buffer);
        }
        Ok(())
    }

    /// Removes the head element and returns its payload without copying.
    ///
    pub fn pop_head(&mut self) -> Option<String> {
        self.unlink_head().map(|node| node.payload.into_string())
    }

    pub fn peek_head(&self) -> Option<&str> {
        // SAFETY: nodes reachable from the queue live at least as long as `&self`.
        self.head.map(|first| unsafe { &*(*first.as_ptr()).payload })
    }

    pub fn peek_tail(&self) -> Option<&str> {
        // SAFETY: as for `peek_head`.
        self.tail.map(|last| unsafe { &*(*last.as_ptr()).payload })
    }

    /// Reverses the element order in place. Relinks nodes; never allocates.
    ///
    pub fn reverse(&mut self) {
        if self.size <= 1 {
            return;
        }
        trace!(len = self.size, "reversing queue");

        let mut reversed: Link = None;
        let mut remaining = self.head;
        while let Some(node) = remaining {
            // SAFETY: `node` is a live node of this queue; `&mut self` is exclusive.
            unsafe {
                remaining = (*node.as_ptr()).next;
                (*node.as_ptr()).next = reversed;
            }
            reversed = Some(node);
        }

        // The old head ends up last.
        //
        self.tail = self.head;
        self.head = reversed;
    }

    /// Sorts ascending by byte-wise payload comparison. Stable.
    ///
    /// Relinks nodes with a merge sort; never allocates. Recursion depth is
    /// logarithmic in the number of elements.
    ///
    pub fn sort(&mut self) {
        if self.size <= 1 {
            return;
        }
        trace!(len = self.size, "sorting queue");

        // SAFETY: the chain from `head` is well formed, acyclic and exclusively
        // ours for the duration of `&mut self`.
        self.head = unsafe { merge_sort(self.head) };
        self.tail = self.last_node();
    }

    /// Releases every element. The queue stays usable.
    ///
    pub fn clear(&mut self) {
        if self.size > 0 {
            trace!(len = self.size, "clearing queue");
        }

        // One node at a time, so releasing a long chain never recurses.
        //
        while self.unlink_head().is_some() {}
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.head, self.size)
    }

    fn unlink_head(&mut self) -> Option<Box<QueueNode>> {
        let first = self.head?;

        // SAFETY: `first` came from `QueueNode::alloc`, and moving `head` past it
        // below leaves no other link to it except `tail`, which is cleared too
        // when it was the last node.
        let node = unsafe { QueueNode::free(first) };
        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        self.size -= 1;
        Some(node)
    }

    fn last_node(&self) -> Link {
        let mut last = None;
        let mut cursor = self.head;
        while let Some(node) = cursor {
            last = Some(node);
            // SAFETY: `node` is a live node of this queue.
            cursor = unsafe { (*node.as_ptr()).next };
        }
        last
    }

    /// Panics if any structural invariant is broken.
    ///
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let mut count = 0usize;
        let mut last = None;
        let mut cursor = self.head;
        while let Some(node) = cursor {
            count += 1;
            last = Some(node);
            cursor = unsafe { (*node.as_ptr()).next };
        }

        assert_eq!(count, self.size, "size does not match reachable nodes");
        assert_eq!(last, self.tail, "tail is not the last reachable node");
    }
}

impl Default for ListQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ListQueue {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for ListQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl PartialEq for ListQueue {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl Eq for ListQueue {}

impl<'a> IntoIterator for &'a ListQueue {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for ListQueue {
    type Item = String;
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}
