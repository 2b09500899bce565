use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::list_queue::{Link, ListQueue, QueueNode};

/// Borrowing iterator over payloads, head to tail.
///
pub struct Iter<'a> {
    next: Link,
    remaining: usize,
    marker: PhantomData<&'a QueueNode>,
}

impl<'a> Iter<'a> {
    pub(super) fn new(head: Link, len: usize) -> Self {
        Iter {
            next: head,
            remaining: len,
            marker: PhantomData,
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        // SAFETY: the queue is borrowed for `'a`, so its nodes stay alive and
        // unmodified while the iterator exists.
        let node: &'a QueueNode = unsafe { &*self.next?.as_ptr() };
        self.next = node.next;
        self.remaining -= 1;
        Some(&*node.payload)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

/// Owning iterator; pops payloads off the head.
///
pub struct IntoIter {
    queue: ListQueue,
}

impl IntoIter {
    pub(super) fn new(queue: ListQueue) -> Self {
        IntoIter { queue }
    }
}

impl Iterator for IntoIter {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_head()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), Some(self.queue.len()))
    }
}

impl ExactSizeIterator for IntoIter {}

impl FusedIterator for IntoIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iter_reports_exact_size() {
        let queue = ListQueue::try_from_iter(["a", "b", "c"]).unwrap();
        let mut iter = queue.iter();

        assert_eq!(3, iter.len());
        assert_eq!(Some("a"), iter.next());
        assert_eq!(2, iter.len());
        assert_eq!(vec!["b", "c"], iter.collect::<Vec<_>>());
    }

    #[test]
    fn iter_is_fused() {
        let queue = ListQueue::try_from_iter(["a"]).unwrap();
        let mut iter = queue.iter();

        assert_eq!(Some("a"), iter.next());
        assert_eq!(None, iter.next());
        assert_eq!(None, iter.next());
    }

    #[test]
    fn for_loop_over_reference() {
        let queue = ListQueue::try_from_iter(["x", "y"]).unwrap();
        let mut seen = String::new();
        for payload in &queue {
            seen.push_str(payload);
        }
        assert_eq!("xy", seen);
    }

    #[test]
    fn into_iter_drains_in_order() {
        let queue = ListQueue::try_from_iter(["1", "2", "3"]).unwrap();
        let mut iter = queue.into_iter();

        assert_eq!(3, iter.len());
        assert_eq!(Some("1".to_string()), iter.next());
        assert_eq!(vec!["2", "3"], iter.collect::<Vec<_>>());
    }
}
