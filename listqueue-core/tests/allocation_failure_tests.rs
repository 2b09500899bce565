//! Payload reservations that the allocator refuses.
//!
//! The global allocator below refuses byte-aligned requests of exactly
//! `REFUSED_SIZE` bytes while armed. The switch is process-wide, so the tests
//! here run serially. Miri cannot run the mimalloc backend, so they only run
//! natively.

#![cfg(not(miri))]

use std::alloc::{GlobalAlloc, Layout};
use std::sync::atomic::{AtomicBool, Ordering};

use listqueue_core::{ListQueue, QueueError};
use mimalloc::MiMalloc;
use serial_test::serial;

const REFUSED_SIZE: usize = 7919;

static ARMED: AtomicBool = AtomicBool::new(false);

struct RefusingAllocator;

unsafe impl GlobalAlloc for RefusingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if layout.size() == REFUSED_SIZE && layout.align() == 1 && ARMED.load(Ordering::SeqCst) {
            return std::ptr::null_mut();
        }
        unsafe { MiMalloc.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { MiMalloc.dealloc(ptr, layout) }
    }
}

#[global_allocator]
static GLOBAL: RefusingAllocator = RefusingAllocator;

/// Arms the allocator for the lifetime of the value.
struct Refusal;

impl Refusal {
    fn arm() -> Self {
        ARMED.store(true, Ordering::SeqCst);
        Refusal
    }
}

impl Drop for Refusal {
    fn drop(&mut self) {
        ARMED.store(false, Ordering::SeqCst);
    }
}

#[test]
#[serial(refusing_allocator)]
fn refused_payload_leaves_queue_untouched() {
    let mut queue = ListQueue::try_from_iter(["a", "b", "c"]).unwrap();
    let oversized = "x".repeat(REFUSED_SIZE);
    let expected = Err(QueueError::AllocationFailure {
        requested: REFUSED_SIZE,
    });

    {
        let _refusal = Refusal::arm();
        assert_eq!(expected, queue.insert_head(&oversized));
        assert_eq!(expected, queue.insert_tail(&oversized));
    }

    assert_eq!(3, queue.len());
    assert_eq!(Some("a"), queue.peek_head());
    assert_eq!(Some("c"), queue.peek_tail());

    // The queue keeps working and still owns exactly its old elements.
    //
    queue.insert_tail("d").unwrap();
    assert_eq!(Some("d"), queue.peek_tail());
    assert_eq!(vec!["a", "b", "c", "d"], queue.into_iter().collect::<Vec<_>>());
}

#[test]
#[serial(refusing_allocator)]
fn refused_payload_on_empty_queue_keeps_it_empty() {
    let mut queue = ListQueue::new();
    let oversized = "y".repeat(REFUSED_SIZE);

    {
        let _refusal = Refusal::arm();
        assert!(matches!(
            queue.insert_tail(&oversized),
            Err(QueueError::AllocationFailure { .. })
        ));
        assert!(matches!(
            queue.insert_head(&oversized),
            Err(QueueError::AllocationFailure { .. })
        ));
    }

    assert!(queue.is_empty());
    assert_eq!(None, queue.peek_head());
    assert_eq!(None, queue.peek_tail());
    assert_eq!(Err(QueueError::EmptyQueue), queue.remove_head(None));

    // Disarmed, the same payload goes through.
    //
    queue.insert_tail(&oversized).unwrap();
    assert_eq!(Some(oversized.as_str()), queue.peek_head());
}

#[test]
#[serial(refusing_allocator)]
fn try_from_iter_stops_at_refused_payload() {
    let oversized = "z".repeat(REFUSED_SIZE);
    let items = vec!["a".to_string(), oversized, "b".to_string()];

    let _refusal = Refusal::arm();
    assert_eq!(
        Err(QueueError::AllocationFailure {
            requested: REFUSED_SIZE
        }),
        ListQueue::try_from_iter(&items)
    );
}
