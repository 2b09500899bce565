//! Merge sort performed directly on a chain of queue nodes.
//!
//! Nodes are only re-linked: nothing is allocated, copied or released.
//!
//! ```text
//! split:   [d]─►[b]─►[c]─►[a]       fast checks two links ahead
//!               ▲         ▲
//!             slow       fast
//!
//!          [d]─►[b]     [c]─►[a]    cut after slow
//!
//! sort:    [b]─►[d]     [a]─►[c]    recursion depth is O(log n)
//!
//! merge:   [a]─►[b]─►[c]─►[d]       iterative, ties keep the front half first
//! ```
//!
//! All functions here take the same contract: every node reachable from the
//! given links is live, the chains are acyclic, and the caller has exclusive
//! access to them.

use super::list_queue::{Link, NodePtr};

/// Sorts `chain` ascending by payload. Stable.
///
/// # Safety
/// See the module contract.
///
pub(super) unsafe fn merge_sort(chain: Link) -> Link {
    let Some(first) = chain else {
        return None;
    };

    // SAFETY: module contract.
    unsafe {
        if (*first.as_ptr()).next.is_none() {
            return chain;
        }

        let back = split(first);
        merge(merge_sort(chain), merge_sort(back))
    }
}

/// Cuts the chain after its midpoint and returns the back half.
///
/// For odd lengths the front half keeps the extra node.
///
unsafe fn split(first: NodePtr) -> Link {
    let mut slow = first;
    let mut fast = first;

    // SAFETY: module contract.
    unsafe {
        // The fast pointer only advances while a node exists two links ahead,
        // so it never steps past the final node.
        //
        while let Some(ahead) = (*fast.as_ptr())
            .next
            .and_then(|next| (*next.as_ptr()).next)
        {
            fast = ahead;
            match (*slow.as_ptr()).next {
                Some(next) => slow = next,
                None => break,
            }
        }

        (*slow.as_ptr()).next.take()
    }
}

/// Interleaves two sorted chains into one sorted chain.
///
/// On equal payloads the node from `front` goes first.
///
unsafe fn merge(mut front: Link, mut back: Link) -> Link {
    let mut merged: Link = None;
    let mut last: Link = None;

    // SAFETY: module contract.
    unsafe {
        while let (Some(f), Some(b)) = (front, back) {
            let node = if (*f.as_ptr()).payload <= (*b.as_ptr()).payload {
                front = (*f.as_ptr()).next;
                f
            } else {
                back = (*b.as_ptr()).next;
                b
            };

            match last {
                Some(tail) => (*tail.as_ptr()).next = Some(node),
                None => merged = Some(node),
            }
            last = Some(node);
        }

        // At most one side still has nodes; it is already sorted. Linking it
        // also terminates the merged chain when both sides are exhausted.
        //
        let rest = front.or(back);
        match last {
            Some(tail) => (*tail.as_ptr()).next = rest,
            None => merged = rest,
        }
    }

    merged
}
