//! A binary min-heap keyed by `f32` priority.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// One queued item: its priority plus an insertion sequence number.
struct Entry<T> {
    priority: f32,
    seq: u64,
    value: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the std max-heap pops the smallest priority first.
        // Equal priorities fall back to insertion order (lower seq pops
        // first), which keeps searches deterministic. NaN compares equal.
        other
            .priority
            .partial_cmp(&self.priority)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Binary min-heap over `f32` priorities, used as the open set of every
/// search in this crate.
///
/// `push` and `pop` are O(log n). There is no decrease-key: searches push a
/// fresh entry whenever a cell's cost improves and filter the stale
/// duplicates on pop through their own bookkeeping.
pub struct MinHeap<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> MinHeap<T> {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Create an empty heap with room for `cap` entries.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(cap),
            next_seq: 0,
        }
    }

    /// Insert `value` with the given priority.
    #[inline]
    pub fn push(&mut self, priority: f32, value: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            priority,
            seq,
            value,
        });
    }

    /// Remove and return the lowest-priority entry, or `None` when empty.
    ///
    /// Entries with equal priority come out in the order they went in.
    #[inline]
    pub fn pop(&mut self) -> Option<(f32, T)> {
        self.heap.pop().map(|e| (e.priority, e.value))
    }

    /// Number of queued entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the heap holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngExt, SeedableRng};

    #[test]
    fn pops_in_ascending_priority_order() {
        let mut heap = MinHeap::new();
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for i in 0..1000 {
            heap.push(rng.random_range(0.0f32..100.0), i);
        }
        assert_eq!(heap.len(), 1000);
        let mut last = f32::NEG_INFINITY;
        while let Some((p, _)) = heap.pop() {
            assert!(p >= last, "heap popped {p} after {last}");
            last = p;
        }
        assert!(heap.is_empty());
    }

    #[test]
    fn equal_priorities_pop_first_in_first_out() {
        let mut heap = MinHeap::new();
        heap.push(1.0, "a");
        heap.push(1.0, "b");
        heap.push(0.5, "early");
        heap.push(1.0, "c");
        assert_eq!(heap.pop(), Some((0.5, "early")));
        assert_eq!(heap.pop(), Some((1.0, "a")));
        assert_eq!(heap.pop(), Some((1.0, "b")));
        assert_eq!(heap.pop(), Some((1.0, "c")));
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn interleaved_push_pop_keeps_min_on_top() {
        let mut heap = MinHeap::new();
        heap.push(5.0, 5);
        heap.push(3.0, 3);
        assert_eq!(heap.pop(), Some((3.0, 3)));
        heap.push(1.0, 1);
        heap.push(4.0, 4);
        assert_eq!(heap.pop(), Some((1.0, 1)));
        assert_eq!(heap.pop(), Some((4.0, 4)));
        assert_eq!(heap.pop(), Some((5.0, 5)));
        assert!(heap.pop().is_none());
    }

    #[test]
    fn empty_heap_reports_empty() {
        let mut heap: MinHeap<u32> = MinHeap::with_capacity(16);
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);
        assert_eq!(heap.pop(), None);
    }
}
