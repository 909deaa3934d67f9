// Copyright 2026 the Barrage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generic FIFO queue with handle-based removal and a restartable cursor.
//!
//! [`LinkedQueue`] stores values in slots inside a contiguous arena, linked
//! head→tail by index. Slots are recycled via a free list, and generation
//! counters turn access through a stale [`NodeId`] into a benign no-op
//! rather than a crash — the scheduler relies on this for idempotent
//! pruning.
//!
//! Two ways to scan the queue coexist:
//!
//! - [`iter`](LinkedQueue::iter) / [`for_each_while`](LinkedQueue::for_each_while)
//!   own their position and can run concurrently with each other.
//! - [`step`](LinkedQueue::step) drives the queue-owned cursor one node per
//!   call: a full pass ends with `None` and leaves the cursor rewound, ready
//!   for the next pass. [`remove`](LinkedQueue::remove) repairs this cursor,
//!   so a scan may unlink the node it is standing on and continue with that
//!   node's successor. Only one step-driven scan may be in flight per queue.

use alloc::vec::Vec;
use core::fmt;

/// Sentinel index meaning "no slot" in head/tail/next/cursor fields.
const INVALID_IDX: u32 = u32::MAX;

/// A handle to a value inside a [`LinkedQueue`].
///
/// Contains both a slot index and a generation counter so that handles to
/// dequeued or removed values can be detected and ignored.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    idx: u32,
    generation: u32,
}

impl NodeId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}@gen{})", self.idx, self.generation)
    }
}

struct Slot<T> {
    value: Option<T>,
    next: u32,
    generation: u32,
}

/// A singly linked FIFO queue over an arena of slots.
///
/// `enqueue` and `dequeue` are O(1); `remove` is an O(n) scan for the
/// predecessor. Dequeue on an empty queue and removal of a value that is no
/// longer present are defined as no-ops.
pub struct LinkedQueue<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    head: u32,
    tail: u32,
    len: usize,
    /// Position of the queue-owned step cursor; `INVALID_IDX` = before head.
    cursor: u32,
}

impl<T> fmt::Debug for LinkedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedQueue")
            .field("len", &self.len)
            .field("capacity", &self.slots.len())
            .finish_non_exhaustive()
    }
}

impl<T> Default for LinkedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LinkedQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: INVALID_IDX,
            tail: INVALID_IDX,
            len: 0,
            cursor: INVALID_IDX,
        }
    }

    /// Returns the number of queued values.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the queue holds no values.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends `value` at the tail and returns its handle.
    pub fn enqueue(&mut self, value: T) -> NodeId {
        let idx = if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.value = Some(value);
            slot.next = INVALID_IDX;
            idx
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "a queue with 2^32 live slots is out of scope"
            )]
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                value: Some(value),
                next: INVALID_IDX,
                generation: 0,
            });
            idx
        };

        if self.tail == INVALID_IDX {
            self.head = idx;
        } else {
            self.slots[self.tail as usize].next = idx;
        }
        self.tail = idx;
        self.len += 1;

        NodeId {
            idx,
            generation: self.slots[idx as usize].generation,
        }
    }

    /// Removes and returns the head value, or `None` if the queue is empty.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.head == INVALID_IDX {
            return None;
        }
        let idx = self.head;
        if self.cursor == idx {
            // A scan standing on the departing head restarts at the new head.
            self.cursor = INVALID_IDX;
        }

        let slot = &mut self.slots[idx as usize];
        let value = slot.value.take();
        self.head = slot.next;
        slot.next = INVALID_IDX;
        slot.generation = slot.generation.wrapping_add(1);
        if self.head == INVALID_IDX {
            self.tail = INVALID_IDX;
        }
        self.free.push(idx);
        self.len -= 1;
        value
    }

    /// Unlinks and returns the value addressed by `id`.
    ///
    /// A stale handle (already dequeued/removed, or recycled into a newer
    /// value) is a no-op returning `None`. If the queue-owned step cursor is
    /// standing on the removed node, it is retargeted to the predecessor so
    /// the next [`step`](Self::step) continues with the removed node's
    /// successor.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        if !self.contains(id) {
            return None;
        }
        let idx = id.idx;

        // Find the predecessor. Every live slot is reachable from head.
        let mut prev = INVALID_IDX;
        let mut cur = self.head;
        while cur != idx {
            debug_assert!(cur != INVALID_IDX, "live slot unreachable from head");
            prev = cur;
            cur = self.slots[cur as usize].next;
        }

        let next = self.slots[idx as usize].next;
        if prev == INVALID_IDX {
            self.head = next;
        } else {
            self.slots[prev as usize].next = next;
        }
        if self.tail == idx {
            self.tail = prev;
        }
        if self.cursor == idx {
            self.cursor = prev;
        }

        let slot = &mut self.slots[idx as usize];
        let value = slot.value.take();
        slot.next = INVALID_IDX;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(idx);
        self.len -= 1;
        value
    }

    /// Returns whether `id` still addresses a queued value.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.slots.get(id.idx as usize).is_some_and(|slot| {
            slot.generation == id.generation && slot.value.is_some()
        })
    }

    /// Returns the value addressed by `id`, if it is still queued.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        let slot = self.slots.get(id.idx as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.value.as_ref()
    }

    /// Mutable variant of [`get`](Self::get).
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        let slot = self.slots.get_mut(id.idx as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.value.as_mut()
    }

    /// Advances the queue-owned cursor and returns the node it lands on.
    ///
    /// The first call after construction (or after a completed pass) returns
    /// the head; each subsequent call returns the next node. Stepping past
    /// the tail rewinds the cursor to "before head" and returns `None` — the
    /// end signal that also makes the scan restartable.
    pub fn step(&mut self) -> Option<NodeId> {
        self.cursor = if self.cursor == INVALID_IDX {
            self.head
        } else {
            self.slots[self.cursor as usize].next
        };
        if self.cursor == INVALID_IDX {
            None
        } else {
            Some(NodeId {
                idx: self.cursor,
                generation: self.slots[self.cursor as usize].generation,
            })
        }
    }

    /// Rewinds the step cursor to "before head", abandoning any scan in
    /// flight.
    pub fn rewind(&mut self) {
        self.cursor = INVALID_IDX;
    }

    /// Calls `f` on each value head→tail, stopping the first time `f`
    /// returns `false`.
    pub fn for_each_while(&self, mut f: impl FnMut(&T) -> bool) {
        let mut cur = self.head;
        while cur != INVALID_IDX {
            let slot = &self.slots[cur as usize];
            let Some(value) = slot.value.as_ref() else {
                break;
            };
            if !f(value) {
                break;
            }
            cur = slot.next;
        }
    }

    /// Mutable variant of [`for_each_while`](Self::for_each_while); used
    /// where the scan updates values in place (e.g. selection toggling).
    pub fn for_each_while_mut(&mut self, mut f: impl FnMut(&mut T) -> bool) {
        let mut cur = self.head;
        while cur != INVALID_IDX {
            let next = self.slots[cur as usize].next;
            let Some(value) = self.slots[cur as usize].value.as_mut() else {
                break;
            };
            if !f(value) {
                break;
            }
            cur = next;
        }
    }

    /// Returns an iterator over the values in head→tail order.
    ///
    /// The iterator owns its position, independent of the step cursor.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            queue: self,
            current: self.head,
        }
    }

    /// Returns a snapshot of the values in head→tail order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Dequeues until empty.
    pub fn clear(&mut self) {
        while self.dequeue().is_some() {}
    }
}

impl<'a, T> IntoIterator for &'a LinkedQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the values of a [`LinkedQueue`] in head→tail order.
///
/// Created by [`LinkedQueue::iter`].
pub struct Iter<'a, T> {
    queue: &'a LinkedQueue<T>,
    current: u32,
}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.current == INVALID_IDX {
            return None;
        }
        let slot = &self.queue.slots[self.current as usize];
        self.current = slot.next;
        slot.value.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    /// Walks head→tail and checks the structural invariants: `len` equals
    /// the reachable node count, the last reachable node is the tail, and an
    /// empty queue has sentinel head/tail.
    fn assert_invariants<T>(q: &LinkedQueue<T>) {
        let mut reachable = 0;
        let mut last = INVALID_IDX;
        let mut cur = q.head;
        while cur != INVALID_IDX {
            assert!(
                q.slots[cur as usize].value.is_some(),
                "reachable slot must hold a value"
            );
            reachable += 1;
            assert!(reachable <= q.slots.len(), "cycle in next links");
            last = cur;
            cur = q.slots[cur as usize].next;
        }
        assert_eq!(reachable, q.len, "len must match reachable node count");
        assert_eq!(last, q.tail, "tail must be the last reachable node");
        if q.len == 0 {
            assert_eq!(q.head, INVALID_IDX, "empty queue has no head");
            assert_eq!(q.tail, INVALID_IDX, "empty queue has no tail");
        } else {
            assert_eq!(
                q.slots[q.tail as usize].next,
                INVALID_IDX,
                "tail.next must be the sentinel"
            );
        }
    }

    #[test]
    fn fifo_order() {
        let mut q = LinkedQueue::new();
        for i in 0..10 {
            q.enqueue(i);
        }
        for i in 0..10 {
            assert_eq!(q.dequeue(), Some(i));
        }
        assert_eq!(q.dequeue(), None);
        assert_invariants(&q);
    }

    #[test]
    fn dequeue_empty_is_benign() {
        let mut q = LinkedQueue::<u32>::new();
        assert_eq!(q.dequeue(), None);
        assert_eq!(q.dequeue(), None);
        assert_invariants(&q);
    }

    #[test]
    fn invariants_hold_under_mixed_ops() {
        let mut q = LinkedQueue::new();
        let a = q.enqueue('a');
        let b = q.enqueue('b');
        assert_invariants(&q);

        assert_eq!(q.dequeue(), Some('a'));
        assert_invariants(&q);

        let c = q.enqueue('c');
        let d = q.enqueue('d');
        assert_invariants(&q);

        assert_eq!(q.remove(c), Some('c'));
        assert_invariants(&q);
        assert_eq!(q.remove(a), None); // dequeued long ago
        assert_invariants(&q);

        assert_eq!(q.to_vec(), vec!['b', 'd']);
        assert_eq!(q.remove(b), Some('b'));
        assert_eq!(q.remove(d), Some('d'));
        assert_invariants(&q);
        assert!(q.is_empty());
    }

    #[test]
    fn remove_not_present_is_noop() {
        let mut q = LinkedQueue::new();
        q.enqueue(1);
        let id = q.enqueue(2);
        q.enqueue(3);

        assert_eq!(q.remove(id), Some(2));
        assert_eq!(q.remove(id), None, "second removal must be a no-op");
        assert_eq!(q.len(), 2);
        assert_eq!(q.to_vec(), vec![1, 3]);
        assert_invariants(&q);
    }

    #[test]
    fn remove_head_and_tail_relink() {
        let mut q = LinkedQueue::new();
        let a = q.enqueue('a');
        let _b = q.enqueue('b');
        let c = q.enqueue('c');

        assert_eq!(q.remove(a), Some('a'));
        assert_invariants(&q);
        assert_eq!(q.remove(c), Some('c'));
        assert_invariants(&q);
        assert_eq!(q.to_vec(), vec!['b']);

        // Tail was repaired, so appending continues the chain.
        q.enqueue('d');
        assert_eq!(q.to_vec(), vec!['b', 'd']);
        assert_invariants(&q);
    }

    #[test]
    fn generation_prevents_stale_handle_reuse() {
        let mut q = LinkedQueue::new();
        let old = q.enqueue(1);
        assert_eq!(q.dequeue(), Some(1));

        // The freed slot is recycled for the next value.
        let new = q.enqueue(2);
        assert_eq!(old.index(), new.index());
        assert!(!q.contains(old));
        assert_eq!(q.get(old), None);
        assert_eq!(q.remove(old), None);
        assert_eq!(q.get(new), Some(&2));
        assert_invariants(&q);
    }

    #[test]
    fn step_scans_and_restarts() {
        let mut q = LinkedQueue::new();
        for i in 0..3 {
            q.enqueue(i);
        }

        let mut seen = vec![];
        while let Some(id) = q.step() {
            seen.push(*q.get(id).unwrap());
        }
        assert_eq!(seen, vec![0, 1, 2]);

        // The pass rewound the cursor; a second pass sees everything again.
        let mut again = vec![];
        while let Some(id) = q.step() {
            again.push(*q.get(id).unwrap());
        }
        assert_eq!(again, vec![0, 1, 2]);
    }

    #[test]
    fn step_survives_removal_of_current_node() {
        let mut q = LinkedQueue::new();
        for i in 0..4 {
            q.enqueue(i);
        }

        // Remove every node while standing on it; the scan must still visit
        // every value exactly once.
        let mut seen = vec![];
        while let Some(id) = q.step() {
            seen.push(*q.get(id).unwrap());
            q.remove(id);
        }
        assert_eq!(seen, vec![0, 1, 2, 3]);
        assert!(q.is_empty());
        assert_invariants(&q);
    }

    #[test]
    fn step_unaffected_by_removal_of_passed_node() {
        let mut q = LinkedQueue::new();
        let a = q.enqueue('a');
        q.enqueue('b');
        q.enqueue('c');

        let first = q.step().unwrap();
        assert_eq!(q.get(first), Some(&'a'));
        let second = q.step().unwrap();
        assert_eq!(q.get(second), Some(&'b'));

        // Unlink a node the cursor already passed.
        assert_eq!(q.remove(a), Some('a'));

        let third = q.step().unwrap();
        assert_eq!(q.get(third), Some(&'c'));
        assert_eq!(q.step(), None);
        assert_invariants(&q);
    }

    #[test]
    fn rewind_abandons_scan() {
        let mut q = LinkedQueue::new();
        q.enqueue(1);
        q.enqueue(2);

        let _ = q.step();
        q.rewind();
        let id = q.step().unwrap();
        assert_eq!(q.get(id), Some(&1), "rewound scan starts at head again");
    }

    #[test]
    fn for_each_while_short_circuits() {
        let mut q = LinkedQueue::new();
        for i in 0..5 {
            q.enqueue(i);
        }

        let mut visited = 0;
        q.for_each_while(|&v| {
            visited += 1;
            v < 2
        });
        assert_eq!(visited, 3, "scan stops at the first false");
    }

    #[test]
    fn for_each_while_mut_updates_in_place() {
        let mut q = LinkedQueue::new();
        for i in 0..3 {
            q.enqueue(i);
        }

        q.for_each_while_mut(|v| {
            *v *= 10;
            true
        });
        assert_eq!(q.to_vec(), vec![0, 10, 20]);
    }

    #[test]
    fn to_vec_is_a_snapshot() {
        let mut q = LinkedQueue::new();
        q.enqueue(1);
        q.enqueue(2);

        let snapshot = q.to_vec();
        q.enqueue(3);
        assert_eq!(snapshot, vec![1, 2]);
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn clear_drains_everything() {
        let mut q = LinkedQueue::new();
        for i in 0..8 {
            q.enqueue(i);
        }
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.dequeue(), None);
        assert_invariants(&q);

        // The queue remains usable after a drain.
        q.enqueue(42);
        assert_eq!(q.to_vec(), vec![42]);
        assert_invariants(&q);
    }
}
