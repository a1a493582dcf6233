use std::cmp::Ordering;
use tracing::trace;
use crate::core::config::QueueConfig;
use crate::queue::order::{Ascending, PriorityOrder};

#[derive(Debug, Clone)]
struct Entry<T, P> {
    item: T,
    priority: P,
    /// Enqueue sequence, used for ties when the queue is stable
    seq: u64,
}

/// Binary heap of `(payload, priority)` pairs stored in a `Vec`.
///
/// Children of slot `i` live at `2i + 1` and `2i + 2`. The root is always
/// an entry no other entry is more urgent than, per the queue's
/// [`PriorityOrder`]. Equal priorities come out in unspecified order unless
/// the queue was built with [`PriorityQueue::stable`], which serves them
/// first-in first-out.
///
/// | Operation         | Time     |
/// |-------------------|----------|
/// | enqueue / dequeue | O(log n) |
/// | peek              | O(1)     |
/// | change_priority   | O(n)     |
#[derive(Debug, Clone)]
pub struct PriorityQueue<T, P, O = Ascending> {
    heap: Vec<Entry<T, P>>,
    order: O,
    stable: bool,
    next_seq: u64,
}

impl<T, P: PartialOrd> PriorityQueue<T, P, Ascending> {
    /// Min-heap: lower priority values come out first
    pub fn new() -> Self {
        PriorityQueue::with_order(Ascending)
    }
}

impl<T, P: PartialOrd> Default for PriorityQueue<T, P, Ascending> {
    fn default() -> Self {
        PriorityQueue::new()
    }
}

impl<T, P, O: PriorityOrder<P>> PriorityQueue<T, P, O> {
    pub fn with_order(order: O) -> Self {
        PriorityQueue::with_config(QueueConfig::default(), order)
    }

    pub fn with_capacity(capacity: usize, order: O) -> Self {
        PriorityQueue::with_config(
            QueueConfig {
                initial_capacity: capacity,
                ..QueueConfig::default()
            },
            order,
        )
    }

    /// Ties are served in enqueue order
    pub fn stable(order: O) -> Self {
        PriorityQueue::with_config(
            QueueConfig {
                stable_ties: true,
                ..QueueConfig::default()
            },
            order,
        )
    }

    pub fn with_config(config: QueueConfig, order: O) -> Self {
        PriorityQueue {
            heap: Vec::with_capacity(config.initial_capacity),
            order,
            stable: config.stable_ties,
            next_seq: 0,
        }
    }

    pub fn is_stable(&self) -> bool {
        self.stable
    }

    pub fn enqueue(&mut self, item: T, priority: P) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { item, priority, seq });
        self.sift_up(self.heap.len() - 1);
    }

    /// Removes the most urgent entry
    pub fn dequeue(&mut self) -> Option<T> {
        self.pop_entry().map(|entry| entry.item)
    }

    /// Like `dequeue`, keeping the priority
    pub fn dequeue_with_priority(&mut self) -> Option<(T, P)> {
        self.pop_entry().map(|entry| (entry.item, entry.priority))
    }

    pub fn peek(&self) -> Option<&T> {
        self.heap.first().map(|entry| &entry.item)
    }

    pub fn peek_priority(&self) -> Option<&P> {
        self.heap.first().map(|entry| &entry.priority)
    }

    /// Re-prioritizes the first entry, in array order, whose payload matches.
    ///
    /// Later matches are left alone. Returns false when nothing matches.
    pub fn change_priority<F>(&mut self, predicate: F, new_priority: P) -> bool
    where
        F: Fn(&T) -> bool,
    {
        match self.position(predicate) {
            Some(index) => {
                self.reprioritize(index, new_priority);
                true
            }
            None => false,
        }
    }

    /// Edits the first matching payload; `edit` returns its new priority.
    pub fn change_priority_with<F, E>(&mut self, predicate: F, edit: E) -> bool
    where
        F: Fn(&T) -> bool,
        E: FnOnce(&mut T) -> P,
    {
        match self.position(predicate) {
            Some(index) => {
                let new_priority = edit(&mut self.heap[index].item);
                self.reprioritize(index, new_priority);
                true
            }
            None => false,
        }
    }

    /// Takes out the first entry, in array order, whose payload matches
    pub fn remove_where<F>(&mut self, predicate: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        let index = self.position(predicate)?;
        let removed = self.heap.swap_remove(index);
        if index < self.heap.len() {
            // The moved-in last entry may belong above or below `index`
            let settled = self.sift_up(index);
            if settled == index {
                self.sift_down(index);
            }
        }
        Some(removed.item)
    }

    /// Keeps only the entries whose payload passes `keep`
    pub fn retain<F>(&mut self, keep: F)
    where
        F: Fn(&T) -> bool,
    {
        self.heap.retain(|entry| keep(&entry.item));
        self.heapify();
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Payloads in heap-array order, not sorted
    pub fn get_all(&self) -> Vec<&T> {
        self.heap.iter().map(|entry| &entry.item).collect()
    }

    /// `(payload, priority)` in heap-array order
    pub fn iter(&self) -> impl Iterator<Item = (&T, &P)> {
        self.heap.iter().map(|entry| (&entry.item, &entry.priority))
    }

    /// Dequeues until empty
    pub fn drain_sorted(&mut self) -> DrainSorted<'_, T, P, O> {
        DrainSorted { queue: self }
    }

    pub fn into_sorted_vec(mut self) -> Vec<T> {
        self.drain_sorted().collect()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    fn pop_entry(&mut self) -> Option<Entry<T, P>> {
        if self.heap.is_empty() {
            return None;
        }
        let top = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(top)
    }

    fn position<F>(&self, predicate: F) -> Option<usize>
    where
        F: Fn(&T) -> bool,
    {
        self.heap.iter().position(|entry| predicate(&entry.item))
    }

    fn reprioritize(&mut self, index: usize, new_priority: P) {
        let old = std::mem::replace(&mut self.heap[index].priority, new_priority);
        if self.order.compare(&self.heap[index].priority, &old) == Ordering::Less {
            let settled = self.sift_up(index);
            trace!(from = index, to = settled, "priority raised");
        } else {
            let settled = self.sift_down(index);
            trace!(from = index, to = settled, "priority lowered");
        }
    }

    /// Strictly more urgent, or an earlier tie when stable
    fn precedes(&self, a: usize, b: usize) -> bool {
        let (a, b) = (&self.heap[a], &self.heap[b]);
        match self.order.compare(&a.priority, &b.priority) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => self.stable && a.seq < b.seq,
        }
    }

    /// Returns the slot the entry ended up in
    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.precedes(index, parent) {
                break;
            }
            self.heap.swap(index, parent);
            index = parent;
        }
        index
    }

    /// Returns the slot the entry ended up in
    fn sift_down(&mut self, mut index: usize) -> usize {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut first = index;

            if left < len && self.precedes(left, first) {
                first = left;
            }
            if right < len && self.precedes(right, first) {
                first = right;
            }
            if first == index {
                return index;
            }
            self.heap.swap(index, first);
            index = first;
        }
    }

    /// Floyd's bottom-up heap construction, O(n)
    fn heapify(&mut self) {
        for index in (0..self.heap.len() / 2).rev() {
            self.sift_down(index);
        }
    }

    #[cfg(test)]
    pub(crate) fn satisfies_heap_property(&self) -> bool {
        (1..self.heap.len()).all(|child| !self.precedes(child, (child - 1) / 2))
    }
}

/// Iterator returned by [`PriorityQueue::drain_sorted`]
pub struct DrainSorted<'a, T, P, O: PriorityOrder<P>> {
    queue: &'a mut PriorityQueue<T, P, O>,
}

impl<T, P, O: PriorityOrder<P>> Iterator for DrainSorted<'_, T, P, O> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.queue.dequeue()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), Some(self.queue.len()))
    }
}

impl<T, P, O: PriorityOrder<P>> Extend<(T, P)> for PriorityQueue<T, P, O> {
    fn extend<I: IntoIterator<Item = (T, P)>>(&mut self, iter: I) {
        for (item, priority) in iter {
            let seq = self.next_seq;
            self.next_seq += 1;
            self.heap.push(Entry { item, priority, seq });
        }
        self.heapify();
    }
}

impl<T, P: PartialOrd> FromIterator<(T, P)> for PriorityQueue<T, P, Ascending> {
    fn from_iter<I: IntoIterator<Item = (T, P)>>(iter: I) -> Self {
        let mut queue = PriorityQueue::new();
        queue.extend(iter);
        queue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::order::{Descending, FnOrder};

    #[test]
    fn extraction_is_non_decreasing() {
        let mut queue = PriorityQueue::new();
        for p in [3, 1, 4, 1, 5] {
            queue.enqueue(p, p);
        }
        assert!(queue.satisfies_heap_property());

        let mut out = Vec::new();
        while let Some(p) = queue.dequeue() {
            out.push(p);
        }
        assert_eq!(out, vec![1, 1, 3, 4, 5]);
    }

    #[test]
    fn change_priority_moves_entry_to_front() {
        let mut queue = PriorityQueue::new();
        queue.enqueue("A", 5);
        queue.enqueue("B", 3);
        queue.enqueue("C", 1);

        assert!(queue.change_priority(|item| *item == "B", 0));
        assert!(queue.satisfies_heap_property());
        assert_eq!(queue.dequeue(), Some("B"));
        assert_eq!(queue.dequeue(), Some("C"));
        assert_eq!(queue.dequeue(), Some("A"));
    }

    #[test]
    fn change_priority_can_demote() {
        let mut queue = PriorityQueue::new();
        queue.enqueue("A", 1);
        queue.enqueue("B", 2);
        queue.enqueue("C", 3);

        assert!(queue.change_priority(|item| *item == "A", 9));
        assert!(queue.satisfies_heap_property());
        assert_eq!(queue.into_sorted_vec(), vec!["B", "C", "A"]);
    }

    #[test]
    fn change_priority_without_match() {
        let mut queue = PriorityQueue::new();
        queue.enqueue("A", 1);
        assert!(!queue.change_priority(|item| *item == "Z", 0));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.peek_priority(), Some(&1));
    }

    #[test]
    fn change_priority_touches_first_match_only() {
        let mut queue = PriorityQueue::new();
        queue.enqueue("dup", 2);
        queue.enqueue("dup", 2);
        assert!(queue.change_priority(|item| *item == "dup", 7));
        let mut priorities: Vec<i32> = queue.iter().map(|(_, p)| *p).collect();
        priorities.sort();
        assert_eq!(priorities, vec![2, 7]);
    }

    #[test]
    fn empty_queue_returns_none() {
        let mut queue: PriorityQueue<&str, u8> = PriorityQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.peek(), None);
        assert_eq!(queue.dequeue(), None);
        assert!(queue.get_all().is_empty());
    }

    #[test]
    fn peek_does_not_mutate() {
        let mut queue = PriorityQueue::new();
        queue.enqueue("x", 2);
        queue.enqueue("y", 1);
        let before: Vec<&&str> = queue.get_all();
        let before: Vec<&str> = before.into_iter().copied().collect();
        assert_eq!(queue.peek(), Some(&"y"));
        assert_eq!(queue.peek(), Some(&"y"));
        let after: Vec<&str> = queue.get_all().into_iter().copied().collect();
        assert_eq!(before, after);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn descending_is_a_max_heap() {
        let mut queue = PriorityQueue::with_order(Descending);
        for p in [2, 9, 4] {
            queue.enqueue(p, p);
        }
        assert_eq!(queue.into_sorted_vec(), vec![9, 4, 2]);
    }

    #[test]
    fn custom_comparator() {
        // Critical flag first, then by ascending number
        let order = FnOrder(|a: &(bool, u32), b: &(bool, u32)| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        let mut queue = PriorityQueue::with_order(order);
        queue.enqueue("routine", (false, 1));
        queue.enqueue("critical-late", (true, 9));
        queue.enqueue("critical", (true, 2));
        assert_eq!(queue.into_sorted_vec(), vec!["critical", "critical-late", "routine"]);
    }

    #[test]
    fn stable_queue_serves_ties_in_order() {
        let mut queue = PriorityQueue::stable(Ascending);
        for (i, p) in [2, 1, 2, 1, 2, 1].into_iter().enumerate() {
            queue.enqueue(i, p);
        }
        assert_eq!(queue.into_sorted_vec(), vec![1, 3, 5, 0, 2, 4]);
    }

    #[test]
    fn float_priorities() {
        let mut queue = PriorityQueue::new();
        queue.enqueue("b", 0.5);
        queue.enqueue("a", -1.25);
        queue.enqueue("c", 3.0);
        assert_eq!(queue.into_sorted_vec(), vec!["a", "b", "c"]);
    }

    #[test]
    fn remove_where_keeps_heap_valid() {
        let mut queue: PriorityQueue<u32, u32> = (0..20).map(|i| (i, (i * 7) % 11)).collect();
        assert_eq!(queue.remove_where(|item| *item == 5), Some(5));
        assert_eq!(queue.remove_where(|item| *item == 5), None);
        assert!(queue.satisfies_heap_property());
        assert_eq!(queue.len(), 19);

        let mut last = 0;
        while let Some((_, p)) = queue.dequeue_with_priority() {
            assert!(p >= last);
            last = p;
        }
    }

    #[test]
    fn retain_rebuilds_heap() {
        let mut queue: PriorityQueue<u32, u32> = (0..10).map(|i| (i, 10 - i)).collect();
        queue.retain(|item| item % 2 == 0);
        assert!(queue.satisfies_heap_property());
        assert_eq!(queue.into_sorted_vec(), vec![8, 6, 4, 2, 0]);
    }

    #[test]
    fn extend_and_drain() {
        let mut queue = PriorityQueue::new();
        queue.enqueue("seed", 3);
        queue.extend(vec![("x", 5), ("y", 1)]);
        assert!(queue.satisfies_heap_property());
        let drained: Vec<&str> = queue.drain_sorted().collect();
        assert_eq!(drained, vec!["y", "seed", "x"]);
        assert!(queue.is_empty());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Enqueue(u8),
            Dequeue,
            Change(usize, u8),
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                3 => any::<u8>().prop_map(Op::Enqueue),
                2 => Just(Op::Dequeue),
                2 => (0usize..64, any::<u8>()).prop_map(|(target, p)| Op::Change(target, p)),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(256))]

            /// Heap property holds after every operation and dequeue
            /// always yields a minimum of what is queued
            #[test]
            fn prop_heap_matches_model(
                ops in proptest::collection::vec(op_strategy(), 0..120),
                stable in any::<bool>(),
            ) {
                let mut queue: PriorityQueue<usize, u8> = if stable {
                    PriorityQueue::stable(Ascending)
                } else {
                    PriorityQueue::new()
                };
                let mut model: Vec<(usize, u8)> = Vec::new();
                let mut next_id = 0usize;

                for op in ops {
                    match op {
                        Op::Enqueue(p) => {
                            queue.enqueue(next_id, p);
                            model.push((next_id, p));
                            next_id += 1;
                        }
                        Op::Dequeue => {
                            let expected_min = model.iter().map(|(_, p)| *p).min();
                            let got = queue.dequeue_with_priority();
                            prop_assert_eq!(got.as_ref().map(|(_, p)| *p), expected_min);
                            if let Some((id, _)) = got {
                                let index = model.iter().position(|(m, _)| *m == id).unwrap();
                                model.remove(index);
                            }
                        }
                        Op::Change(target, p) => {
                            let changed = queue.change_priority(|id| *id == target, p);
                            let position = model.iter().position(|(m, _)| *m == target);
                            prop_assert_eq!(changed, position.is_some());
                            if let Some(index) = position {
                                model[index].1 = p;
                            }
                        }
                    }
                    prop_assert!(queue.satisfies_heap_property());
                    prop_assert_eq!(queue.len(), model.len());
                }

                let mut drained = Vec::new();
                while let Some((_, p)) = queue.dequeue_with_priority() {
                    drained.push(p);
                }
                let mut expected: Vec<u8> = model.iter().map(|(_, p)| *p).collect();
                expected.sort();
                prop_assert_eq!(drained, expected);
            }

            /// A stable queue serves equal priorities first-in first-out
            #[test]
            fn prop_stable_ties_are_fifo(priorities in proptest::collection::vec(0u8..4, 0..60)) {
                let mut queue = PriorityQueue::stable(Ascending);
                for (id, p) in priorities.iter().enumerate() {
                    queue.enqueue(id, *p);
                }
                let mut expected: Vec<usize> = (0..priorities.len()).collect();
                expected.sort_by_key(|id| priorities[*id]);
                prop_assert_eq!(queue.into_sorted_vec(), expected);
            }
        }
    }
}
