//! Bounded priority queue over a fixed integer key range.

use crate::dllink::LinkArena;

/// Max-priority queue of arena items whose keys lie in `[a, b]`.
///
/// Each key owns a bucket (an intrusive list in the shared [`LinkArena`]).
/// Bucket `0` permanently holds a sentinel so the downward scan for the next
/// occupied bucket always terminates; the queue is empty exactly when the
/// recorded maximum bucket is `0`. Keys are kept on the arena nodes as the
/// actual gain values.
#[derive(Debug, Clone)]
pub struct BoundedPriorityQueue {
    offset: i32,
    high: usize,
    buckets: Vec<usize>,
    max: usize,
}

impl BoundedPriorityQueue {
    /// Creates an empty queue for keys in `[a, b]`, allocating its bucket
    /// heads in `arena`.
    ///
    /// # Panics
    ///
    /// Panics when `a > b`.
    pub fn new(a: i32, b: i32, arena: &mut LinkArena) -> Self {
        assert!(a <= b, "bounded priority queue range is empty: [{a}, {b}]");
        let offset = a - 1;
        let high = (b - offset) as usize;
        let buckets: Vec<usize> = (0..=high).map(|_| arena.alloc_head()).collect();
        let sentinel = arena.alloc_head();
        arena.push_back(buckets[0], sentinel);
        Self {
            offset,
            high,
            buckets,
            max: 0,
        }
    }

    /// Returns the smallest admissible key.
    pub fn low_key(&self) -> i32 {
        self.offset + 1
    }

    /// Returns the largest admissible key.
    pub fn high_key(&self) -> i32 {
        self.high as i32 + self.offset
    }

    /// Returns whether no item is queued.
    pub fn is_empty(&self) -> bool {
        self.max == 0
    }

    /// Returns the largest key currently queued (`a - 1` when empty).
    pub fn get_max(&self) -> i32 {
        self.max as i32 + self.offset
    }

    fn bucket_of(&self, key: i32) -> usize {
        let index = key - self.offset;
        assert!(
            index >= 1 && index as usize <= self.high,
            "gain key {key} escapes queue range [{}, {}]",
            self.low_key(),
            self.high_key()
        );
        index as usize
    }

    /// Appends `item` with `key` at the back of its bucket.
    pub fn append(&mut self, arena: &mut LinkArena, item: usize, key: i32) {
        arena.set_key(item, key);
        self.append_direct(arena, item);
    }

    /// Appends `item` at the back of the bucket for the key it already holds.
    pub fn append_direct(&mut self, arena: &mut LinkArena, item: usize) {
        let bucket = self.bucket_of(arena.key(item));
        arena.push_back(self.buckets[bucket], item);
        self.max = self.max.max(bucket);
    }

    /// Inserts `item` with `key` at the front of its bucket.
    pub fn appendleft(&mut self, arena: &mut LinkArena, item: usize, key: i32) {
        arena.set_key(item, key);
        let bucket = self.bucket_of(key);
        arena.push_front(self.buckets[bucket], item);
        self.max = self.max.max(bucket);
    }

    /// Removes and returns the front item of the highest occupied bucket.
    ///
    /// # Panics
    ///
    /// Panics when the queue is empty.
    pub fn popleft(&mut self, arena: &mut LinkArena) -> usize {
        assert!(!self.is_empty(), "popleft on an empty bounded priority queue");
        let item = arena
            .pop_front(self.buckets[self.max])
            .unwrap_or_else(|| unreachable!("recorded max bucket is occupied"));
        self.normalize(arena);
        item
    }

    fn normalize(&mut self, arena: &LinkArena) {
        while arena.is_empty(self.buckets[self.max]) {
            self.max -= 1;
        }
    }

    /// Lowers the key of `item` by `-delta` and queues it at the back (FIFO).
    pub fn decrease_key(&mut self, arena: &mut LinkArena, item: usize, delta: i32) {
        arena.detach(item);
        arena.add_key(item, delta);
        let bucket = self.bucket_of(arena.key(item));
        arena.push_back(self.buckets[bucket], item);
        if self.max < bucket {
            self.max = bucket;
            return;
        }
        self.normalize(arena);
    }

    /// Raises the key of `item` by `delta` and queues it at the front (LIFO).
    pub fn increase_key(&mut self, arena: &mut LinkArena, item: usize, delta: i32) {
        arena.detach(item);
        arena.add_key(item, delta);
        let bucket = self.bucket_of(arena.key(item));
        arena.push_front(self.buckets[bucket], item);
        self.max = self.max.max(bucket);
    }

    /// Shifts the key of `item` by `delta`; locked items are left untouched.
    pub fn modify_key(&mut self, arena: &mut LinkArena, item: usize, delta: i32) {
        if arena.is_locked(item) {
            return;
        }
        if delta > 0 {
            self.increase_key(arena, item, delta);
        } else if delta < 0 {
            self.decrease_key(arena, item, delta);
        }
    }

    /// Removes `item` from the queue.
    pub fn detach(&mut self, arena: &mut LinkArena, item: usize) {
        arena.detach(item);
        self.normalize(arena);
    }

    /// Removes `item` from the queue and locks it.
    pub fn lock(&mut self, arena: &mut LinkArena, item: usize) {
        arena.lock(item);
        self.normalize(arena);
    }

    /// Detaches every queued item.
    pub fn clear(&mut self, arena: &mut LinkArena) {
        for bucket in &self.buckets[1..] {
            arena.clear(*bucket);
        }
        self.max = 0;
    }

    /// Iterates over queued items from the highest key to the lowest, in
    /// bucket order.
    pub fn iter<'a>(&'a self, arena: &'a LinkArena) -> impl Iterator<Item = usize> + 'a {
        self.buckets[1..=self.max]
            .iter()
            .rev()
            .flat_map(move |bucket| arena.iter(*bucket))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_key_order_with_fifo_ties() {
        let mut arena = LinkArena::new(5);
        let mut queue = BoundedPriorityQueue::new(-3, 3, &mut arena);
        assert!(queue.is_empty());
        queue.append(&mut arena, 0, 1);
        queue.append(&mut arena, 1, 3);
        queue.append(&mut arena, 2, -3);
        queue.append(&mut arena, 3, 3);
        queue.appendleft(&mut arena, 4, 1);
        assert_eq!(queue.get_max(), 3);
        assert_eq!(queue.iter(&arena).collect::<Vec<_>>(), vec![1, 3, 4, 0, 2]);

        let order: Vec<usize> = (0..5).map(|_| queue.popleft(&mut arena)).collect();
        assert_eq!(order, vec![1, 3, 4, 0, 2]);
        assert!(queue.is_empty());
    }

    #[test]
    fn modify_key_places_by_direction_and_skips_locked() {
        let mut arena = LinkArena::new(4);
        let mut queue = BoundedPriorityQueue::new(-4, 4, &mut arena);
        for item in 0..4 {
            queue.append(&mut arena, item, 0);
        }
        queue.modify_key(&mut arena, 3, 2);
        queue.modify_key(&mut arena, 0, 2);
        assert_eq!(queue.popleft(&mut arena), 0);

        queue.modify_key(&mut arena, 1, -1);
        queue.modify_key(&mut arena, 2, -1);
        queue.lock(&mut arena, 3);
        queue.modify_key(&mut arena, 3, 4);
        assert_eq!(arena.key(3), 2);
        assert_eq!(queue.get_max(), -1);
        assert_eq!(queue.popleft(&mut arena), 1);
        assert_eq!(queue.popleft(&mut arena), 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn detach_renormalizes_max() {
        let mut arena = LinkArena::new(2);
        let mut queue = BoundedPriorityQueue::new(0, 5, &mut arena);
        queue.append(&mut arena, 0, 5);
        queue.append(&mut arena, 1, 2);
        queue.detach(&mut arena, 0);
        assert_eq!(queue.get_max(), 2);
        queue.clear(&mut arena);
        assert!(queue.is_empty());
        assert_eq!(queue.low_key(), 0);
        assert_eq!(queue.high_key(), 5);
    }

    #[test]
    #[should_panic(expected = "range is empty")]
    fn rejects_inverted_range() {
        let mut arena = LinkArena::new(0);
        let _ = BoundedPriorityQueue::new(2, 1, &mut arena);
    }

    #[test]
    #[should_panic(expected = "escapes queue range")]
    fn rejects_out_of_range_key() {
        let mut arena = LinkArena::new(1);
        let mut queue = BoundedPriorityQueue::new(-1, 1, &mut arena);
        queue.append(&mut arena, 0, 2);
    }

    #[test]
    #[should_panic(expected = "empty bounded priority queue")]
    fn popleft_on_empty_panics() {
        let mut arena = LinkArena::new(1);
        let mut queue = BoundedPriorityQueue::new(-1, 1, &mut arena);
        queue.popleft(&mut arena);
    }
}
