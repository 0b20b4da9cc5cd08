//! Gain managers: one bounded priority queue per target partition driven by
//! a gain calculator.

mod bi;
mod kway;

pub use bi::BiGainMgr;
pub use kway::KWayGainMgr;

use fmpart_core::{ModuleId, MAX_GAIN_BOUND};

use crate::bpqueue::BoundedPriorityQueue;
use crate::dllink::LinkArena;
use crate::moves::MoveInfoV;

/// Move selection and incremental gain maintenance for one hierarchy level.
///
/// Selecting from an empty queue is a precondition violation and panics;
/// callers check [`GainManager::is_empty`] or [`GainManager::is_empty_togo`]
/// first.
pub trait GainManager {
    /// Recomputes every gain, refills the queues and returns the cut cost.
    fn init(&mut self, part: &[u8]) -> i64;

    /// Returns whether every queue is empty.
    fn is_empty(&self) -> bool;

    /// Returns whether the queue for partition `to` is empty.
    fn is_empty_togo(&self, to: u8) -> bool;

    /// Pops the globally best move; ties go to the lowest partition index.
    fn select(&mut self, part: &[u8]) -> (MoveInfoV, i32);

    /// Pops the best module to move into partition `to`.
    fn select_togo(&mut self, to: u8) -> (ModuleId, i32);

    /// Propagates the gain deltas of `mv` to the neighbours of the moved
    /// module. `part` must still hold the pre-move assignment.
    fn update_move(&mut self, part: &[u8], mv: &MoveInfoV);

    /// Fixes the moved module's own keys after `mv` realized `gain`.
    fn update_move_v(&mut self, mv: &MoveInfoV, gain: i32);

    /// Locks the link of `v` that targets partition `which`.
    fn lock(&mut self, which: u8, v: ModuleId);

    /// Locks every link of `v`, which currently sits in partition `from`.
    fn lock_all(&mut self, from: u8, v: ModuleId);
}

/// Queues and waiting list shared by the bipartition and K-way managers.
#[derive(Debug, Clone)]
pub(crate) struct GainBuckets {
    queues: Vec<BoundedPriorityQueue>,
    waiting: usize,
}

impl GainBuckets {
    pub(crate) fn new(num_queues: u8, bound: i32, arena: &mut LinkArena) -> Self {
        assert!(
            bound <= MAX_GAIN_BOUND,
            "gain bound {bound} exceeds the queue limit {MAX_GAIN_BOUND}"
        );
        let queues = (0..num_queues)
            .map(|_| BoundedPriorityQueue::new(-bound, bound, arena))
            .collect();
        let waiting = arena.alloc_head();
        Self { queues, waiting }
    }

    pub(crate) fn queue(&mut self, k: u8) -> &mut BoundedPriorityQueue {
        &mut self.queues[usize::from(k)]
    }

    pub(crate) fn clear(&mut self, arena: &mut LinkArena) {
        for queue in &mut self.queues {
            queue.clear(arena);
        }
        arena.clear(self.waiting);
    }

    pub(crate) fn park(&self, arena: &mut LinkArena, link: usize) {
        arena.push_back(self.waiting, link);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.queues.iter().all(BoundedPriorityQueue::is_empty)
    }

    pub(crate) fn is_empty_togo(&self, to: u8) -> bool {
        self.queues[usize::from(to)].is_empty()
    }

    /// Pops the front link of the best queue and parks it on the waiting list.
    pub(crate) fn select(&mut self, arena: &mut LinkArena) -> (u8, usize, i32) {
        let mut best: Option<(usize, i32)> = None;
        for (k, queue) in self.queues.iter().enumerate() {
            if queue.is_empty() {
                continue;
            }
            let key = queue.get_max();
            if best.map_or(true, |(_, best_key)| key > best_key) {
                best = Some((k, key));
            }
        }
        let (k, gain) = best.unwrap_or_else(|| panic!("select on empty gain queues"));
        let link = self.queues[k].popleft(arena);
        self.park(arena, link);
        (k as u8, link, gain)
    }

    /// Pops the front link of queue `to` and parks it on the waiting list.
    pub(crate) fn select_togo(&mut self, arena: &mut LinkArena, to: u8) -> (usize, i32) {
        let queue = &mut self.queues[usize::from(to)];
        let gain = queue.get_max();
        let link = queue.popleft(arena);
        self.park(arena, link);
        (link, gain)
    }
}
