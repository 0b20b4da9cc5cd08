//! Balance constraint managers.

use fmpart_core::Netlist;

use crate::moves::{LegalCheck, MoveInfoV};

/// Tracks per-partition weight against the balance lower bound.
pub trait ConstraintManager {
    /// Recomputes the per-partition weights from `part`.
    fn init(&mut self, part: &[u8]);

    /// Classifies a legalization move.
    fn check_legal(&mut self, mv: &MoveInfoV) -> LegalCheck;

    /// Returns whether an optimization move keeps its source partition at or
    /// above the lower bound.
    fn check_constraints(&mut self, mv: &MoveInfoV) -> bool;

    /// Returns the partition legalization should fill next.
    fn select_togo(&self) -> u8;

    /// Commits the weight transfer of the move last checked.
    fn update_move(&mut self, mv: &MoveInfoV);

    /// Returns the current per-partition weights.
    fn diff(&self) -> &[u64];

    /// Returns the minimum weight every partition must reach.
    fn lowerbound(&self) -> u64;
}

/// State shared by the bipartition and K-way constraint managers.
#[derive(Debug, Clone)]
struct ConstrBase<'a, N> {
    netlist: &'a N,
    diff: Vec<u64>,
    lowerbound: u64,
    weight: u64,
}

impl<'a, N: Netlist> ConstrBase<'a, N> {
    fn new(netlist: &'a N, balance_tol: f64, num_parts: u8) -> Self {
        let total = netlist.total_weight() as f64;
        let per_part = total * (2.0 / f64::from(num_parts));
        Self {
            netlist,
            diff: vec![0; usize::from(num_parts)],
            lowerbound: (per_part * balance_tol).round() as u64,
            weight: 0,
        }
    }

    fn init(&mut self, part: &[u8]) {
        self.diff.iter_mut().for_each(|d| *d = 0);
        for v in self.netlist.modules() {
            self.diff[usize::from(part[v.index()])] += u64::from(self.netlist.module_weight(v));
        }
    }

    fn check_legal(&mut self, mv: &MoveInfoV) -> LegalCheck {
        self.weight = u64::from(self.netlist.module_weight(mv.v));
        if self.diff[usize::from(mv.from)] < self.lowerbound + self.weight {
            return LegalCheck::NotSatisfied;
        }
        if self.diff[usize::from(mv.to)] + self.weight < self.lowerbound {
            return LegalCheck::GetBetter;
        }
        LegalCheck::AllSatisfied
    }

    fn check_constraints(&mut self, mv: &MoveInfoV) -> bool {
        self.weight = u64::from(self.netlist.module_weight(mv.v));
        self.diff[usize::from(mv.from)] >= self.lowerbound + self.weight
    }

    fn update_move(&mut self, mv: &MoveInfoV) {
        self.diff[usize::from(mv.to)] += self.weight;
        self.diff[usize::from(mv.from)] -= self.weight;
    }
}

/// Balance constraints for bipartitioning.
///
/// Every partition must keep at least
/// `round(total_weight * (2 / K) * balance_tol)` weight.
#[derive(Debug, Clone)]
pub struct BiConstrMgr<'a, N> {
    base: ConstrBase<'a, N>,
}

impl<'a, N: Netlist> BiConstrMgr<'a, N> {
    /// Creates the manager for two partitions.
    pub fn new(netlist: &'a N, balance_tol: f64) -> Self {
        Self {
            base: ConstrBase::new(netlist, balance_tol, 2),
        }
    }
}

impl<'a, N: Netlist> ConstraintManager for BiConstrMgr<'a, N> {
    fn init(&mut self, part: &[u8]) {
        self.base.init(part);
    }

    fn check_legal(&mut self, mv: &MoveInfoV) -> LegalCheck {
        self.base.check_legal(mv)
    }

    fn check_constraints(&mut self, mv: &MoveInfoV) -> bool {
        self.base.check_constraints(mv)
    }

    fn select_togo(&self) -> u8 {
        if self.base.diff[0] < self.base.diff[1] {
            0
        } else {
            1
        }
    }

    fn update_move(&mut self, mv: &MoveInfoV) {
        self.base.update_move(mv);
    }

    fn diff(&self) -> &[u64] {
        &self.base.diff
    }

    fn lowerbound(&self) -> u64 {
        self.base.lowerbound
    }
}

/// K-way variant that also remembers which partitions started underweight.
///
/// A partition's flag clears once it is the source or target of a move that
/// satisfies the bound; legalization only reports success when no flag is
/// left.
#[derive(Debug, Clone)]
pub struct KWayConstrMgr<'a, N> {
    base: ConstrBase<'a, N>,
    illegal: Vec<bool>,
}

impl<'a, N: Netlist> KWayConstrMgr<'a, N> {
    /// Creates the manager for `num_parts` partitions.
    pub fn new(netlist: &'a N, balance_tol: f64, num_parts: u8) -> Self {
        Self {
            base: ConstrBase::new(netlist, balance_tol, num_parts),
            illegal: vec![true; usize::from(num_parts)],
        }
    }
}

impl<'a, N: Netlist> ConstraintManager for KWayConstrMgr<'a, N> {
    fn init(&mut self, part: &[u8]) {
        self.base.init(part);
        let lowerbound = self.base.lowerbound;
        for (flag, weight) in self.illegal.iter_mut().zip(&self.base.diff) {
            *flag = *weight < lowerbound;
        }
    }

    fn check_legal(&mut self, mv: &MoveInfoV) -> LegalCheck {
        let status = self.base.check_legal(mv);
        if status != LegalCheck::AllSatisfied {
            return status;
        }
        self.illegal[usize::from(mv.from)] = false;
        self.illegal[usize::from(mv.to)] = false;
        if self.illegal.iter().any(|flag| *flag) {
            return LegalCheck::GetBetter;
        }
        LegalCheck::AllSatisfied
    }

    fn check_constraints(&mut self, mv: &MoveInfoV) -> bool {
        self.base.check_constraints(mv)
    }

    fn select_togo(&self) -> u8 {
        self.base
            .diff
            .iter()
            .enumerate()
            .min_by_key(|(_, weight)| **weight)
            .map_or(0, |(k, _)| k as u8)
    }

    fn update_move(&mut self, mv: &MoveInfoV) {
        self.base.update_move(mv);
    }

    fn diff(&self) -> &[u64] {
        &self.base.diff
    }

    fn lowerbound(&self) -> u64 {
        self.base.lowerbound
    }
}
