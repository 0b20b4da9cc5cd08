//! Legalization and FM refinement over one hierarchy level.

use fmpart_core::Netlist;
use tracing::{debug, trace};

use crate::constr_mgr::ConstraintManager;
use crate::gain_mgr::GainManager;
use crate::moves::{LegalCheck, MoveInfoV};
use crate::snapshot::SnapshotStrategy;

/// Drives a gain manager and a constraint manager over a caller-owned
/// assignment.
///
/// The same algorithm serves bipartitioning and K-way partitioning; the
/// variant is chosen by the managers passed to [`PartMgr::new`].
#[derive(Debug)]
pub struct PartMgr<'a, N, G, C, S> {
    netlist: &'a N,
    gain_mgr: G,
    validator: C,
    snapshot: S,
    totalcost: i64,
}

impl<'a, N, G, C, S> PartMgr<'a, N, G, C, S>
where
    N: Netlist,
    G: GainManager,
    C: ConstraintManager,
    S: SnapshotStrategy,
{
    /// Assembles a partition manager from its collaborators.
    pub fn new(netlist: &'a N, gain_mgr: G, validator: C, snapshot: S) -> Self {
        Self {
            netlist,
            gain_mgr,
            validator,
            snapshot,
            totalcost: 0,
        }
    }

    /// Returns the cost of the assignment as last initialized or updated.
    pub fn totalcost(&self) -> i64 {
        self.totalcost
    }

    /// Returns the constraint manager.
    pub fn validator(&self) -> &C {
        &self.validator
    }

    /// Recomputes gains, cost and partition weights from `part`.
    pub fn init(&mut self, part: &[u8]) {
        self.totalcost = self.gain_mgr.init(part);
        self.validator.init(part);
    }

    /// Moves modules into the lightest partition until every partition meets
    /// the balance lower bound or no candidate remains.
    ///
    /// Returns the status of the last accepted or rejected move
    /// ([`LegalCheck::NotSatisfied`] when nothing was tried).
    pub fn legalize(&mut self, part: &mut [u8]) -> LegalCheck {
        self.init(part);

        let netlist = self.netlist;
        for v in netlist.modules() {
            if netlist.module_weight(v) != 0 || netlist.is_fixed(v) {
                continue;
            }
            self.gain_mgr.lock_all(part[v.index()], v);
        }

        let mut legalcheck = LegalCheck::NotSatisfied;
        while legalcheck != LegalCheck::AllSatisfied {
            let to = self.validator.select_togo();
            if self.gain_mgr.is_empty_togo(to) {
                break;
            }
            let (v, gain) = self.gain_mgr.select_togo(to);
            let mv = MoveInfoV {
                v,
                from: part[v.index()],
                to,
            };
            legalcheck = self.validator.check_legal(&mv);
            if legalcheck == LegalCheck::NotSatisfied {
                continue;
            }
            self.apply(part, &mv, gain);
            self.totalcost -= i64::from(gain);
            assert!(
                self.totalcost >= 0,
                "total cost went negative during legalization"
            );
            trace!(module = v.as_raw(), to, gain, totalcost = self.totalcost, "legalize move");
        }
        debug!(status = ?legalcheck, totalcost = self.totalcost, "legalize finished");
        legalcheck
    }

    /// Runs FM passes until one leaves the cost unchanged.
    pub fn optimize(&mut self, part: &mut [u8]) {
        loop {
            self.init(part);
            let before = self.totalcost;
            self.optimize_1pass(part);
            assert!(
                self.totalcost <= before,
                "optimization pass increased the total cost"
            );
            debug!(before, totalcost = self.totalcost, "optimize pass");
            if self.totalcost == before {
                break;
            }
        }
    }

    fn optimize_1pass(&mut self, part: &mut [u8]) {
        let mut snapshot: Option<S::Snapshot> = None;
        let mut totalgain: i64 = 0;
        let mut besttotalgain: i64 = 0;
        let mut deferred = false;

        while !self.gain_mgr.is_empty() {
            let (mv, gain) = self.gain_mgr.select(part);
            if !self.validator.check_constraints(&mv) {
                continue;
            }
            let gain64 = i64::from(gain);
            if gain < 0 {
                if !deferred || totalgain > besttotalgain {
                    snapshot = Some(self.snapshot.capture(part));
                    besttotalgain = totalgain;
                }
                deferred = true;
            } else if totalgain + gain64 >= besttotalgain {
                besttotalgain = totalgain + gain64;
                deferred = false;
            }
            self.gain_mgr.lock(mv.to, mv.v);
            self.apply(part, &mv, gain);
            totalgain += gain64;
        }

        if deferred {
            if let Some(snapshot) = &snapshot {
                self.snapshot.restore(snapshot, part);
                trace!(besttotalgain, totalgain, "restored snapshot");
            }
            totalgain = besttotalgain;
        }
        self.totalcost -= totalgain;
        assert!(
            self.totalcost >= 0,
            "total cost went negative during optimization"
        );
    }

    fn apply(&mut self, part: &mut [u8], mv: &MoveInfoV, gain: i32) {
        self.gain_mgr.update_move(part, mv);
        self.gain_mgr.update_move_v(mv, gain);
        self.validator.update_move(mv);
        part[mv.v.index()] = mv.to;
    }
}
