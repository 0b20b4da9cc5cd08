//! Multilevel driver: legalize, descend through contractions, refine on the
//! way back up.

use fmpart_core::errors::FmError;
use fmpart_core::Netlist;
use fmpart_graph::{contract, Contraction, NetlistImpl};
use tracing::{debug, info};

use crate::config::PartitionConfig;
use crate::constr_mgr::{BiConstrMgr, ConstraintManager, KWayConstrMgr};
use crate::cost::validate_assignment;
use crate::gain_mgr::{BiGainMgr, GainManager, KWayGainMgr};
use crate::moves::LegalCheck;
use crate::part_mgr::PartMgr;
use crate::snapshot::{BoundarySnapshot, ListSnapshot, SnapshotKind, SnapshotStrategy};

/// Produces the next coarser level of a hierarchy.
pub trait Coarsener {
    /// Returns the contraction of `netlist` at `depth`, or `None` when the
    /// hierarchy ends here.
    fn coarsen(&self, netlist: &NetlistImpl, depth: usize) -> Result<Option<Contraction>, FmError>;
}

/// Never coarsens; the driver refines the input netlist flat.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCoarsening;

impl Coarsener for NoCoarsening {
    fn coarsen(&self, _: &NetlistImpl, _: usize) -> Result<Option<Contraction>, FmError> {
        Ok(None)
    }
}

/// Replays precomputed cluster maps, one per depth.
#[derive(Debug, Clone, Default)]
pub struct ClusterMapCoarsener {
    maps: Vec<Vec<u32>>,
}

impl ClusterMapCoarsener {
    /// Wraps `maps[d]`, the cluster of every module at depth `d`.
    pub fn new(maps: Vec<Vec<u32>>) -> Self {
        Self { maps }
    }
}

impl Coarsener for ClusterMapCoarsener {
    fn coarsen(&self, netlist: &NetlistImpl, depth: usize) -> Result<Option<Contraction>, FmError> {
        match self.maps.get(depth) {
            Some(map) => contract(netlist, map)
                .map(Some)
                .map_err(|err| err.with_context("depth", depth)),
            None => Ok(None),
        }
    }
}

/// Runs FM partitioning over a hierarchy supplied by a [`Coarsener`].
#[derive(Debug, Clone)]
pub struct MultilevelPartitioner<K> {
    config: PartitionConfig,
    coarsener: K,
    totalcost: i64,
}

impl<K: Coarsener> MultilevelPartitioner<K> {
    /// Validates `config` and builds the driver.
    pub fn new(config: PartitionConfig, coarsener: K) -> Result<Self, FmError> {
        config.validate()?;
        Ok(Self {
            config,
            coarsener,
            totalcost: 0,
        })
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &PartitionConfig {
        &self.config
    }

    /// Returns the cost reached by the last completed run.
    pub fn totalcost(&self) -> i64 {
        self.totalcost
    }

    /// Partitions `netlist` in place, starting from `part`.
    ///
    /// Returns [`LegalCheck::AllSatisfied`] when the balance constraint holds
    /// and the assignment was refined; any other status means legalization
    /// got stuck and `part` holds the best legalization attempt.
    pub fn run(&mut self, netlist: &NetlistImpl, part: &mut [u8]) -> Result<LegalCheck, FmError> {
        validate_assignment(netlist, part, self.config.num_parts)?;
        info!(
            modules = netlist.num_modules(),
            nets = netlist.num_nets(),
            num_parts = self.config.num_parts,
            "partitioning"
        );
        let status = self.run_level(netlist, part, 0)?;
        info!(status = ?status, totalcost = self.totalcost, "partitioning finished");
        Ok(status)
    }

    fn run_level(
        &mut self,
        netlist: &NetlistImpl,
        part: &mut [u8],
        depth: usize,
    ) -> Result<LegalCheck, FmError> {
        let tol = self.config.balance_tol;
        let num_parts = self.config.num_parts;
        match (num_parts, self.config.snapshot) {
            (2, SnapshotKind::List) => {
                let mgr = PartMgr::new(
                    netlist,
                    BiGainMgr::new(netlist),
                    BiConstrMgr::new(netlist, tol),
                    ListSnapshot,
                );
                self.run_with(mgr, netlist, part, depth)
            }
            (2, SnapshotKind::Boundary) => {
                let mgr = PartMgr::new(
                    netlist,
                    BiGainMgr::new(netlist),
                    BiConstrMgr::new(netlist, tol),
                    BoundarySnapshot::new(netlist),
                );
                self.run_with(mgr, netlist, part, depth)
            }
            (_, SnapshotKind::List) => {
                let mgr = PartMgr::new(
                    netlist,
                    KWayGainMgr::new(netlist, num_parts),
                    KWayConstrMgr::new(netlist, tol, num_parts),
                    ListSnapshot,
                );
                self.run_with(mgr, netlist, part, depth)
            }
            (_, SnapshotKind::Boundary) => {
                let mgr = PartMgr::new(
                    netlist,
                    KWayGainMgr::new(netlist, num_parts),
                    KWayConstrMgr::new(netlist, tol, num_parts),
                    BoundarySnapshot::new(netlist),
                );
                self.run_with(mgr, netlist, part, depth)
            }
        }
    }

    fn run_with<G, C, S>(
        &mut self,
        mut mgr: PartMgr<'_, NetlistImpl, G, C, S>,
        netlist: &NetlistImpl,
        part: &mut [u8],
        depth: usize,
    ) -> Result<LegalCheck, FmError>
    where
        G: GainManager,
        C: ConstraintManager,
        S: SnapshotStrategy,
    {
        let status = mgr.legalize(part);
        if status != LegalCheck::AllSatisfied {
            debug!(level = depth, status = ?status, "legalization incomplete");
            self.totalcost = mgr.totalcost();
            return Ok(status);
        }

        let num_modules = netlist.num_modules();
        if num_modules >= self.config.multilevel.limit_size {
            if let Some(contraction) = self.coarsener.coarsen(netlist, depth)? {
                let ratio = self.config.multilevel.min_reduction;
                if ratio.accepts(num_modules, contraction.num_coarse()) {
                    debug!(
                        level = depth,
                        fine = num_modules,
                        coarse = contraction.num_coarse(),
                        "descending"
                    );
                    let mut coarse_part = vec![0u8; contraction.num_coarse()];
                    contraction.project_up(part, &mut coarse_part)?;
                    let coarse_status =
                        self.run_level(contraction.coarse(), &mut coarse_part, depth + 1)?;
                    if coarse_status == LegalCheck::AllSatisfied {
                        contraction.project_down(&coarse_part, part)?;
                    }
                } else {
                    debug!(
                        level = depth,
                        fine = num_modules,
                        coarse = contraction.num_coarse(),
                        "contraction too weak, refining flat"
                    );
                }
            }
        }

        mgr.optimize(part);
        self.totalcost = mgr.totalcost();
        debug!(level = depth, totalcost = self.totalcost, "level refined");
        Ok(status)
    }
}
