#![deny(missing_docs)]

//! Fiduccia-Mattheyses refinement for hypergraph bipartitioning and K-way
//! partitioning, with bucket-based gain queues, balance constraints,
//! snapshot rollback and a multilevel driver.

pub mod bpqueue;
/// YAML configuration of a partitioning run.
pub mod config;
pub mod constr_mgr;
/// From-scratch assignment checks and cost evaluation.
pub mod cost;
pub mod dllink;
pub mod gain_calc;
pub mod gain_mgr;
/// Move descriptors and legalization status.
pub mod moves;
pub mod multilevel;
pub mod part_mgr;
/// Circular partition order used by the K-way calculator.
pub mod robin;
pub mod snapshot;

pub use bpqueue::BoundedPriorityQueue;
pub use config::{load_config, MultilevelConfig, PartitionConfig, ReductionRatio};
pub use constr_mgr::{BiConstrMgr, ConstraintManager, KWayConstrMgr};
pub use cost::{cut_cost, part_weights, validate_assignment};
pub use dllink::{LinkArena, LinkState};
pub use gain_calc::{BiGainCalc, KWayGainCalc};
pub use gain_mgr::{BiGainMgr, GainManager, KWayGainMgr};
pub use moves::{LegalCheck, MoveInfo, MoveInfoV};
pub use multilevel::{ClusterMapCoarsener, Coarsener, MultilevelPartitioner, NoCoarsening};
pub use part_mgr::PartMgr;
pub use robin::RoundRobin;
pub use snapshot::{BoundaryCapture, BoundarySnapshot, ListSnapshot, SnapshotKind, SnapshotStrategy};
