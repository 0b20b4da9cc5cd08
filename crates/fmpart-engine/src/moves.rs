use fmpart_core::{ModuleId, NetId};
use serde::{Deserialize, Serialize};

/// A module move seen from one of its nets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveInfo {
    /// Net whose other pins receive gain updates.
    pub net: NetId,
    /// Moved module.
    pub v: ModuleId,
    /// Partition the module leaves.
    pub from: u8,
    /// Partition the module enters.
    pub to: u8,
}

/// A candidate or applied module move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveInfoV {
    /// Moved module.
    pub v: ModuleId,
    /// Partition the module leaves.
    pub from: u8,
    /// Partition the module enters.
    pub to: u8,
}

impl MoveInfoV {
    /// Attaches `net` to this move.
    pub fn on_net(&self, net: NetId) -> MoveInfo {
        MoveInfo {
            net,
            v: self.v,
            from: self.from,
            to: self.to,
        }
    }
}

/// Balance status reported by legalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegalCheck {
    /// The move would push its source partition below the lower bound.
    NotSatisfied,
    /// The move is allowed but some partition is still below the lower bound.
    GetBetter,
    /// Every partition meets the lower bound.
    AllSatisfied,
}
