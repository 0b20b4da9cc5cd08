//! Snapshot strategies used to roll back the tail of an optimization pass.

use std::collections::VecDeque;

use fmpart_core::{ModuleId, NetId, Netlist};
use serde::{Deserialize, Serialize};

/// Captures an assignment and restores it exactly.
pub trait SnapshotStrategy {
    /// Opaque captured state.
    type Snapshot;

    /// Captures enough of `part` to rebuild it.
    fn capture(&self, part: &[u8]) -> Self::Snapshot;

    /// Rewrites `part` to the captured assignment.
    fn restore(&self, snapshot: &Self::Snapshot, part: &mut [u8]);
}

/// Selects the snapshot strategy of an optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnapshotKind {
    /// Full copy of the assignment.
    #[default]
    List,
    /// Boundary nets plus flood fill through interior nets.
    Boundary,
}

/// Copies the whole assignment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListSnapshot;

impl SnapshotStrategy for ListSnapshot {
    type Snapshot = Vec<u8>;

    fn capture(&self, part: &[u8]) -> Vec<u8> {
        part.to_vec()
    }

    fn restore(&self, snapshot: &Vec<u8>, part: &mut [u8]) {
        part.copy_from_slice(snapshot);
    }
}

/// Boundary nets and seed labels from which an assignment can be regrown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryCapture {
    /// Nets spanning more than one partition, ascending.
    pub boundary: Vec<NetId>,
    /// Partition of every boundary module plus one representative of each
    /// group of modules not reachable from the boundary through interior nets.
    pub seeds: Vec<(ModuleId, u8)>,
}

/// Records only the boundary and regrows interior labels on restore.
///
/// Interior nets (all pins in one partition) connect modules that share a
/// partition, so flooding labels outward from the seeds through interior nets
/// reproduces the captured assignment.
#[derive(Debug, Clone, Copy)]
pub struct BoundarySnapshot<'a, N> {
    netlist: &'a N,
}

impl<'a, N: Netlist> BoundarySnapshot<'a, N> {
    /// Creates the strategy for `netlist`.
    pub fn new(netlist: &'a N) -> Self {
        Self { netlist }
    }

    fn is_boundary(&self, net: NetId, part: &[u8]) -> bool {
        let mut pins = self.netlist.incident_modules(net).iter();
        match pins.next() {
            Some(first) => {
                let p = part[first.index()];
                pins.any(|w| part[w.index()] != p)
            }
            None => false,
        }
    }

    /// Labels every module reachable from `queue` through non-boundary nets.
    fn flood(
        &self,
        boundary: &[bool],
        visited: &mut [bool],
        queue: &mut VecDeque<ModuleId>,
        part: &mut [u8],
    ) {
        while let Some(u) = queue.pop_front() {
            let label = part[u.index()];
            for net in self.netlist.incident_nets(u) {
                if boundary[net.index()] {
                    continue;
                }
                for w in self.netlist.incident_modules(*net) {
                    if !visited[w.index()] {
                        visited[w.index()] = true;
                        part[w.index()] = label;
                        queue.push_back(*w);
                    }
                }
            }
        }
    }
}

impl<'a, N: Netlist> SnapshotStrategy for BoundarySnapshot<'a, N> {
    type Snapshot = BoundaryCapture;

    fn capture(&self, part: &[u8]) -> BoundaryCapture {
        let n = self.netlist.num_modules();
        let mut is_boundary = vec![false; self.netlist.num_nets()];
        let mut boundary = Vec::new();
        for net in self.netlist.nets() {
            if self.is_boundary(net, part) {
                is_boundary[net.index()] = true;
                boundary.push(net);
            }
        }

        let mut visited = vec![false; n];
        let mut seeds = Vec::new();
        for net in &boundary {
            for w in self.netlist.incident_modules(*net) {
                if !visited[w.index()] {
                    visited[w.index()] = true;
                    seeds.push((*w, part[w.index()]));
                }
            }
        }

        // Walk interior groups on a scratch copy so seeds of isolated groups
        // are found without touching the caller's assignment.
        let mut scratch = part.to_vec();
        let mut queue: VecDeque<ModuleId> = seeds.iter().map(|(w, _)| *w).collect();
        self.flood(&is_boundary, &mut visited, &mut queue, &mut scratch);
        for v in self.netlist.modules() {
            if visited[v.index()] {
                continue;
            }
            visited[v.index()] = true;
            seeds.push((v, part[v.index()]));
            queue.push_back(v);
            self.flood(&is_boundary, &mut visited, &mut queue, &mut scratch);
        }

        BoundaryCapture { boundary, seeds }
    }

    fn restore(&self, snapshot: &BoundaryCapture, part: &mut [u8]) {
        let mut is_boundary = vec![false; self.netlist.num_nets()];
        for net in &snapshot.boundary {
            is_boundary[net.index()] = true;
        }
        let mut visited = vec![false; self.netlist.num_modules()];
        let mut queue = VecDeque::with_capacity(snapshot.seeds.len());
        for (v, label) in &snapshot.seeds {
            part[v.index()] = *label;
            visited[v.index()] = true;
            queue.push_back(*v);
        }
        self.flood(&is_boundary, &mut visited, &mut queue, part);
    }
}
