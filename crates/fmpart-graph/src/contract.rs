use fmpart_core::errors::FmError;
use fmpart_core::{ModuleId, Netlist};

use crate::netlist::NetlistImpl;

/// Coarse netlist obtained by merging fine modules into clusters.
#[derive(Debug, Clone)]
pub struct Contraction {
    coarse: NetlistImpl,
    cluster_of: Vec<ModuleId>,
}

impl Contraction {
    /// Returns the coarse netlist.
    pub fn coarse(&self) -> &NetlistImpl {
        &self.coarse
    }

    /// Returns the cluster (coarse module) that fine module `module` belongs to.
    pub fn cluster_of(&self, module: ModuleId) -> ModuleId {
        self.cluster_of[module.index()]
    }

    /// Returns the number of fine modules.
    pub fn num_fine(&self) -> usize {
        self.cluster_of.len()
    }

    /// Returns the number of coarse modules.
    pub fn num_coarse(&self) -> usize {
        self.coarse.num_modules()
    }

    /// Copies a fine assignment onto the clusters: `coarse[cluster(v)] = fine[v]`.
    ///
    /// When a cluster has members in several partitions the last member wins.
    pub fn project_up(&self, fine: &[u8], coarse: &mut [u8]) -> Result<(), FmError> {
        self.check_lengths(fine.len(), coarse.len())?;
        for (v, cluster) in self.cluster_of.iter().enumerate() {
            coarse[cluster.index()] = fine[v];
        }
        Ok(())
    }

    /// Copies a coarse assignment back to the members: `fine[v] = coarse[cluster(v)]`.
    pub fn project_down(&self, coarse: &[u8], fine: &mut [u8]) -> Result<(), FmError> {
        self.check_lengths(fine.len(), coarse.len())?;
        for (v, cluster) in self.cluster_of.iter().enumerate() {
            fine[v] = coarse[cluster.index()];
        }
        Ok(())
    }

    fn check_lengths(&self, fine: usize, coarse: usize) -> Result<(), FmError> {
        if fine != self.num_fine() || coarse != self.num_coarse() {
            return Err(FmError::partition(
                "projection-length",
                "assignment lengths do not match the contraction",
            )
            .with_context("fine", fine)
            .with_context("expected_fine", self.num_fine())
            .with_context("coarse", coarse)
            .with_context("expected_coarse", self.num_coarse()));
        }
        Ok(())
    }
}

/// Builds the coarse netlist for a caller-supplied clustering.
///
/// `cluster_of[v]` names the cluster of fine module `v`; clusters must be
/// numbered densely from zero. A cluster weighs the sum of its members. Each
/// fine net maps to the deduplicated set of its pins' clusters and is dropped
/// once it collapses below two pins. A fixed module must sit alone in its
/// cluster, which then becomes fixed.
pub fn contract(netlist: &NetlistImpl, cluster_of: &[u32]) -> Result<Contraction, FmError> {
    if cluster_of.len() != netlist.num_modules() {
        return Err(FmError::partition(
            "cluster-map-length",
            "cluster map must cover every module",
        )
        .with_context("expected", netlist.num_modules())
        .with_context("actual", cluster_of.len()));
    }
    let num_clusters = cluster_of.iter().map(|c| *c as usize + 1).max().unwrap_or(0);

    let mut weights = vec![0u32; num_clusters];
    let mut members = vec![0usize; num_clusters];
    for module in netlist.modules() {
        let cluster = cluster_of[module.index()] as usize;
        weights[cluster] = weights[cluster].saturating_add(netlist.module_weight(module));
        members[cluster] += 1;
    }
    if let Some(empty) = members.iter().position(|count| *count == 0) {
        return Err(FmError::partition(
            "sparse-cluster-map",
            "cluster identifiers must be dense",
        )
        .with_context("cluster", empty));
    }

    let mut coarse = NetlistImpl::new(netlist.config().clone());
    for weight in &weights {
        coarse.add_module_weighted(*weight);
    }
    for fixed in netlist.fixed_modules() {
        let cluster = cluster_of[fixed.index()];
        if members[cluster as usize] != 1 {
            return Err(FmError::partition(
                "fixed-module-merged",
                "fixed modules cannot be merged with other modules",
            )
            .with_context("module", fixed.as_raw())
            .with_context("cluster", cluster));
        }
        coarse.set_fixed(ModuleId::from_raw(cluster), true)?;
    }

    for net in netlist.nets() {
        let mut distinct: Vec<ModuleId> = netlist
            .incident_modules(net)
            .iter()
            .map(|pin| ModuleId::from_raw(cluster_of[pin.index()]))
            .collect();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.len() < 2 {
            continue;
        }
        coarse
            .add_net_weighted(&distinct, netlist.net_weight(net))
            .map_err(|err| err.with_context("net", net.as_raw()))?;
    }

    Ok(Contraction {
        coarse,
        cluster_of: cluster_of.iter().copied().map(ModuleId::from_raw).collect(),
    })
}
