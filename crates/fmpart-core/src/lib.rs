#![deny(missing_docs)]
#![doc = "Core identifiers, the netlist contract and shared error types for the fmpart engine."]

pub mod errors;
pub mod provenance;
pub mod rng;
mod types;

pub use errors::{ErrorInfo, FmError};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RngHandle};
pub use types::{ModuleId, NetId};

/// Largest gain bound the engine builds bucket queues for.
///
/// Each queue allocates `2 * bound + 2` bucket heads, so netlist stores must
/// keep every module's weighted degree at or below this value.
pub const MAX_GAIN_BOUND: i32 = 1 << 16;

/// Read-only adjacency contract consumed by the partitioning engine.
///
/// Modules and nets are addressed by dense identifiers in
/// `0..num_modules()` and `0..num_nets()`. Incident lists never contain
/// duplicates.
pub trait Netlist {
    /// Returns the number of modules (vertices).
    fn num_modules(&self) -> usize;

    /// Returns the number of nets (hyperedges).
    fn num_nets(&self) -> usize;

    /// Returns the modules connected by `net`.
    fn incident_modules(&self, net: NetId) -> &[ModuleId];

    /// Returns the nets incident to `module`.
    fn incident_nets(&self, module: ModuleId) -> &[NetId];

    /// Returns the weight of `module` (1 when unweighted).
    fn module_weight(&self, module: ModuleId) -> u32;

    /// Returns the weight of `net` (1 when unweighted).
    fn net_weight(&self, net: NetId) -> u32;

    /// Returns the modules that must never move.
    fn fixed_modules(&self) -> &[ModuleId];

    /// Returns whether `module` is fixed.
    fn is_fixed(&self, module: ModuleId) -> bool;

    /// Returns the number of modules connected by `net`.
    fn degree(&self, net: NetId) -> usize {
        self.incident_modules(net).len()
    }

    /// Returns the largest number of nets incident to a single module.
    fn max_degree(&self) -> usize {
        self.modules()
            .map(|module| self.incident_nets(module).len())
            .max()
            .unwrap_or(0)
    }

    /// Returns the largest absolute gain any single move can realize.
    ///
    /// Every net with at least two pins contributes at most its weight to the
    /// gain of one of its modules, so the bound is the maximum weighted module
    /// degree. Equals [`Netlist::max_degree`] on unweighted netlists without
    /// degenerate nets. Saturates at `i32::MAX`; stores that uphold
    /// [`MAX_GAIN_BOUND`] never get there.
    fn gain_bound(&self) -> i32 {
        self.modules()
            .map(|module| {
                self.incident_nets(module)
                    .iter()
                    .filter(|net| self.degree(**net) >= 2)
                    .map(|net| i64::from(self.net_weight(*net)))
                    .sum::<i64>()
            })
            .max()
            .map(|bound| i32::try_from(bound).unwrap_or(i32::MAX))
            .unwrap_or(0)
    }

    /// Returns the sum of all module weights.
    fn total_weight(&self) -> u64 {
        self.modules()
            .map(|module| u64::from(self.module_weight(module)))
            .sum()
    }

    /// Iterates over all module identifiers.
    fn modules(&self) -> Box<dyn ExactSizeIterator<Item = ModuleId> + '_> {
        Box::new((0..self.num_modules()).map(ModuleId::from_index))
    }

    /// Iterates over all net identifiers.
    fn nets(&self) -> Box<dyn ExactSizeIterator<Item = NetId> + '_> {
        Box::new((0..self.num_nets()).map(NetId::from_index))
    }
}
