use fmpart_core::{errors::FmError, ModuleId, NetId, Netlist, MAX_GAIN_BOUND};

use crate::flags::{NetlistConfig, MAX_NET_WEIGHT};
use crate::ids::canonicalize_pins;

#[derive(Debug, Clone)]
pub(crate) struct ModuleRecord {
    weight: u32,
    fixed: bool,
    nets: Vec<NetId>,
    /// Total weight of incident nets with at least two pins.
    gain_degree: i64,
}

impl ModuleRecord {
    fn new(weight: u32) -> Self {
        Self {
            weight,
            fixed: false,
            nets: Vec::new(),
            gain_degree: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NetRecord {
    weight: u32,
    pins: Vec<ModuleId>,
}

/// Adjacency store for a weighted netlist (hypergraph of modules and nets).
///
/// Modules and nets are append-only and addressed by dense identifiers, which
/// is what the partitioning engine indexes its gain tables with. Pins are kept
/// sorted and deduplicated; the same pin set may appear on several nets.
#[derive(Debug, Clone)]
pub struct NetlistImpl {
    config: NetlistConfig,
    modules: Vec<ModuleRecord>,
    nets: Vec<NetRecord>,
    fixed: Vec<ModuleId>,
}

impl NetlistImpl {
    /// Creates an empty netlist with the provided configuration.
    pub fn new(config: NetlistConfig) -> Self {
        Self {
            config,
            modules: Vec::new(),
            nets: Vec::new(),
            fixed: Vec::new(),
        }
    }

    /// Creates a netlist with `count` unit-weight modules and no nets.
    pub fn with_modules(config: NetlistConfig, count: usize) -> Self {
        let mut netlist = Self::new(config);
        for _ in 0..count {
            netlist.add_module();
        }
        netlist
    }

    /// Returns the configuration used by this netlist.
    pub fn config(&self) -> &NetlistConfig {
        &self.config
    }

    /// Adds a unit-weight module.
    pub fn add_module(&mut self) -> ModuleId {
        self.add_module_weighted(1)
    }

    /// Adds a module with the given weight.
    pub fn add_module_weighted(&mut self, weight: u32) -> ModuleId {
        let id = ModuleId::from_index(self.modules.len());
        self.modules.push(ModuleRecord::new(weight));
        id
    }

    /// Adds a unit-weight net connecting `pins`.
    pub fn add_net(&mut self, pins: &[ModuleId]) -> Result<NetId, FmError> {
        self.add_net_weighted(pins, 1)
    }

    /// Adds a net with the given weight connecting `pins`.
    ///
    /// Fails without modifying the netlist when a pin's weighted degree would
    /// exceed [`MAX_GAIN_BOUND`].
    pub fn add_net_weighted(&mut self, pins: &[ModuleId], weight: u32) -> Result<NetId, FmError> {
        if pins.is_empty() {
            return Err(FmError::graph(
                "empty-net",
                "nets require at least one pin",
            ));
        }
        if weight > MAX_NET_WEIGHT {
            return Err(FmError::graph("net-weight-overflow", "net weight exceeds cap")
                .with_context("weight", weight)
                .with_context("cap", MAX_NET_WEIGHT));
        }
        let pins = canonicalize_pins(pins);
        for pin in &pins {
            self.module(*pin)?;
        }
        if let Some(cap) = self.config.max_net_degree {
            if pins.len() > cap {
                return Err(
                    FmError::graph("net-degree-cap", "net degree cap would be exceeded")
                        .with_context("cap", cap)
                        .with_context("attempted", pins.len()),
                );
            }
        }
        let counted = if pins.len() >= 2 { i64::from(weight) } else { 0 };
        for pin in &pins {
            let gain_degree = self.modules[pin.index()].gain_degree + counted;
            if gain_degree > i64::from(MAX_GAIN_BOUND) {
                return Err(FmError::graph(
                    "gain-bound-overflow",
                    "weighted module degree exceeds the gain bound",
                )
                .with_context("module", pin.as_raw())
                .with_context("weighted_degree", gain_degree)
                .with_context("cap", MAX_GAIN_BOUND));
            }
        }
        let id = NetId::from_index(self.nets.len());
        for pin in &pins {
            let module = &mut self.modules[pin.index()];
            module.nets.push(id);
            module.gain_degree += counted;
        }
        self.nets.push(NetRecord { weight, pins });
        Ok(id)
    }

    /// Marks `module` as fixed (never moved by the engine) or releases it.
    pub fn set_fixed(&mut self, module: ModuleId, fixed: bool) -> Result<(), FmError> {
        self.module_mut(module)?.fixed = fixed;
        match (fixed, self.fixed.binary_search(&module)) {
            (true, Err(pos)) => self.fixed.insert(pos, module),
            (false, Ok(pos)) => {
                self.fixed.remove(pos);
            }
            _ => {}
        }
        Ok(())
    }

    /// Returns the total number of pins over all nets.
    pub fn num_pins(&self) -> usize {
        self.nets.iter().map(|net| net.pins.len()).sum()
    }

    pub(crate) fn module(&self, id: ModuleId) -> Result<&ModuleRecord, FmError> {
        self.modules.get(id.index()).ok_or_else(|| {
            FmError::graph("unknown-module", "module does not exist")
                .with_context("module", id.as_raw())
        })
    }

    fn module_mut(&mut self, id: ModuleId) -> Result<&mut ModuleRecord, FmError> {
        self.modules.get_mut(id.index()).ok_or_else(|| {
            FmError::graph("unknown-module", "module does not exist")
                .with_context("module", id.as_raw())
        })
    }

    /// Returns `(weight, fixed)` for every module, in identifier order.
    pub(crate) fn module_payloads(&self) -> Vec<(u32, bool)> {
        self.modules
            .iter()
            .map(|module| (module.weight, module.fixed))
            .collect()
    }

    /// Returns `(weight, pins)` for every net, in identifier order.
    pub(crate) fn net_payloads(&self) -> Vec<(u32, &[ModuleId])> {
        self.nets
            .iter()
            .map(|net| (net.weight, net.pins.as_slice()))
            .collect()
    }
}

impl Default for NetlistImpl {
    fn default() -> Self {
        Self::new(NetlistConfig::default())
    }
}

impl Netlist for NetlistImpl {
    fn num_modules(&self) -> usize {
        self.modules.len()
    }

    fn num_nets(&self) -> usize {
        self.nets.len()
    }

    fn incident_modules(&self, net: NetId) -> &[ModuleId] {
        &self.nets[net.index()].pins
    }

    fn incident_nets(&self, module: ModuleId) -> &[NetId] {
        &self.modules[module.index()].nets
    }

    fn module_weight(&self, module: ModuleId) -> u32 {
        self.modules[module.index()].weight
    }

    fn net_weight(&self, net: NetId) -> u32 {
        self.nets[net.index()].weight
    }

    fn fixed_modules(&self) -> &[ModuleId] {
        &self.fixed
    }

    fn is_fixed(&self, module: ModuleId) -> bool {
        self.modules[module.index()].fixed
    }
}
