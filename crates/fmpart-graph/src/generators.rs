use fmpart_core::errors::FmError;
use fmpart_core::rng::RngHandle;
use fmpart_core::ModuleId;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::flags::NetlistConfig;
use crate::netlist::NetlistImpl;

const PIN_STREAM: u64 = 0x7069_6e73;
const WEIGHT_STREAM: u64 = 0x7767_6874;
const FIXED_STREAM: u64 = 0x6669_7864;

/// Generates a random unit-weight netlist with deterministic randomness.
///
/// Every net connects between two and `max_pins` distinct modules chosen
/// uniformly at random.
pub fn gen_random_netlist(
    num_modules: usize,
    num_nets: usize,
    max_pins: usize,
    rng: &mut RngHandle,
) -> Result<NetlistImpl, FmError> {
    gen_random_weighted_netlist(num_modules, num_nets, max_pins, 1, 1, rng)
}

/// Generates a random netlist whose module and net weights are drawn from
/// `1..=max_module_weight` and `1..=max_net_weight`.
pub fn gen_random_weighted_netlist(
    num_modules: usize,
    num_nets: usize,
    max_pins: usize,
    max_module_weight: u32,
    max_net_weight: u32,
    rng: &mut RngHandle,
) -> Result<NetlistImpl, FmError> {
    if num_modules < 2 {
        return Err(FmError::graph(
            "too-few-modules",
            "random netlist generator requires at least two modules",
        )
        .with_context("modules", num_modules));
    }
    if max_pins < 2 {
        return Err(
            FmError::graph("too-few-pins", "nets require a pin cap of at least two")
                .with_context("max_pins", max_pins),
        );
    }

    let mut pin_rng = rng.substream(PIN_STREAM);
    let mut weight_rng = rng.substream(WEIGHT_STREAM);

    let mut netlist = NetlistImpl::new(NetlistConfig::default());
    let modules: Vec<ModuleId> = (0..num_modules)
        .map(|_| netlist.add_module_weighted(weight_rng.gen_range(1..=max_module_weight.max(1))))
        .collect();

    let pin_cap = max_pins.min(num_modules);
    for _ in 0..num_nets {
        let count = pin_rng.gen_range(2..=pin_cap);
        let pins: Vec<ModuleId> = modules
            .choose_multiple(&mut pin_rng, count)
            .copied()
            .collect();
        let weight = weight_rng.gen_range(1..=max_net_weight.max(1));
        netlist.add_net_weighted(&pins, weight)?;
    }

    Ok(netlist)
}

/// Generates a random netlist that exercises the degenerate cases.
///
/// Module weights are drawn from `0..=3`, roughly one module in five is
/// fixed, nets connect between one and `max_pins` modules and carry weights
/// in `1..=3`.
pub fn gen_random_mixed_netlist(
    num_modules: usize,
    num_nets: usize,
    max_pins: usize,
    rng: &mut RngHandle,
) -> Result<NetlistImpl, FmError> {
    if num_modules < 2 {
        return Err(FmError::graph(
            "too-few-modules",
            "random netlist generator requires at least two modules",
        )
        .with_context("modules", num_modules));
    }

    let mut pin_rng = rng.substream(PIN_STREAM);
    let mut weight_rng = rng.substream(WEIGHT_STREAM);
    let mut fixed_rng = rng.substream(FIXED_STREAM);

    let mut netlist = NetlistImpl::new(NetlistConfig::default());
    let modules: Vec<ModuleId> = (0..num_modules)
        .map(|_| netlist.add_module_weighted(weight_rng.gen_range(0..=3)))
        .collect();
    for module in &modules {
        if fixed_rng.gen_bool(0.2) {
            netlist.set_fixed(*module, true)?;
        }
    }

    let pin_cap = max_pins.clamp(1, num_modules);
    for _ in 0..num_nets {
        let count = pin_rng.gen_range(1..=pin_cap);
        let pins: Vec<ModuleId> = modules
            .choose_multiple(&mut pin_rng, count)
            .copied()
            .collect();
        netlist.add_net_weighted(&pins, weight_rng.gen_range(1..=3))?;
    }

    Ok(netlist)
}
