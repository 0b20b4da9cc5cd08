use fmpart_core::errors::FmError;
use fmpart_core::ModuleId;

use crate::flags::NetlistConfig;
use crate::netlist::NetlistImpl;

/// Module weights of the [`dragonfly`] fixture: cells `a0..a3` then pads `p1..p3`.
pub const DRAGONFLY_WEIGHTS: [u32; 7] = [1, 3, 4, 2, 0, 0, 0];

/// Small seven-module netlist with four cells and three fixed pads.
///
/// Modules `0..4` are the cells `a0..a3`, modules `4..7` the pads `p1..p3`.
/// Nets: `{a0,a1,p1}`, `{a0,a2,a3}`, `{a1,a2,a3}`, `{a2,p2}`, `{a3,p3}` and
/// `{a0,a1,a2,a3}`, covering the two-pin, three-pin and general delta paths.
pub fn dragonfly() -> Result<NetlistImpl, FmError> {
    let mut netlist = NetlistImpl::new(NetlistConfig::default());
    let ids: Vec<ModuleId> = DRAGONFLY_WEIGHTS
        .iter()
        .map(|weight| netlist.add_module_weighted(*weight))
        .collect();
    let [a0, a1, a2, a3, p1, p2, p3] = [ids[0], ids[1], ids[2], ids[3], ids[4], ids[5], ids[6]];

    for pad in [p1, p2, p3] {
        netlist.set_fixed(pad, true)?;
    }

    netlist.add_net(&[a0, a1, p1])?;
    netlist.add_net(&[a0, a2, a3])?;
    netlist.add_net(&[a1, a2, a3])?;
    netlist.add_net(&[a2, p2])?;
    netlist.add_net(&[a3, p3])?;
    netlist.add_net(&[a0, a1, a2, a3])?;
    Ok(netlist)
}
