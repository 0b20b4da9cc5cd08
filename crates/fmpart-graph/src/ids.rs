use std::collections::BTreeSet;

use fmpart_core::ModuleId;

/// Ensures that the list of module identifiers is sorted and contains no duplicates.
pub(crate) fn canonicalize_pins(pins: &[ModuleId]) -> Vec<ModuleId> {
    let set: BTreeSet<ModuleId> = pins.iter().copied().collect();
    set.into_iter().collect()
}
