use fmpart_core::Netlist;
use sha2::{Digest, Sha256};

use crate::flags::NetlistConfig;
use crate::netlist::NetlistImpl;

/// Computes the canonical structural hash for the provided netlist.
///
/// Nets are hashed as a sorted multiset of `(weight, pins)` signatures, so
/// the digest does not depend on net insertion order. Module identifiers are
/// significant: relabelling modules changes the hash.
pub fn canonical_hash(netlist: &NetlistImpl) -> String {
    let mut hasher = Sha256::new();
    encode_config(netlist.config(), &mut hasher);

    hasher.update((netlist.num_modules() as u64).to_le_bytes());
    for module in netlist.modules() {
        hasher.update(netlist.module_weight(module).to_le_bytes());
        hasher.update([u8::from(netlist.is_fixed(module))]);
    }

    let mut signatures: Vec<(u32, Vec<u32>)> = netlist
        .nets()
        .map(|net| {
            let pins = netlist
                .incident_modules(net)
                .iter()
                .map(|pin| pin.as_raw())
                .collect();
            (netlist.net_weight(net), pins)
        })
        .collect();
    signatures.sort();
    hasher.update((signatures.len() as u64).to_le_bytes());
    for (weight, pins) in signatures {
        hasher.update(weight.to_le_bytes());
        update_slice(&pins, &mut hasher);
    }

    format!("{:x}", hasher.finalize())
}

fn encode_config(config: &NetlistConfig, hasher: &mut Sha256) {
    match config.max_net_degree {
        Some(v) => {
            hasher.update(b"max-net-degree:some");
            hasher.update((v as u64).to_le_bytes());
        }
        None => hasher.update(b"max-net-degree:none"),
    }
    hasher.update(config.schema_version.major.to_le_bytes());
    hasher.update(config.schema_version.minor.to_le_bytes());
    hasher.update(config.schema_version.patch.to_le_bytes());
}

fn update_slice(values: &[u32], hasher: &mut Sha256) {
    hasher.update((values.len() as u64).to_le_bytes());
    for value in values {
        hasher.update(value.to_le_bytes());
    }
}
