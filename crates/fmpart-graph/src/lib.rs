#![deny(missing_docs)]

//! Weighted netlist store implementing the `fmpart-core` contracts, together
//! with generators, fixtures, serialization and contraction helpers.

mod contract;
mod fixtures;
mod flags;
mod generators;
mod hash;
mod ids;
mod netlist;
mod serialization;

pub use contract::{contract, Contraction};
pub use fixtures::{dragonfly, DRAGONFLY_WEIGHTS};
pub use flags::{NetlistConfig, MAX_NET_WEIGHT};
pub use generators::{gen_random_mixed_netlist, gen_random_netlist, gen_random_weighted_netlist};
pub use hash::canonical_hash;
pub use netlist::NetlistImpl;

/// Re-export serialization helpers for downstream crates.
pub use serialization::{netlist_from_bytes, netlist_from_json, netlist_to_bytes, netlist_to_json};
