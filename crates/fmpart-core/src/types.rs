use serde::{Deserialize, Serialize};

/// Identifier for a module (vertex) within a [`Netlist`](crate::Netlist).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModuleId(u32);

impl ModuleId {
    /// Creates a new identifier from its raw integer representation.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Creates an identifier from a dense index.
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Returns the raw integer representation of the identifier.
    pub const fn as_raw(&self) -> u32 {
        self.0
    }

    /// Returns the dense index used by adjacency and assignment arrays.
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Identifier for a net (hyperedge) within a [`Netlist`](crate::Netlist).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NetId(u32);

impl NetId {
    /// Creates a new identifier from its raw integer representation.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Creates an identifier from a dense index.
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Returns the raw integer representation of the identifier.
    pub const fn as_raw(&self) -> u32 {
        self.0
    }

    /// Returns the dense index of the net.
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}
