use fmpart_core::provenance::SchemaVersion;
use fmpart_core::MAX_GAIN_BOUND;

/// Largest net weight accepted by [`NetlistImpl`](crate::NetlistImpl).
///
/// A single net may carry the whole gain bound. The weighted degree of each
/// module is capped separately at [`MAX_GAIN_BOUND`].
pub const MAX_NET_WEIGHT: u32 = MAX_GAIN_BOUND as u32;

/// Configuration options that control the behaviour of [`NetlistImpl`](crate::NetlistImpl).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetlistConfig {
    /// Maximum number of pins permitted on a single net.
    pub max_net_degree: Option<usize>,
    /// Schema version stored alongside serialized payloads.
    pub schema_version: SchemaVersion,
}

impl Default for NetlistConfig {
    fn default() -> Self {
        Self {
            max_net_degree: None,
            schema_version: SchemaVersion::new(1, 0, 0),
        }
    }
}
