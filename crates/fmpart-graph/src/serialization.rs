use fmpart_core::errors::{ErrorInfo, FmError};
use fmpart_core::provenance::SchemaVersion;
use fmpart_core::ModuleId;
use serde::{Deserialize, Serialize};

use crate::flags::NetlistConfig;
use crate::netlist::NetlistImpl;

/// Serializes the netlist to a compact binary representation using `bincode`.
pub fn netlist_to_bytes(netlist: &NetlistImpl) -> Result<Vec<u8>, FmError> {
    let serializable = SerializableNetlist::from_netlist(netlist);
    bincode::serialize(&serializable)
        .map_err(|err| FmError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a netlist from its binary representation.
pub fn netlist_from_bytes(bytes: &[u8]) -> Result<NetlistImpl, FmError> {
    let serializable: SerializableNetlist = bincode::deserialize(bytes)
        .map_err(|err| FmError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    serializable.into_netlist()
}

/// Serializes the netlist to a JSON string.
pub fn netlist_to_json(netlist: &NetlistImpl) -> Result<String, FmError> {
    let serializable = SerializableNetlist::from_netlist(netlist);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| FmError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a netlist from a JSON string.
///
/// The JSON layout is
/// `{"config": {...}, "modules": [{"weight": 1, "fixed": false}], "nets": [{"weight": 1, "pins": [0, 1]}]}`.
/// Module and net weights default to one and `fixed` defaults to `false`.
pub fn netlist_from_json(json: &str) -> Result<NetlistImpl, FmError> {
    let serializable: SerializableNetlist = serde_json::from_str(json)
        .map_err(|err| FmError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    serializable.into_netlist()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableNetlist {
    #[serde(default)]
    config: SerializableConfig,
    modules: Vec<SerializableModule>,
    nets: Vec<SerializableNet>,
}

impl SerializableNetlist {
    fn from_netlist(netlist: &NetlistImpl) -> Self {
        let config = SerializableConfig::from_config(netlist.config());
        let modules = netlist
            .module_payloads()
            .into_iter()
            .map(|(weight, fixed)| SerializableModule { weight, fixed })
            .collect();
        let nets = netlist
            .net_payloads()
            .into_iter()
            .map(|(weight, pins)| SerializableNet {
                weight,
                pins: pins.iter().map(|id| id.as_raw()).collect(),
            })
            .collect();
        Self {
            config,
            modules,
            nets,
        }
    }

    fn into_netlist(self) -> Result<NetlistImpl, FmError> {
        let mut netlist = NetlistImpl::new(self.config.into_config());
        for module in &self.modules {
            let id = netlist.add_module_weighted(module.weight);
            if module.fixed {
                netlist.set_fixed(id, true)?;
            }
        }
        for (index, net) in self.nets.into_iter().enumerate() {
            let pins: Vec<ModuleId> = net.pins.into_iter().map(ModuleId::from_raw).collect();
            netlist
                .add_net_weighted(&pins, net.weight)
                .map_err(|err| err.with_context("net", index))?;
        }
        Ok(netlist)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SerializableConfig {
    max_net_degree: Option<usize>,
    schema_version: SchemaVersion,
}

impl Default for SerializableConfig {
    fn default() -> Self {
        Self::from_config(&NetlistConfig::default())
    }
}

impl SerializableConfig {
    fn from_config(config: &NetlistConfig) -> Self {
        Self {
            max_net_degree: config.max_net_degree,
            schema_version: config.schema_version,
        }
    }

    fn into_config(self) -> NetlistConfig {
        NetlistConfig {
            max_net_degree: self.max_net_degree,
            schema_version: self.schema_version,
        }
    }
}

fn unit_weight() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SerializableModule {
    #[serde(default = "unit_weight")]
    weight: u32,
    #[serde(default)]
    fixed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SerializableNet {
    #[serde(default = "unit_weight")]
    weight: u32,
    pins: Vec<u32>,
}
