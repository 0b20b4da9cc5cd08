use std::fs;
use std::path::Path;

use fmpart_core::errors::FmError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::snapshot::SnapshotKind;

/// YAML-configurable parameters of a partitioning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionConfig {
    /// Number of partitions `K` (two selects the bipartition managers).
    #[serde(default = "default_num_parts")]
    pub num_parts: u8,
    /// Balance tolerance in `(0, 1]`; each partition must keep
    /// `round(total_weight * (2 / K) * balance_tol)` weight.
    #[serde(default = "default_balance_tol")]
    pub balance_tol: f64,
    /// Snapshot strategy used to roll back optimization passes.
    #[serde(default)]
    pub snapshot: SnapshotKind,
    /// Multilevel recursion settings.
    #[serde(default)]
    pub multilevel: MultilevelConfig,
    /// Master seed recorded in run provenance.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_num_parts() -> u8 {
    2
}

fn default_balance_tol() -> f64 {
    0.4
}

fn default_seed() -> u64 {
    0x00F0_0D5E_ED00_0001
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            num_parts: default_num_parts(),
            balance_tol: default_balance_tol(),
            snapshot: SnapshotKind::default(),
            multilevel: MultilevelConfig::default(),
            seed: default_seed(),
        }
    }
}

/// Controls when the driver descends to a coarser level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultilevelConfig {
    /// Levels with fewer modules are refined flat.
    #[serde(default = "default_limit_size")]
    pub limit_size: usize,
    /// Required shrink factor of a contraction.
    #[serde(default)]
    pub min_reduction: ReductionRatio,
}

fn default_limit_size() -> usize {
    7
}

impl Default for MultilevelConfig {
    fn default() -> Self {
        Self {
            limit_size: default_limit_size(),
            min_reduction: ReductionRatio::default(),
        }
    }
}

/// A contraction is used when `coarse * num_coarse <= fine * num_fine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReductionRatio {
    /// Multiplier applied to the coarse module count.
    pub coarse: u64,
    /// Multiplier applied to the fine module count.
    pub fine: u64,
}

impl Default for ReductionRatio {
    fn default() -> Self {
        Self { coarse: 5, fine: 3 }
    }
}

impl ReductionRatio {
    /// Returns whether shrinking `num_fine` modules to `num_coarse` is enough.
    pub fn accepts(&self, num_fine: usize, num_coarse: usize) -> bool {
        self.coarse * num_coarse as u64 <= self.fine * num_fine as u64
    }
}

impl PartitionConfig {
    /// Rejects settings the engine cannot run with.
    pub fn validate(&self) -> Result<(), FmError> {
        if self.num_parts < 2 {
            return Err(
                FmError::config("num-parts", "at least two partitions are required")
                    .with_context("num_parts", self.num_parts),
            );
        }
        if !(self.balance_tol > 0.0 && self.balance_tol <= 1.0) {
            return Err(FmError::config(
                "balance-tol",
                "balance tolerance must lie in (0, 1]",
            )
            .with_context("balance_tol", self.balance_tol));
        }
        let ratio = self.multilevel.min_reduction;
        if ratio.coarse == 0 || ratio.fine == 0 || ratio.fine >= ratio.coarse {
            return Err(FmError::config(
                "min-reduction",
                "reduction ratio must require the coarse level to shrink",
            )
            .with_context("coarse", ratio.coarse)
            .with_context("fine", ratio.fine));
        }
        if self.multilevel.limit_size < 2 {
            return Err(FmError::config(
                "limit-size",
                "multilevel limit size must be at least two modules",
            )
            .with_context("limit_size", self.multilevel.limit_size));
        }
        Ok(())
    }

    /// Parses and validates a YAML (or JSON) configuration document.
    pub fn from_yaml_str(source: &str) -> Result<Self, FmError> {
        let config: PartitionConfig = serde_yaml::from_str(source)
            .map_err(|err| FmError::serde("config-parse", err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to YAML.
    pub fn to_yaml_string(&self) -> Result<String, FmError> {
        serde_yaml::to_string(self)
            .map_err(|err| FmError::serde("config-serialize", err.to_string()))
    }

    /// Returns a SHA-256 digest of the canonical JSON form.
    pub fn config_hash(&self) -> Result<String, FmError> {
        let bytes = serde_json::to_vec(self)
            .map_err(|err| FmError::serde("config-serialize", err.to_string()))?;
        Ok(format!("{:x}", Sha256::digest(&bytes)))
    }
}

/// Loads and validates a configuration file.
pub fn load_config(path: &Path) -> Result<PartitionConfig, FmError> {
    let contents = fs::read_to_string(path).map_err(|err| FmError::io(&err, path))?;
    PartitionConfig::from_yaml_str(&contents)
        .map_err(|err| err.with_context("path", path.display()))
}
