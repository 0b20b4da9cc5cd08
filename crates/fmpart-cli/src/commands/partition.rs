use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use fmpart_core::errors::FmError;
use fmpart_core::{Netlist, RunProvenance};
use fmpart_engine::{
    load_config, ClusterMapCoarsener, Coarsener, LegalCheck, MultilevelPartitioner, NoCoarsening,
    PartitionConfig,
};
use fmpart_graph::{canonical_hash, netlist_from_json, NetlistImpl};
use serde::Serialize;
use tracing::info;

#[derive(Args, Debug)]
pub struct PartitionArgs {
    /// JSON netlist to partition.
    #[arg(long)]
    pub netlist: PathBuf,
    /// YAML run configuration; defaults apply when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Number of partitions, overriding the configuration.
    #[arg(long)]
    pub parts: Option<u8>,
    /// Balance tolerance, overriding the configuration.
    #[arg(long)]
    pub tol: Option<f64>,
    /// JSON array with the starting partition of every module (all zero by default).
    #[arg(long)]
    pub initial: Option<PathBuf>,
    /// JSON array of per-level cluster maps; the run is flat without it.
    #[arg(long)]
    pub hierarchy: Option<PathBuf>,
    /// Report destination; the report goes to stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct PartitionReport {
    legal: bool,
    status: LegalCheck,
    totalcost: i64,
    part: Vec<u8>,
    netlist_hash: String,
    provenance: RunProvenance,
}

pub fn run(args: &PartitionArgs) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(args)?;
    let netlist = read_netlist(&args.netlist)?;
    let mut part = match &args.initial {
        Some(path) => read_json::<Vec<u8>>(path)?,
        None => vec![0; netlist.num_modules()],
    };

    let (status, totalcost) = match &args.hierarchy {
        Some(path) => {
            let maps: Vec<Vec<u32>> = read_json(path)?;
            info!(levels = maps.len(), "replaying hierarchy");
            partition(&netlist, &mut part, &config, ClusterMapCoarsener::new(maps))?
        }
        None => partition(&netlist, &mut part, &config, NoCoarsening)?,
    };

    let netlist_hash = canonical_hash(&netlist);
    let report = PartitionReport {
        legal: status == LegalCheck::AllSatisfied,
        status,
        totalcost,
        part,
        provenance: RunProvenance {
            netlist_hash: netlist_hash.clone(),
            config_hash: config.config_hash()?,
            seed: config.seed,
            tool_versions: BTreeMap::from([(
                "fmpart".to_string(),
                env!("CARGO_PKG_VERSION").to_string(),
            )]),
        },
        netlist_hash,
    };
    let json = serde_json::to_string_pretty(&report)?;
    match &args.out {
        Some(out) => fs::write(out, json).map_err(|err| FmError::io(&err, out))?,
        None => println!("{json}"),
    }
    Ok(())
}

fn partition<K: Coarsener>(
    netlist: &NetlistImpl,
    part: &mut [u8],
    config: &PartitionConfig,
    coarsener: K,
) -> Result<(LegalCheck, i64), FmError> {
    let mut partitioner = MultilevelPartitioner::new(config.clone(), coarsener)?;
    let status = partitioner.run(netlist, part)?;
    Ok((status, partitioner.totalcost()))
}

fn resolve_config(args: &PartitionArgs) -> Result<PartitionConfig, FmError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => PartitionConfig::default(),
    };
    if let Some(parts) = args.parts {
        config.num_parts = parts;
    }
    if let Some(tol) = args.tol {
        config.balance_tol = tol;
    }
    config.validate()?;
    Ok(config)
}

pub(crate) fn read_netlist(path: &Path) -> Result<NetlistImpl, FmError> {
    let raw = fs::read_to_string(path).map_err(|err| FmError::io(&err, path))?;
    netlist_from_json(&raw).map_err(|err| err.with_context("path", path.display()))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, FmError> {
    let raw = fs::read_to_string(path).map_err(|err| FmError::io(&err, path))?;
    serde_json::from_str(&raw).map_err(|err| {
        FmError::serde("deserialize-json", err.to_string()).with_context("path", path.display())
    })
}
