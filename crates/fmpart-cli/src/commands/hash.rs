use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use fmpart_graph::canonical_hash;

use super::partition::read_netlist;

#[derive(Args, Debug)]
pub struct HashArgs {
    /// JSON netlist to hash.
    #[arg(long)]
    pub netlist: PathBuf,
}

pub fn run(args: &HashArgs) -> Result<(), Box<dyn Error>> {
    let netlist = read_netlist(&args.netlist)?;
    println!("{}", canonical_hash(&netlist));
    Ok(())
}
