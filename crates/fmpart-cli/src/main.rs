use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    hash::{self, HashArgs},
    partition::{self, PartitionArgs},
    version::{self, VersionArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "fmpart", about = "FM hypergraph partitioner")]
struct Cli {
    /// Log engine progress at debug level.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Partition a netlist and write a JSON report.
    Partition(PartitionArgs),
    /// Print the canonical hash of a netlist.
    Hash(HashArgs),
    /// Print version information.
    Version(VersionArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Command::Partition(args) => partition::run(&args),
        Command::Hash(args) => hash::run(&args),
        Command::Version(args) => version::run(&args),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
