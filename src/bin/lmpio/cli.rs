use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lmpio",
    about = "Inspect, cache and convert LAMMPS custom dump and xyz trajectories",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug); LMPIO_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress output (for scripting)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print a summary of a trajectory
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Rebuild the binary sidecar cache of a trajectory
    Cache(CacheArgs),

    /// Rewrite a trajectory, optionally as xyz
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),
}

#[derive(Args)]
pub struct InfoArgs {
    /// Trajectory file (.xyz for xyz, anything else is a custom dump)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Parse the text even if an up-to-date cache exists
    #[arg(long)]
    pub no_cache: bool,
}

#[derive(Args)]
pub struct CacheArgs {
    /// Trajectory file (.xyz for xyz, anything else is a custom dump)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Keep custom rows in file order instead of sorting by id
    #[arg(long)]
    pub no_sort: bool,
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Input trajectory
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file; a .xyz name selects the xyz writer
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Keep custom rows in file order instead of sorting by id
    #[arg(long)]
    pub no_sort: bool,

    /// Column holding the atom type when writing xyz from a custom dump
    #[arg(long, value_name = "COLUMN", default_value = "type")]
    pub type_column: String,
}

pub fn parse() -> Cli {
    Cli::parse()
}
