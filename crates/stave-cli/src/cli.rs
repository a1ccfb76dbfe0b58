use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "stave",
    about = "Stave: diff and merge versioned project documents",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Engine configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the deltas that turn one snapshot into another
    Diff(DiffArgs),
    /// Merge a target snapshot or diff onto a state snapshot
    Merge(MergeArgs),
    /// List the deltas of a snapshot
    Show(ShowArgs),
    /// Print the content digest of a merge
    Digest(DigestArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// Snapshot of the prior state
    pub state: PathBuf,
    /// Snapshot holding the changes
    pub changes: PathBuf,
}

#[derive(Args)]
pub struct MergeArgs {
    /// Snapshot of the prior state
    pub state: PathBuf,
    /// Snapshot or diff to merge onto the state
    pub target: PathBuf,
    /// Write the merged snapshot here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ShowArgs {
    pub snapshot: PathBuf,
}

#[derive(Args)]
pub struct DigestArgs {
    pub state: PathBuf,
    pub target: PathBuf,
}
