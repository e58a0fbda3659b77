use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod replay;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode hex-encoded notification buffers and print the frame fields.
    Decode(DecodeArgs),
    /// Feed a capture file through a full timing pipeline.
    Replay(ReplayArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Replay(args) => replay::run(args),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Hex-encoded buffers (whitespace within an argument is ignored).
    #[arg(required = true)]
    pub buffers: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Capture file, or "-" for stdin. One notification per line:
    /// `[<offset_ms>] <hex>`. Offsets synthesize monotonic instants so lap
    /// deltas replay reproducibly; bare hex lines are stamped on arrival.
    pub input: PathBuf,
    /// Summary file path (atomically rewritten after every counted lap).
    #[arg(long, default_value = "laptimes.txt")]
    pub summary: PathBuf,
    /// Append-only event log path.
    #[arg(long, default_value = "laplogs.txt")]
    pub event_log: PathBuf,
    /// Rider name table, a JSON object of device id to display name.
    #[arg(long, value_name = "JSON")]
    pub riders: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build information.
    #[arg(long)]
    pub extended: bool,
}
