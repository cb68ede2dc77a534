//! Command-line interface definitions for portprobe.
//!
//! Uses `clap` derive macros for declarative argument parsing.

mod scan;

pub use scan::ScanCommand;

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Probe a host and report which TCP ports accept connections.
#[derive(Parser, Debug)]
#[command(name = "portprobe")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A TCP port availability probe", long_about = None)]
#[command(after_help = "Example: portprobe 192.168.1.1 -p 1-1024 -e 135,139 -t 16")]
pub struct Cli {
    /// Target IP address or hostname to scan
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Ports to scan: top100, top500, top1000, "-" for all, or e.g. "80", "21,22,80", "1-1024"
    /// [default: top100]
    #[arg(short, long, value_name = "SPEC")]
    pub ports: Option<String>,

    /// Ports to leave out, same syntax as --ports
    #[arg(short, long, value_name = "SPEC")]
    pub exclude: Option<String>,

    /// Skip host discovery and treat the target as online (also accepted as -Pn)
    #[arg(long = "no-ping", visible_alias = "Pn")]
    pub no_ping: bool,

    /// Print the status of every probed port
    #[arg(short, long)]
    pub verbose: bool,

    /// Number of concurrent workers [default: 4]
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Probe ports one at a time
    #[arg(long)]
    pub disable_multithreading: bool,

    /// Path to a settings file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Parse the process arguments, accepting nmap-style `-Pn`.
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }
}

/// Rewrite `-Pn` to `--no-ping`.
///
/// clap short flags are single characters, so `-Pn` would otherwise be read
/// as `-P -n`.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            if arg == "-Pn" {
                OsString::from("--no-ping")
            } else {
                arg
            }
        })
        .collect()
}
