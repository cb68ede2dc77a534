//! # portprobe - TCP Port Availability Probe
//!
//! Resolves a target, optionally checks that it answers ICMP echo, then
//! tries a TCP connection to each requested port and reports which ones
//! accept.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portprobe::scanner::{run_scan, NoopObserver, ScanJobConfig, TcpConnectProber, PROBE_TIMEOUT};
//! use portprobe::types::PortSet;
//! use std::net::IpAddr;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let target: IpAddr = "192.168.1.1".parse().unwrap();
//!     let prober = Arc::new(TcpConnectProber::new(target, PROBE_TIMEOUT));
//!     let job = ScanJobConfig::new(PortSet::resolve("top100").unwrap()).with_workers(8);
//!
//!     let report = run_scan(prober, job, Arc::new(NoopObserver)).await.unwrap();
//!     for port in &report.open_ports {
//!         println!("{} open", port);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - ports, port sets and target resolution
//! - [`presets`] - named port lists
//! - [`scanner`] - the prober and the scan coordinator
//! - [`discovery`] - host reachability checks
//! - [`output`] - console output
//! - [`config`] - settings file
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod output;
pub mod presets;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use error::{ConfigError, ScanError};
pub use scanner::{ProbeOutcome, ProbeStatus, Prober, ScanMode, ScanReport};
pub use types::{Port, PortSet, ScanTarget};
