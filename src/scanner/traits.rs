//! Prober and observer abstractions.
//!
//! `Prober` is the seam between the coordinator and the network, which lets
//! the coordinator be driven by simulated targets in tests. `ProbeObserver`
//! is the live side channel for per-port output.

use crate::types::Port;
use async_trait::async_trait;
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

/// Classification of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStatus {
    /// The connection was accepted.
    Open,
    /// The connection was actively refused.
    Closed,
    /// No answer before the timeout, typically a firewall dropping packets.
    Filtered,
    /// Transport failure unrelated to the port's state.
    Error(String),
}

impl ProbeStatus {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Filtered => write!(f, "filtered"),
            Self::Error(msg) => write!(f, "error: {}", msg),
        }
    }
}

/// Outcome of probing one port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub port: Port,
    pub status: ProbeStatus,
}

impl ProbeOutcome {
    pub fn new(port: Port, status: ProbeStatus) -> Self {
        Self { port, status }
    }

    pub fn is_open(&self) -> bool {
        self.status == ProbeStatus::Open
    }
}

/// A single-port connection prober bound to one target.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probe one port. Never fails; failures are classified in the outcome.
    async fn probe(&self, port: Port) -> ProbeOutcome;

    /// The address being probed.
    fn target(&self) -> IpAddr;

    /// Upper bound on a single probe.
    fn timeout(&self) -> Duration;
}

/// Receives every outcome as soon as it is known.
///
/// Called from worker tasks in concurrent mode, so outcomes arrive in
/// completion order.
pub trait ProbeObserver: Send + Sync {
    fn on_probe_outcome(&self, outcome: &ProbeOutcome);

    /// Called once after the last outcome.
    fn on_scan_complete(&self) {}
}

/// Observer that ignores everything.
pub struct NoopObserver;

impl ProbeObserver for NoopObserver {
    fn on_probe_outcome(&self, _outcome: &ProbeOutcome) {}
}
