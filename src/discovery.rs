//! Host discovery.
//!
//! Checks whether a target answers before its ports are scanned. The
//! default implementation sends a single ICMP echo through the platform
//! `ping` utility, so no raw socket privileges are needed.

use async_trait::async_trait;
use std::net::IpAddr;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// Reachability check for a single address.
#[async_trait]
pub trait HostDiscovery: Send + Sync {
    async fn is_reachable(&self, addr: IpAddr) -> bool;
}

/// Discovery through the system `ping` binary.
#[derive(Debug, Clone)]
pub struct PingDiscovery {
    program: String,
}

impl Default for PingDiscovery {
    fn default() -> Self {
        Self {
            program: "ping".to_string(),
        }
    }
}

impl PingDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different ping executable.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Arguments for a single echo request.
    fn args(addr: IpAddr) -> Vec<String> {
        let count_flag = if cfg!(windows) { "-n" } else { "-c" };
        vec![count_flag.to_string(), "1".to_string(), addr.to_string()]
    }
}

#[async_trait]
impl HostDiscovery for PingDiscovery {
    async fn is_reachable(&self, addr: IpAddr) -> bool {
        let status = Command::new(&self.program)
            .args(Self::args(addr))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await;

        match status {
            Ok(status) => {
                debug!(%addr, code = ?status.code(), "ping finished");
                status.success()
            }
            Err(e) => {
                warn!(%addr, program = %self.program, error = %e, "ping failed to run");
                false
            }
        }
    }
}
