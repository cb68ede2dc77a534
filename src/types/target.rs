//! Scan target resolution.
//!
//! A target is given as an IP literal or a hostname. Hostnames go through
//! the system resolver configuration (hosts file included), falling back to
//! the resolver defaults when the system configuration cannot be read.

use crate::error::{ScanError, ScanResult};
use std::fmt;
use std::net::IpAddr;
use tracing::debug;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// A scan target that has been resolved to an IP address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScanTarget {
    /// The original input (hostname or IP string).
    pub original: String,
    /// The resolved IP address.
    pub ip: IpAddr,
}

impl ScanTarget {
    /// Create a new scan target.
    pub fn new(original: impl Into<String>, ip: IpAddr) -> Self {
        Self {
            original: original.into(),
            ip,
        }
    }

    /// Resolve a hostname or IP literal.
    ///
    /// IPv4 addresses are preferred when a name has both families.
    pub async fn resolve(target: &str) -> ScanResult<Self> {
        let target = target.trim();

        if let Ok(ip) = target.parse::<IpAddr>() {
            return Ok(Self::new(target, ip));
        }

        if target.is_empty() {
            return Err(ScanError::HostResolution {
                target: target.to_string(),
                reason: "empty hostname".to_string(),
            });
        }

        let resolver = TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|e| {
            debug!(error = %e, "system resolver configuration unavailable, using defaults");
            TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
        });

        let response = resolver
            .lookup_ip(target)
            .await
            .map_err(|e| ScanError::HostResolution {
                target: target.to_string(),
                reason: e.to_string(),
            })?;

        let ips: Vec<IpAddr> = response.iter().collect();
        let ip = pick_address(&ips).ok_or_else(|| ScanError::HostResolution {
            target: target.to_string(),
            reason: "no addresses found".to_string(),
        })?;

        debug!(%target, %ip, candidates = ips.len(), "resolved target");
        Ok(Self::new(target, ip))
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.original == self.ip.to_string() {
            write!(f, "{}", self.ip)
        } else {
            write!(f, "{} ({})", self.original, self.ip)
        }
    }
}

fn pick_address(ips: &[IpAddr]) -> Option<IpAddr> {
    ips.iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| ips.first())
        .copied()
}
