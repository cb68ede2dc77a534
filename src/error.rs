//! Error types for portprobe.
//!
//! Uses `thiserror` for ergonomic error definitions. Per-port refusals and
//! timeouts are not errors; they are recorded as [`ProbeStatus`] values.
//!
//! [`ProbeStatus`]: crate::scanner::ProbeStatus

use std::net::IpAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for a scan run.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("could not resolve hostname '{target}': {reason}")]
    HostResolution { target: String, reason: String },

    #[error("invalid port format: {0}")]
    InvalidPortFormat(String),

    #[error("host {0} seems to be down or is not replying to ICMP echo")]
    HostUnreachable(IpAddr),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("scan worker failed: {0}")]
    Worker(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// Whether this error should abort the process with a failure status.
    ///
    /// An unreachable host is a deliberate early stop, not a crash.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::HostUnreachable(_))
    }
}

/// Errors raised while loading the settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine a configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings file: {0}")]
    InvalidFormat(String),
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_unreachable_is_not_fatal() {
        let err = ScanError::HostUnreachable(IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert!(!err.is_fatal());
        assert!(ScanError::InvalidPortFormat("abc".into()).is_fatal());
    }

    #[test]
    fn test_error_messages() {
        let err = ScanError::HostResolution {
            target: "nope.invalid".into(),
            reason: "no record".into(),
        };
        assert_eq!(
            err.to_string(),
            "could not resolve hostname 'nope.invalid': no record"
        );
    }
}
