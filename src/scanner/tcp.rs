//! TCP connect prober.
//!
//! Performs a full TCP handshake using the operating system's socket API.
//! Does not require elevated privileges.

use crate::scanner::traits::{ProbeOutcome, ProbeStatus, Prober};
use crate::types::Port;
use async_trait::async_trait;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Fixed per-probe timeout.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// TCP connect prober for one target.
///
/// Each probe owns its socket. A successful stream is dropped before the
/// probe returns, and a timed-out connect future is dropped with its socket.
pub struct TcpConnectProber {
    target: IpAddr,
    timeout: Duration,
}

impl TcpConnectProber {
    pub fn new(target: IpAddr, timeout: Duration) -> Self {
        Self { target, timeout }
    }

    async fn attempt_connect(&self, addr: SocketAddr) -> ProbeStatus {
        match timeout(self.timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => {
                drop(stream);
                ProbeStatus::Open
            }
            Ok(Err(e)) => classify_error(&e),
            Err(_) => ProbeStatus::Filtered,
        }
    }
}

fn classify_error(e: &io::Error) -> ProbeStatus {
    match e.kind() {
        io::ErrorKind::ConnectionRefused => ProbeStatus::Closed,
        io::ErrorKind::TimedOut => ProbeStatus::Filtered,
        _ => ProbeStatus::Error(e.to_string()),
    }
}

#[async_trait]
impl Prober for TcpConnectProber {
    async fn probe(&self, port: Port) -> ProbeOutcome {
        let status = match port.to_tcp() {
            Some(port_num) => {
                self.attempt_connect(SocketAddr::new(self.target, port_num))
                    .await
            }
            None => ProbeStatus::Error(format!(
                "port {} is outside the valid range ({}-{})",
                port,
                Port::MIN,
                Port::MAX
            )),
        };

        ProbeOutcome::new(port, status)
    }

    fn target(&self) -> IpAddr {
        self.target
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use tokio::net::TcpListener;

    fn localhost_prober() -> TcpConnectProber {
        TcpConnectProber::new(IpAddr::V4(Ipv4Addr::LOCALHOST), Duration::from_millis(500))
    }

    #[test]
    fn test_prober_creation() {
        let prober = TcpConnectProber::new(IpAddr::V4(Ipv4Addr::LOCALHOST), PROBE_TIMEOUT);
        assert_eq!(prober.target(), IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(prober.timeout(), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_probe_open_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let outcome = localhost_prober().probe(Port::from(port)).await;
        assert_eq!(outcome.status, ProbeStatus::Open);
        assert_eq!(outcome.port, Port::from(port));
    }

    #[tokio::test]
    async fn test_probe_closed_port() {
        // Bind then release to get a port nothing listens on.
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().port()
        };

        let outcome = localhost_prober().probe(Port::from(port)).await;
        assert_eq!(outcome.status, ProbeStatus::Closed);
    }

    #[tokio::test]
    async fn test_probe_invalid_port_is_error() {
        let prober = localhost_prober();

        let outcome = prober.probe(Port::new(70000)).await;
        assert!(outcome.status.is_error());

        let outcome = prober.probe(Port::new(0)).await;
        assert!(outcome.status.is_error());
    }

    #[test]
    fn test_classify_error() {
        let refused = io::Error::from(io::ErrorKind::ConnectionRefused);
        assert_eq!(classify_error(&refused), ProbeStatus::Closed);

        let timed_out = io::Error::from(io::ErrorKind::TimedOut);
        assert_eq!(classify_error(&timed_out), ProbeStatus::Filtered);

        let other = io::Error::new(io::ErrorKind::Other, "network is unreachable");
        assert_eq!(
            classify_error(&other),
            ProbeStatus::Error("network is unreachable".to_string())
        );
    }
}
