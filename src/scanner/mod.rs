//! Scan coordinator.
//!
//! Runs a prober over a working port set, either one port at a time or with
//! a fixed number of worker tasks, and aggregates the outcomes into a
//! [`ScanReport`].
//!
//! In concurrent mode the workers pull ports from a shared queue and push
//! outcomes into a channel drained by a single aggregator, so the number of
//! probes in flight never exceeds the worker count.

pub mod tcp;
pub mod traits;

use crate::error::{ScanError, ScanResult};
use crate::types::{Port, PortSet};
use futures::future::try_join_all;
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, trace};

pub use tcp::{TcpConnectProber, PROBE_TIMEOUT};
pub use traits::{NoopObserver, ProbeObserver, ProbeOutcome, ProbeStatus, Prober};

/// Default number of concurrent workers.
pub const DEFAULT_WORKERS: usize = 4;

/// How probes are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// One probe at a time, in working-set order.
    Sequential,
    /// Up to `workers` probes in flight.
    Concurrent { workers: usize },
}

impl Default for ScanMode {
    fn default() -> Self {
        Self::Concurrent {
            workers: DEFAULT_WORKERS,
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Concurrent { workers } => write!(f, "concurrent ({} workers)", workers),
        }
    }
}

/// What to scan and how.
#[derive(Debug, Clone)]
pub struct ScanJobConfig {
    pub ports: PortSet,
    pub mode: ScanMode,
}

impl ScanJobConfig {
    pub fn new(ports: PortSet) -> Self {
        Self {
            ports,
            mode: ScanMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_workers(self, workers: usize) -> Self {
        self.with_mode(ScanMode::Concurrent { workers })
    }

    pub fn sequential(self) -> Self {
        self.with_mode(ScanMode::Sequential)
    }

    fn validate(&self) -> ScanResult<()> {
        if let ScanMode::Concurrent { workers: 0 } = self.mode {
            return Err(ScanError::InvalidConfig(
                "worker count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Final result of a scan.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub target: IpAddr,
    pub mode: ScanMode,
    pub ports_scanned: usize,
    /// Open ports, strictly ascending.
    pub open_ports: Vec<Port>,
    pub closed_ports: usize,
    pub filtered_ports: usize,
    /// Outcomes that failed at the transport level, ascending by port.
    pub errors: Vec<ProbeOutcome>,
    pub duration: Duration,
}

impl ScanReport {
    pub fn has_open_ports(&self) -> bool {
        !self.open_ports.is_empty()
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration.as_millis() as u64
    }
}

/// Collects outcomes as they arrive.
#[derive(Default)]
struct Aggregator {
    open: Vec<Port>,
    closed: usize,
    filtered: usize,
    errors: Vec<ProbeOutcome>,
    total: usize,
}

impl Aggregator {
    fn record(&mut self, outcome: ProbeOutcome) {
        debug!(port = %outcome.port, status = %outcome.status, "probe finished");
        self.total += 1;
        match outcome.status {
            ProbeStatus::Open => self.open.push(outcome.port),
            ProbeStatus::Closed => self.closed += 1,
            ProbeStatus::Filtered => self.filtered += 1,
            ProbeStatus::Error(_) => self.errors.push(outcome),
        }
    }

    fn finish(mut self, target: IpAddr, mode: ScanMode, duration: Duration) -> ScanReport {
        self.open.sort_unstable();
        self.open.dedup();
        self.errors.sort_by_key(|o| o.port);

        ScanReport {
            target,
            mode,
            ports_scanned: self.total,
            open_ports: self.open,
            closed_ports: self.closed,
            filtered_ports: self.filtered,
            errors: self.errors,
            duration,
        }
    }
}

/// Probe every port of the job and wait for all outcomes.
///
/// `observer` sees each outcome as it completes. The returned report does
/// not depend on the observer.
pub async fn run_scan<P>(
    prober: Arc<P>,
    job: ScanJobConfig,
    observer: Arc<dyn ProbeObserver>,
) -> ScanResult<ScanReport>
where
    P: Prober + 'static,
{
    job.validate()?;

    let target = prober.target();
    let mode = job.mode;
    let ports = job.ports.into_vec();
    info!(%target, ports = ports.len(), %mode, "starting scan");

    let mut aggregator = Aggregator::default();
    let start_time = Instant::now();

    match mode {
        ScanMode::Sequential => {
            scan_sequential(&*prober, ports, &*observer, &mut aggregator).await
        }
        ScanMode::Concurrent { workers } => {
            scan_concurrent(prober, ports, workers, Arc::clone(&observer), &mut aggregator)
                .await?
        }
    }

    let duration = start_time.elapsed();
    observer.on_scan_complete();

    let report = aggregator.finish(target, mode, duration);
    info!(
        %target,
        open = report.open_ports.len(),
        errors = report.errors.len(),
        duration_ms = report.duration_ms(),
        "scan complete"
    );
    Ok(report)
}

async fn scan_sequential<P>(
    prober: &P,
    ports: Vec<Port>,
    observer: &dyn ProbeObserver,
    aggregator: &mut Aggregator,
) where
    P: Prober + ?Sized,
{
    for port in ports {
        let outcome = prober.probe(port).await;
        observer.on_probe_outcome(&outcome);
        aggregator.record(outcome);
    }
}

async fn scan_concurrent<P>(
    prober: Arc<P>,
    ports: Vec<Port>,
    workers: usize,
    observer: Arc<dyn ProbeObserver>,
    aggregator: &mut Aggregator,
) -> ScanResult<()>
where
    P: Prober + 'static,
{
    let workers = workers.min(ports.len());
    let queue = Arc::new(Mutex::new(ports.into_iter()));
    let (tx, mut rx) = mpsc::unbounded_channel();

    let handles: Vec<_> = (0..workers)
        .map(|id| {
            let queue = Arc::clone(&queue);
            let prober = Arc::clone(&prober);
            let observer = Arc::clone(&observer);
            let tx = tx.clone();

            tokio::spawn(async move {
                loop {
                    let next = queue.lock().await.next();
                    let Some(port) = next else { break };

                    let outcome = prober.probe(port).await;
                    observer.on_probe_outcome(&outcome);
                    if tx.send(outcome).is_err() {
                        break;
                    }
                }
                trace!(worker = id, "worker drained queue");
            })
        })
        .collect();

    // The channel closes once every worker has dropped its sender.
    drop(tx);
    while let Some(outcome) = rx.recv().await {
        aggregator.record(outcome);
    }

    try_join_all(handles)
        .await
        .map_err(|e| ScanError::Worker(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::net::Ipv4Addr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;

    /// Simulated target: ports map to fixed statuses, everything else is closed.
    struct SimulatedProber {
        statuses: HashMap<u32, ProbeStatus>,
        delay: Duration,
        active: AtomicUsize,
        max_active: AtomicUsize,
    }

    impl SimulatedProber {
        fn new(statuses: &[(u32, ProbeStatus)]) -> Self {
            Self {
                statuses: statuses.iter().cloned().collect(),
                delay: Duration::from_millis(5),
                active: AtomicUsize::new(0),
                max_active: AtomicUsize::new(0),
            }
        }

        /// Port 80 accepts, 81 refuses, 82 never answers.
        fn web_host() -> Self {
            Self::new(&[
                (80, ProbeStatus::Open),
                (81, ProbeStatus::Closed),
                (82, ProbeStatus::Filtered),
            ])
        }
    }

    #[async_trait]
    impl Prober for SimulatedProber {
        async fn probe(&self, port: Port) -> ProbeOutcome {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_active.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.active.fetch_sub(1, Ordering::SeqCst);

            let status = self
                .statuses
                .get(&port.as_u32())
                .cloned()
                .unwrap_or(ProbeStatus::Closed);
            ProbeOutcome::new(port, status)
        }

        fn target(&self) -> IpAddr {
            IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1))
        }

        fn timeout(&self) -> Duration {
            PROBE_TIMEOUT
        }
    }

    /// Records every outcome it sees.
    #[derive(Default)]
    struct RecordingObserver {
        seen: StdMutex<Vec<ProbeOutcome>>,
        completed: AtomicUsize,
    }

    impl ProbeObserver for RecordingObserver {
        fn on_probe_outcome(&self, outcome: &ProbeOutcome) {
            self.seen.lock().unwrap().push(outcome.clone());
        }

        fn on_scan_complete(&self) {
            self.completed.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn ports(spec: &str) -> PortSet {
        PortSet::resolve(spec).unwrap()
    }

    fn open_numbers(report: &ScanReport) -> Vec<u32> {
        report.open_ports.iter().map(|p| p.as_u32()).collect()
    }

    async fn scan(prober: SimulatedProber, job: ScanJobConfig) -> ScanReport {
        run_scan(Arc::new(prober), job, Arc::new(NoopObserver))
            .await
            .unwrap()
    }

    #[test]
    fn test_scan_mode_display() {
        assert_eq!(ScanMode::Sequential.to_string(), "sequential");
        assert_eq!(ScanMode::default().to_string(), "concurrent (4 workers)");
    }

    #[tokio::test]
    async fn test_sequential_classification() {
        let job = ScanJobConfig::new(ports("80,81,82")).sequential();
        let report = scan(SimulatedProber::web_host(), job).await;

        assert_eq!(open_numbers(&report), vec![80]);
        assert_eq!(report.closed_ports, 1);
        assert_eq!(report.filtered_ports, 1);
        assert_eq!(report.ports_scanned, 3);
        assert_eq!(report.mode, ScanMode::Sequential);
    }

    #[tokio::test]
    async fn test_concurrent_classification() {
        let job = ScanJobConfig::new(ports("80,81,82")).with_workers(4);
        let report = scan(SimulatedProber::web_host(), job).await;

        assert_eq!(open_numbers(&report), vec![80]);
        assert_eq!(report.closed_ports, 1);
        assert_eq!(report.filtered_ports, 1);
    }

    #[tokio::test]
    async fn test_single_worker_matches_sequential() {
        let statuses: Vec<(u32, ProbeStatus)> = [3, 17, 22, 40]
            .into_iter()
            .map(|p| (p, ProbeStatus::Open))
            .collect();

        let sequential = scan(
            SimulatedProber::new(&statuses),
            ScanJobConfig::new(ports("1-50")).sequential(),
        )
        .await;
        let concurrent = scan(
            SimulatedProber::new(&statuses),
            ScanJobConfig::new(ports("1-50")).with_workers(1),
        )
        .await;

        assert_eq!(sequential.open_ports, concurrent.open_ports);
        assert_eq!(open_numbers(&concurrent), vec![3, 17, 22, 40]);
    }

    #[tokio::test]
    async fn test_open_ports_sorted_without_duplicates() {
        let prober = SimulatedProber::new(&[
            (9000, ProbeStatus::Open),
            (22, ProbeStatus::Open),
            (443, ProbeStatus::Open),
        ]);
        let job = ScanJobConfig::new(ports("9000,443,22,443,9000,22")).with_workers(3);
        let report = scan(prober, job).await;

        assert_eq!(open_numbers(&report), vec![22, 443, 9000]);
        assert_eq!(report.ports_scanned, 3);
    }

    #[tokio::test]
    async fn test_worker_budget_is_respected() {
        let prober = Arc::new(SimulatedProber::new(&[]));
        let job = ScanJobConfig::new(ports("1-40")).with_workers(3);

        run_scan(Arc::clone(&prober), job, Arc::new(NoopObserver))
            .await
            .unwrap();

        let max = prober.max_active.load(Ordering::SeqCst);
        assert!(max <= 3, "saw {} probes in flight", max);
        assert!(max >= 1);
    }

    #[tokio::test]
    async fn test_sequential_runs_one_at_a_time() {
        let prober = Arc::new(SimulatedProber::new(&[]));
        let job = ScanJobConfig::new(ports("1-10")).sequential();

        run_scan(Arc::clone(&prober), job, Arc::new(NoopObserver))
            .await
            .unwrap();

        assert_eq!(prober.max_active.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transport_error_does_not_abort() {
        for job in [
            ScanJobConfig::new(ports("10-13")).sequential(),
            ScanJobConfig::new(ports("10-13")).with_workers(2),
        ] {
            let prober = SimulatedProber::new(&[
                (10, ProbeStatus::Open),
                (11, ProbeStatus::Error("network is unreachable".into())),
                (12, ProbeStatus::Open),
            ]);
            let report = scan(prober, job).await;

            assert_eq!(open_numbers(&report), vec![10, 12]);
            assert_eq!(report.closed_ports, 1);
            assert_eq!(report.errors.len(), 1);
            assert_eq!(report.errors[0].port, Port::new(11));
            assert_eq!(report.ports_scanned, 4);
        }
    }

    #[tokio::test]
    async fn test_every_port_observed_once() {
        let observer = Arc::new(RecordingObserver::default());
        let job = ScanJobConfig::new(ports("1-25")).with_workers(6);

        let report = run_scan(
            Arc::new(SimulatedProber::web_host()),
            job,
            Arc::clone(&observer) as Arc<dyn ProbeObserver>,
        )
        .await
        .unwrap();

        let mut seen: Vec<u32> = observer
            .seen
            .lock()
            .unwrap()
            .iter()
            .map(|o| o.port.as_u32())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (1..=25).collect::<Vec<_>>());
        assert_eq!(report.ports_scanned, 25);
        assert_eq!(observer.completed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_sequential_observer_keeps_order() {
        let observer = Arc::new(RecordingObserver::default());
        let job = ScanJobConfig::new(ports("5,3,9,1")).sequential();

        run_scan(
            Arc::new(SimulatedProber::new(&[])),
            job,
            Arc::clone(&observer) as Arc<dyn ProbeObserver>,
        )
        .await
        .unwrap();

        let seen: Vec<u32> = observer
            .seen
            .lock()
            .unwrap()
            .iter()
            .map(|o| o.port.as_u32())
            .collect();
        assert_eq!(seen, vec![5, 3, 9, 1]);
    }

    #[tokio::test]
    async fn test_zero_workers_rejected() {
        let job = ScanJobConfig::new(ports("80")).with_workers(0);
        let result = run_scan(
            Arc::new(SimulatedProber::web_host()),
            job,
            Arc::new(NoopObserver),
        )
        .await;

        assert!(matches!(result, Err(ScanError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_empty_working_set() {
        let report = scan(
            SimulatedProber::web_host(),
            ScanJobConfig::new(PortSet::new()),
        )
        .await;

        assert_eq!(report.ports_scanned, 0);
        assert!(!report.has_open_ports());
    }

    #[tokio::test]
    async fn test_more_workers_than_ports() {
        let job = ScanJobConfig::new(ports("80,81")).with_workers(64);
        let report = scan(SimulatedProber::web_host(), job).await;
        assert_eq!(open_numbers(&report), vec![80]);
    }
}
