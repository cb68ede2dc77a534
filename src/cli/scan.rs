//! Scan command implementation.
//!
//! Resolves the target, resolves the working port set, checks the host is
//! up unless discovery is skipped, runs the scan and prints the report.

use crate::cli::Cli;
use crate::config::Settings;
use crate::discovery::HostDiscovery;
use crate::error::{ScanError, ScanResult};
use crate::output::{self, ConsoleObserver, Palette};
use crate::presets::Preset;
use crate::scanner::{
    run_scan, ScanJobConfig, ScanMode, ScanReport, TcpConnectProber, PROBE_TIMEOUT,
};
use crate::types::{PortSet, ScanTarget};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// A fully configured scan request.
#[derive(Debug, Clone)]
pub struct ScanCommand {
    pub target: String,
    pub ports: String,
    pub exclude: String,
    pub skip_discovery: bool,
    pub verbose: bool,
    pub mode: ScanMode,
    pub palette: Palette,
    timeout: Duration,
}

impl ScanCommand {
    /// Build a scan request from arguments, filling gaps from settings.
    pub fn from_cli(cli: &Cli, settings: &Settings) -> Self {
        let mode = if cli.disable_multithreading {
            ScanMode::Sequential
        } else {
            ScanMode::Concurrent {
                workers: cli.threads.unwrap_or(settings.default_threads),
            }
        };

        Self {
            target: cli.target.clone(),
            ports: cli
                .ports
                .clone()
                .unwrap_or_else(|| settings.default_ports.clone()),
            exclude: cli.exclude.clone().unwrap_or_default(),
            skip_discovery: cli.no_ping,
            verbose: cli.verbose,
            mode,
            palette: Palette::new(settings.color && !cli.no_color),
            timeout: PROBE_TIMEOUT,
        }
    }

    /// Override the per-probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve the working set: ports minus exclusions.
    pub fn working_set(&self) -> ScanResult<PortSet> {
        let ports = PortSet::resolve(&self.ports)?;
        let exclude = PortSet::resolve_exclusion(&self.exclude)?;
        Ok(ports.without(&exclude))
    }

    /// Execute the scan command.
    ///
    /// Resolution and port specification failures are returned before any
    /// probe is sent. An unreachable host yields [`ScanError::HostUnreachable`].
    pub async fn execute<D>(&self, discovery: &D) -> ScanResult<ScanReport>
    where
        D: HostDiscovery + ?Sized,
    {
        let palette = &self.palette;

        let target = ScanTarget::resolve(&self.target).await?;
        output::print_info(palette, &format!("Target: {}", target));

        let ports = self.working_set()?;
        match Preset::from_name(&self.ports) {
            Some(preset) => output::print_info(palette, &format!("Scanning the {}", preset)),
            None => output::print_info(palette, &format!("Scanning {} ports", ports.len())),
        }

        if self.skip_discovery {
            output::print_info(
                palette,
                &format!(
                    "Skipping host discovery (-Pn), treating {} as online",
                    target.ip
                ),
            );
        } else {
            output::print_info(palette, &format!("Checking if {} is online...", target.ip));
            if !discovery.is_reachable(target.ip).await {
                return Err(ScanError::HostUnreachable(target.ip));
            }
            output::print_success(palette, &format!("Host {} is online.", target.ip));
        }

        let prober = Arc::new(TcpConnectProber::new(target.ip, self.timeout));
        let observer = Arc::new(ConsoleObserver::new(*palette, self.verbose, ports.len()));
        let job = ScanJobConfig::new(ports).with_mode(self.mode);
        debug!(
            mode = %self.mode,
            timeout_ms = self.timeout.as_millis() as u64,
            "dispatching probes"
        );

        let report = run_scan(prober, job, observer).await?;
        output::print_report(&target, &report, palette)?;

        Ok(report)
    }
}
