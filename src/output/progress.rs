//! Live per-port console output.
//!
//! In verbose mode every outcome gets a status line. Otherwise a progress bar
//! tracks completion. Transport errors are always printed.

use super::plain::{Icon, Palette};
use crate::scanner::{ProbeObserver, ProbeOutcome, ProbeStatus};
use indicatif::{ProgressBar, ProgressStyle};

/// Console observer for a running scan.
pub struct ConsoleObserver {
    palette: Palette,
    verbose: bool,
    progress: Option<ProgressBar>,
}

impl ConsoleObserver {
    /// Create an observer for a scan of `total` ports.
    pub fn new(palette: Palette, verbose: bool, total: usize) -> Self {
        let progress = if verbose {
            None
        } else {
            let pb = ProgressBar::new(total as u64);
            let style = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .map(|s| s.progress_chars("=>-"))
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            pb.set_style(style);
            Some(pb)
        };

        Self {
            palette,
            verbose,
            progress,
        }
    }

    /// The line to print for an outcome, if any.
    pub fn format_outcome(&self, outcome: &ProbeOutcome) -> Option<String> {
        let port = outcome.port;
        let line = match &outcome.status {
            ProbeStatus::Error(msg) => self.palette.line(
                Icon::Failure,
                &format!("Port {}: socket failed: {}", port, msg),
            ),
            _ if !self.verbose => return None,
            ProbeStatus::Open => self
                .palette
                .line(Icon::Success, &format!("Port {} is OPEN", port)),
            ProbeStatus::Closed => self.palette.line(
                Icon::Negative,
                &format!("Port {} is CLOSED (connection refused)", port),
            ),
            ProbeStatus::Filtered => self.palette.line(
                Icon::Negative,
                &format!("Port {} is FILTERED/CLOSED (timeout)", port),
            ),
        };
        Some(line)
    }
}

impl ProbeObserver for ConsoleObserver {
    fn on_probe_outcome(&self, outcome: &ProbeOutcome) {
        let line = self.format_outcome(outcome);

        match &self.progress {
            Some(pb) => {
                pb.inc(1);
                if outcome.is_open() {
                    pb.set_message(format!("found open port {}", outcome.port));
                }
                if let Some(line) = line {
                    pb.println(line);
                }
            }
            None => {
                if let Some(line) = line {
                    println!("{}", line);
                }
            }
        }
    }

    fn on_scan_complete(&self) {
        if let Some(pb) = &self.progress {
            pb.finish_and_clear();
        }
    }
}
