//! Plain text output formatting.
//!
//! Status lines carry a bracketed icon (`[*]`, `[+]`, `[-]`, `[!]`) whose
//! color is controlled by a [`Palette`] value.

use crate::scanner::ScanReport;
use crate::types::ScanTarget;
use console::Style;
use std::io::{self, Write};

/// Kind of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    /// Progress information, `[*]`.
    Info,
    /// Something was found, `[+]`.
    Success,
    /// Negative but expected result, `[-]`.
    Negative,
    /// Failure, `[!]`.
    Failure,
}

impl Icon {
    fn symbol(self) -> &'static str {
        match self {
            Self::Info => "[*]",
            Self::Success => "[+]",
            Self::Negative => "[-]",
            Self::Failure => "[!]",
        }
    }
}

/// Console styling settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    color: bool,
}

impl Default for Palette {
    fn default() -> Self {
        Self { color: true }
    }
}

impl Palette {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// A palette that never emits escape codes.
    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn is_colored(&self) -> bool {
        self.color
    }

    fn icon_style(&self, icon: Icon) -> Style {
        let style = match icon {
            Icon::Info => Style::new().blue(),
            Icon::Success => Style::new().green(),
            Icon::Negative => Style::new().yellow(),
            Icon::Failure => Style::new().red(),
        };
        style.force_styling(self.color)
    }

    fn bold(&self) -> Style {
        Style::new().bold().force_styling(self.color)
    }

    /// Format a status line: icon followed by the message.
    pub fn line(&self, icon: Icon, msg: &str) -> String {
        format!("{} {}", self.icon_style(icon).apply_to(icon.symbol()), msg)
    }
}

/// Print an informational line to stdout.
pub fn print_info(palette: &Palette, msg: &str) {
    println!("{}", palette.line(Icon::Info, msg));
}

/// Print a success line to stdout.
pub fn print_success(palette: &Palette, msg: &str) {
    println!("{}", palette.line(Icon::Success, msg));
}

/// Print a negative result to stdout.
pub fn print_warning(palette: &Palette, msg: &str) {
    println!("{}", palette.line(Icon::Negative, msg));
}

/// Print an error line to stderr.
pub fn print_error(palette: &Palette, msg: &str) {
    eprintln!("{}", palette.line(Icon::Failure, msg));
}

/// Print the final report to stdout.
pub fn print_report(target: &ScanTarget, report: &ScanReport, palette: &Palette) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, target, report, palette)
}

/// Write the final report.
///
/// Open ports are listed in ascending order; a host without open ports gets
/// a single distinct line instead of an empty table.
pub fn write_report<W: Write>(
    out: &mut W,
    target: &ScanTarget,
    report: &ScanReport,
    palette: &Palette,
) -> io::Result<()> {
    writeln!(out, "{}", palette.line(Icon::Info, "Reporting..."))?;

    if report.has_open_ports() {
        let bold = palette.bold();
        writeln!(out, "{:<8}{}", bold.apply_to("PORT"), bold.apply_to("STATE"))?;
        writeln!(out, "{:<8}{}", "====", "=====")?;
        let open = Style::new().green().force_styling(palette.is_colored());
        for port in &report.open_ports {
            writeln!(out, "{:<8}{}", port, open.apply_to("OPEN"))?;
        }
    } else {
        writeln!(
            out,
            "{}",
            palette.line(
                Icon::Negative,
                &format!("Host {} does not have any open port.", target)
            )
        )?;
    }

    writeln!(
        out,
        "{}",
        palette.line(
            Icon::Info,
            &format!(
                "{} ports scanned in {:.2}s ({} open, {} closed, {} filtered, {} errors)",
                report.ports_scanned,
                report.duration.as_secs_f64(),
                report.open_ports.len(),
                report.closed_ports,
                report.filtered_ports,
                report.errors.len()
            )
        )
    )?;
    writeln!(out, "{}", palette.line(Icon::Info, "Port scanning complete"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{ProbeOutcome, ProbeStatus, ScanMode};
    use crate::types::Port;
    use std::net::{IpAddr, Ipv4Addr};
    use std::time::Duration;

    fn target() -> ScanTarget {
        ScanTarget::new("10.0.0.5", IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)))
    }

    fn report(open: &[u32]) -> ScanReport {
        ScanReport {
            target: target().ip,
            mode: ScanMode::Sequential,
            ports_scanned: 5,
            open_ports: open.iter().copied().map(Port::new).collect(),
            closed_ports: 2,
            filtered_ports: 1,
            errors: vec![ProbeOutcome::new(
                Port::new(70000),
                ProbeStatus::Error("invalid port".into()),
            )],
            duration: Duration::from_millis(1500),
        }
    }

    fn render(report: &ScanReport) -> String {
        let mut buf = Vec::new();
        write_report(&mut buf, &target(), report, &Palette::plain()).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_plain_palette_line() {
        let palette = Palette::plain();
        assert_eq!(palette.line(Icon::Info, "hello"), "[*] hello");
        assert_eq!(palette.line(Icon::Success, "up"), "[+] up");
        assert_eq!(palette.line(Icon::Negative, "down"), "[-] down");
        assert_eq!(palette.line(Icon::Failure, "boom"), "[!] boom");
    }

    #[test]
    fn test_colored_palette_adds_escapes() {
        let line = Palette::new(true).line(Icon::Success, "up");
        assert!(line.contains("\u{1b}["));
        assert!(line.ends_with("up"));
    }

    #[test]
    fn test_report_lists_open_ports_in_order() {
        let output = render(&report(&[22, 80, 443]));
        let rows: Vec<&str> = output.lines().filter(|l| l.ends_with("OPEN")).collect();
        assert_eq!(rows, vec!["22      OPEN", "80      OPEN", "443     OPEN"]);
        assert!(output.contains("PORT    STATE"));
        assert!(!output.contains("does not have any open port"));
    }

    #[test]
    fn test_report_without_open_ports() {
        let output = render(&report(&[]));
        assert!(output.contains("[-] Host 10.0.0.5 does not have any open port."));
        assert!(!output.contains("PORT"));
    }

    #[test]
    fn test_report_summary() {
        let output = render(&report(&[80]));
        assert!(output.contains("5 ports scanned in 1.50s (1 open, 2 closed, 1 filtered, 1 errors)"));
        assert!(output.trim_end().ends_with("[*] Port scanning complete"));
    }
}
