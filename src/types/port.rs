//! Port numbers and port set resolution.
//!
//! `Port` wraps the number exactly as the user wrote it. Parsing does not
//! bound it to 1-65535; a number that cannot name a TCP port is reported by
//! the prober as an error outcome for that port.
//!
//! `PortSet` is the ordered, de-duplicated sequence produced from a port
//! specification string.

use crate::error::{ScanError, ScanResult};
use crate::presets::Preset;
use std::collections::HashSet;
use std::fmt;

/// A port number as requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Port(u32);

impl Port {
    /// Lowest port a TCP connection can target.
    pub const MIN: u32 = 1;
    /// Highest port a TCP connection can target.
    pub const MAX: u32 = 65535;

    #[inline]
    pub const fn new(port: u32) -> Self {
        Self(port)
    }

    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// The port as a TCP port number, or `None` when it is outside 1-65535.
    #[inline]
    pub fn to_tcp(self) -> Option<u16> {
        if self.is_valid() {
            u16::try_from(self.0).ok()
        } else {
            None
        }
    }

    /// Check whether this port can be targeted by a TCP connection.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 >= Self::MIN && self.0 <= Self::MAX
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u16> for Port {
    fn from(port: u16) -> Self {
        Self(u32::from(port))
    }
}

/// An ordered sequence of distinct ports.
///
/// Order is the order the ports were first named in; duplicates are dropped
/// so each port is probed once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortSet {
    ports: Vec<Port>,
}

impl PortSet {
    /// Create an empty port set.
    pub const fn new() -> Self {
        Self { ports: Vec::new() }
    }

    /// Build a set from ports in order, keeping the first occurrence of each.
    pub fn from_ports(ports: impl IntoIterator<Item = Port>) -> Self {
        let mut seen = HashSet::new();
        let ports = ports.into_iter().filter(|p| seen.insert(*p)).collect();
        Self { ports }
    }

    /// Resolve a port specification.
    ///
    /// Accepts a preset name (`top100`, `top500`, `top1000`), the full-range
    /// marker `-`, a single port (`80`), a comma list (`21,22,80`), an
    /// inclusive range (`1-1024`), or a comma list mixing ports and ranges.
    ///
    /// Any malformed token fails the whole specification.
    pub fn resolve(spec: &str) -> ScanResult<Self> {
        if let Some(preset) = Preset::from_name(spec) {
            return Ok(preset.ports());
        }
        parse_list(spec).map(Self::from_ports)
    }

    /// Resolve an exclusion specification. An empty string excludes nothing.
    pub fn resolve_exclusion(spec: &str) -> ScanResult<Self> {
        if spec.trim().is_empty() {
            return Ok(Self::new());
        }
        Self::resolve(spec)
    }

    /// Remove every port present in `exclude`, keeping the remaining order.
    pub fn without(mut self, exclude: &PortSet) -> Self {
        if exclude.is_empty() {
            return self;
        }
        let excluded: HashSet<Port> = exclude.iter().copied().collect();
        self.ports.retain(|p| !excluded.contains(p));
        self
    }

    /// Keep only the first `len` ports.
    pub fn truncate(&mut self, len: usize) {
        self.ports.truncate(len);
    }

    pub fn contains(&self, port: &Port) -> bool {
        self.ports.contains(port)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Port> {
        self.ports.iter()
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    pub fn as_slice(&self) -> &[Port] {
        &self.ports
    }

    pub fn into_vec(self) -> Vec<Port> {
        self.ports
    }
}

impl IntoIterator for PortSet {
    type Item = Port;
    type IntoIter = std::vec::IntoIter<Port>;

    fn into_iter(self) -> Self::IntoIter {
        self.ports.into_iter()
    }
}

/// Parse a comma list whose items are single ports or `a-b` ranges.
fn parse_list(spec: &str) -> ScanResult<Vec<Port>> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(ScanError::InvalidPortFormat(
            "empty port specification".to_string(),
        ));
    }

    let mut ports = Vec::new();
    for part in spec.split(',') {
        let part = part.trim();
        match part.split_once('-') {
            Some((start, end)) => {
                let start = parse_number(start, part)?;
                let end = parse_number(end, part)?;
                if start > end {
                    return Err(ScanError::InvalidPortFormat(format!(
                        "range start {} is greater than end {}",
                        start, end
                    )));
                }
                ports.extend((start..=end).map(Port::new));
            }
            None => ports.push(Port::new(parse_number(part, part)?)),
        }
    }

    Ok(ports)
}

fn parse_number(token: &str, part: &str) -> ScanResult<u32> {
    token
        .trim()
        .parse()
        .map_err(|_| ScanError::InvalidPortFormat(format!("'{}'", part)))
}
