//! Core type definitions: ports, port sets and scan targets.

mod port;
mod target;

pub use port::{Port, PortSet};
pub use target::ScanTarget;
