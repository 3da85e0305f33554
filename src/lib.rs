//! Turn masscan reports into follow-on scan command lines.
//!
//! A report is parsed into a [`HostPortTable`], each host's open ports are
//! collapsed into range notation, and a [`CommandGenerator`] assembles either
//! one nmap command per host or a single axiom-scan batch command.

pub mod cli;
pub mod error;
pub mod generator;
pub mod output;
pub mod parser;
pub mod ports;
pub mod ranges;

pub use error::{Error, Result};
pub use generator::{BatchGenerator, CommandGenerator, PerHostGenerator};
pub use parser::{parse_file, InputFormat, MasscanParser, ReportParser};
pub use ports::{HostPortTable, HostPorts, PortSet, Protocol};
pub use ranges::{compress_ranges, expand_ranges};
