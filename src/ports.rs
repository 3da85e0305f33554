use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;
use crate::ranges::compress_ranges;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Tcp,
    Udp,
}

impl Protocol {
    pub const ALL: [Protocol; 2] = [Protocol::Tcp, Protocol::Udp];

    /// Prefix nmap expects in front of this protocol's ports in `-p`.
    pub fn clause_prefix(self) -> &'static str {
        match self {
            Protocol::Tcp => "T",
            Protocol::Udp => "U",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => write!(f, "tcp"),
            Protocol::Udp => write!(f, "udp"),
        }
    }
}

impl FromStr for Protocol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tcp" => Ok(Protocol::Tcp),
            "udp" => Ok(Protocol::Udp),
            other => Err(Error::UnknownProtocol(other.to_string())),
        }
    }
}

/// Open ports for one protocol, deduplicated and iterated in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PortSet(BTreeSet<u16>);

impl PortSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the port was already present.
    pub fn insert(&mut self, port: u16) -> bool {
        self.0.insert(port)
    }

    pub fn contains(&self, port: u16) -> bool {
        self.0.contains(&port)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.0.iter().copied()
    }

    pub fn union_with(&mut self, other: &PortSet) {
        self.0.extend(other.iter());
    }

    /// Range notation for the set, or `None` when there is nothing to compress.
    pub fn to_ranges(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let ports: Vec<u16> = self.iter().collect();
        Some(compress_ranges(&ports))
    }
}

impl FromIterator<u16> for PortSet {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        PortSet(iter.into_iter().collect())
    }
}

/// Both protocol sets for a single host. Both are always present, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HostPorts {
    pub tcp: PortSet,
    pub udp: PortSet,
}

impl HostPorts {
    pub fn get(&self, proto: Protocol) -> &PortSet {
        match proto {
            Protocol::Tcp => &self.tcp,
            Protocol::Udp => &self.udp,
        }
    }

    pub fn get_mut(&mut self, proto: Protocol) -> &mut PortSet {
        match proto {
            Protocol::Tcp => &mut self.tcp,
            Protocol::Udp => &mut self.udp,
        }
    }

    pub fn insert(&mut self, proto: Protocol, port: u16) -> bool {
        self.get_mut(proto).insert(port)
    }

    pub fn is_empty(&self) -> bool {
        self.tcp.is_empty() && self.udp.is_empty()
    }

    pub fn union_with(&mut self, other: &HostPorts) {
        self.tcp.union_with(&other.tcp);
        self.udp.union_with(&other.udp);
    }
}

/// Open ports per host, keyed by the raw address string from the report.
///
/// Iteration follows the lexical order of the address strings, so
/// `10.0.0.10` comes before `10.0.0.9`. This is not numeric IP order and
/// must stay that way: generated command output depends on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HostPortTable {
    hosts: BTreeMap<String, HostPorts>,
}

impl HostPortTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an open port, creating the host entry on first sight.
    pub fn record(&mut self, host: &str, port: u16, proto: Protocol) -> bool {
        match self.hosts.get_mut(host) {
            Some(entry) => entry.insert(proto, port),
            None => {
                let mut entry = HostPorts::default();
                entry.insert(proto, port);
                self.hosts.insert(host.to_string(), entry);
                true
            }
        }
    }

    pub fn get(&self, host: &str) -> Option<&HostPorts> {
        self.hosts.get(host)
    }

    pub fn hosts(&self) -> impl Iterator<Item = &str> + '_ {
        self.hosts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HostPorts)> + '_ {
        self.hosts.iter().map(|(host, ports)| (host.as_str(), ports))
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn port_count(&self) -> usize {
        self.hosts.values().map(|p| p.tcp.len() + p.udp.len()).sum()
    }

    /// Every host's ports folded into a single pair of protocol sets.
    pub fn union_ports(&self) -> HostPorts {
        let mut all = HostPorts::default();
        for ports in self.hosts.values() {
            all.union_with(ports);
        }
        all
    }

    /// Fold another table into this one, unioning per host and protocol.
    /// Order of merging does not affect the result.
    pub fn merge(&mut self, other: HostPortTable) {
        for (host, ports) in other.hosts {
            self.hosts.entry(host).or_default().union_with(&ports);
        }
    }
}
