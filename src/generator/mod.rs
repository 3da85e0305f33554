// Command synthesis for follow-on scanners
pub mod batch;
pub mod per_host;

use crate::error::Result;
use crate::ports::{HostPortTable, HostPorts, Protocol};
pub use batch::BatchGenerator;
pub use per_host::PerHostGenerator;

pub trait CommandGenerator {
    fn name(&self) -> &str;
    fn generate(&self, table: &HostPortTable) -> Result<Vec<String>>;
}

/// nmap port clause: `T:<ranges>` and/or `U:<ranges>`, comma joined.
/// Empty when neither protocol has ports.
pub fn port_clause(ports: &HostPorts) -> String {
    Protocol::ALL
        .iter()
        .filter_map(|&proto| {
            ports
                .get(proto)
                .to_ranges()
                .map(|ranges| format!("{}:{}", proto.clause_prefix(), ranges))
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// nmap scan-type flags implied by which protocols have ports.
pub(crate) fn scan_type_flags(ports: &HostPorts) -> Vec<&'static str> {
    let mut flags = Vec::new();
    if !ports.tcp.is_empty() {
        flags.push("-sS");
    }
    if !ports.udp.is_empty() {
        flags.push("-sU");
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::PortSet;

    #[test]
    fn test_port_clause_variants() {
        let tcp_only = HostPorts {
            tcp: [22, 80].into_iter().collect(),
            udp: PortSet::new(),
        };
        assert_eq!(port_clause(&tcp_only), "T:22,80");

        let both = HostPorts {
            tcp: [80, 81, 82].into_iter().collect(),
            udp: [53].into_iter().collect(),
        };
        assert_eq!(port_clause(&both), "T:80-82,U:53");

        assert_eq!(port_clause(&HostPorts::default()), "");
    }

    #[test]
    fn test_scan_type_flags() {
        let udp_only = HostPorts {
            tcp: PortSet::new(),
            udp: [161].into_iter().collect(),
        };
        assert_eq!(scan_type_flags(&udp_only), vec!["-sU"]);
        assert!(scan_type_flags(&HostPorts::default()).is_empty());
    }
}
