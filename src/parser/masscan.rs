use std::io::BufRead;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info, trace};

use super::ReportParser;
use crate::error::Result;
use crate::ports::{HostPortTable, Protocol};

lazy_static! {
    // Unanchored: masscan lines often carry a timestamp or other prefix.
    static ref MASSCAN_LINE: Regex = Regex::new(
        r"Host: (?P<ip>[0-9.]+) \(\)\s+Ports: (?P<port>[0-9]+)/open/(?P<proto>tcp|udp)"
    ).expect("masscan line pattern is valid");
}

/// Parser for masscan's grepable report lines:
/// `Host: 10.0.0.1 ()\tPorts: 80/open/tcp////`
#[derive(Debug, Clone, Copy, Default)]
pub struct MasscanParser;

impl MasscanParser {
    /// Extract `(host, port, protocol)` from one report line.
    pub fn parse_line(line: &str) -> Option<(&str, u16, Protocol)> {
        let caps = MASSCAN_LINE.captures(line)?;
        let host = caps.name("ip")?.as_str();
        let port = match caps["port"].parse::<u16>() {
            Ok(port) => port,
            Err(_) => {
                debug!("Port out of range in line: {}", line.trim_end());
                return None;
            }
        };
        let proto = caps["proto"].parse::<Protocol>().ok()?;
        Some((host, port, proto))
    }
}

impl ReportParser for MasscanParser {
    fn name(&self) -> &str {
        "masscan"
    }

    fn parse<R: BufRead>(&self, mut reader: R) -> Result<HostPortTable> {
        let mut table = HostPortTable::new();
        let mut buf = Vec::new();
        let mut lines = 0usize;
        let mut skipped = 0usize;

        // Raw bytes: banner data in a report need not be UTF-8.
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            lines += 1;
            let line = String::from_utf8_lossy(&buf);
            match Self::parse_line(&line) {
                Some((host, port, proto)) => {
                    if !table.record(host, port, proto) {
                        trace!("Duplicate {}/{} for {}", port, proto, host);
                    }
                }
                None => {
                    skipped += 1;
                    debug!("Skipping line {}: {}", lines, line.trim_end());
                }
            }
        }

        info!(
            "{} parser read {} lines ({} skipped): {} hosts, {} open ports",
            self.name(),
            lines,
            skipped,
            table.len(),
            table.port_count()
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_separated_line() {
        let parsed = MasscanParser::parse_line("Host: 10.0.0.1 ()\tPorts: 80/open/tcp////");
        assert_eq!(parsed, Some(("10.0.0.1", 80, Protocol::Tcp)));
    }

    #[test]
    fn test_space_separated_line() {
        let parsed = MasscanParser::parse_line("Host: 10.0.0.1 () Ports: 53/open/udp");
        assert_eq!(parsed, Some(("10.0.0.1", 53, Protocol::Udp)));
    }

    #[test]
    fn test_prefixed_line() {
        let line = "Timestamp: 1700000000\tHost: 172.16.4.2 ()\tPorts: 8443/open/tcp////";
        assert_eq!(MasscanParser::parse_line(line), Some(("172.16.4.2", 8443, Protocol::Tcp)));
    }

    #[test]
    fn test_rejects_noise() {
        for line in [
            "# Masscan 1.3.2 scan initiated Sun Jan  1 00:00:00 2023",
            "# Ports scanned: TCP(1;80-80) UDP(0;) SCTP(0;) PROTOCOLS(0;)",
            "Host: 10.0.0.1 ()\tPorts: 80/closed/tcp",
            "Host: 10.0.0.1 ()\tPorts: 132/open/sctp",
            "Host: 10.0.0.1 ()\tPorts: 70000/open/tcp",
            "Host: 10.0.0.1 Ports: 80/open/tcp",
            "",
        ] {
            assert_eq!(MasscanParser::parse_line(line), None, "{:?}", line);
        }
    }

    #[test]
    fn test_parse_dedups_and_ignores_noise() {
        let report = "\
# Masscan 1.3.2 scan initiated
Host: 10.0.0.1 ()\tPorts: 80/open/tcp////
garbage line
Host: 10.0.0.1 ()\tPorts: 80/open/tcp////
Host: 10.0.0.1 ()\tPorts: 22/open/tcp////
Host: 10.0.0.2 ()\tPorts: 161/open/udp////
# end
";
        let table = MasscanParser.parse(report.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        let first = table.get("10.0.0.1").unwrap();
        assert_eq!(first.tcp.iter().collect::<Vec<_>>(), vec![22, 80]);
        assert!(first.udp.is_empty());
        let second = table.get("10.0.0.2").unwrap();
        assert!(second.tcp.is_empty());
        assert_eq!(second.udp.iter().collect::<Vec<_>>(), vec![161]);
    }

    #[test]
    fn test_parse_skips_non_utf8_lines() {
        let report: &[u8] = b"Host: 10.0.0.1 ()\tPorts: 80/open/tcp////\n\
# banner \xff\xfe garbage\n\
Host: 10.0.0.2 ()\tPorts: 22/open/tcp////\n";
        let table = MasscanParser.parse(report).unwrap();
        assert_eq!(table.hosts().collect::<Vec<_>>(), vec!["10.0.0.1", "10.0.0.2"]);
        assert!(table.get("10.0.0.1").unwrap().tcp.contains(80));
        assert!(table.get("10.0.0.2").unwrap().tcp.contains(22));
    }

    #[test]
    fn test_parse_last_line_without_newline() {
        let table = MasscanParser.parse("Host: 10.0.0.3 ()\tPorts: 8080/open/tcp".as_bytes()).unwrap();
        assert!(table.get("10.0.0.3").unwrap().tcp.contains(8080));
    }

    #[test]
    fn test_parse_empty_report() {
        let table = MasscanParser.parse("".as_bytes()).unwrap();
        assert!(table.is_empty());
    }
}
