use tracing::debug;

use super::{port_clause, scan_type_flags, CommandGenerator};
use crate::error::Result;
use crate::ports::HostPortTable;

pub const DEFAULT_NMAP_CLI: &str = "nmap -A";

/// One nmap invocation per host, scanning only the ports found open on it.
#[derive(Debug, Clone, Default)]
pub struct PerHostGenerator {
    base_cli: Option<String>,
}

impl PerHostGenerator {
    pub fn new(base_cli: Option<String>) -> Self {
        Self { base_cli }
    }

    /// Scan-type flags are only added for the stock template.
    fn auto_flags(&self) -> bool {
        self.template() == DEFAULT_NMAP_CLI
    }

    fn template(&self) -> &str {
        self.base_cli.as_deref().unwrap_or(DEFAULT_NMAP_CLI)
    }
}

impl CommandGenerator for PerHostGenerator {
    fn name(&self) -> &str {
        "per-host"
    }

    fn generate(&self, table: &HostPortTable) -> Result<Vec<String>> {
        let template = self.template();
        let mut commands = Vec::with_capacity(table.len());

        for (host, ports) in table.iter() {
            let flags = if self.auto_flags() {
                scan_type_flags(ports)
            } else {
                Vec::new()
            };
            let clause = port_clause(ports);

            let cmd = if flags.is_empty() {
                format!("{} -p{} {}", template, clause, host)
            } else {
                format!("{} {} -p{} {}", template, flags.join(" "), clause, host)
            };
            debug!("{}: {}", host, cmd);
            commands.push(cmd);
        }

        Ok(commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Protocol;

    fn sample_table() -> HostPortTable {
        let mut table = HostPortTable::new();
        table.record("10.0.0.1", 80, Protocol::Tcp);
        table.record("10.0.0.1", 22, Protocol::Tcp);
        table.record("10.0.0.2", 53, Protocol::Udp);
        table.record("10.0.0.3", 443, Protocol::Tcp);
        table.record("10.0.0.3", 161, Protocol::Udp);
        table.record("10.0.0.3", 162, Protocol::Udp);
        table
    }

    #[test]
    fn test_default_template_flags() {
        let commands = PerHostGenerator::default().generate(&sample_table()).unwrap();
        assert_eq!(
            commands,
            vec![
                "nmap -A -sS -pT:22,80 10.0.0.1",
                "nmap -A -sU -pU:53 10.0.0.2",
                "nmap -A -sS -sU -pT:443,U:161-162 10.0.0.3",
            ]
        );
    }

    #[test]
    fn test_custom_template_suppresses_flags() {
        let generator = PerHostGenerator::new(Some("nmap -sV -Pn".to_string()));
        let commands = generator.generate(&sample_table()).unwrap();
        assert_eq!(
            commands,
            vec![
                "nmap -sV -Pn -pT:22,80 10.0.0.1",
                "nmap -sV -Pn -pU:53 10.0.0.2",
                "nmap -sV -Pn -pT:443,U:161-162 10.0.0.3",
            ]
        );
    }

    #[test]
    fn test_explicit_default_template_keeps_flags() {
        let generator = PerHostGenerator::new(Some(DEFAULT_NMAP_CLI.to_string()));
        let commands = generator.generate(&sample_table()).unwrap();
        assert_eq!(commands[0], "nmap -A -sS -pT:22,80 10.0.0.1");
    }

    #[test]
    fn test_empty_table_yields_nothing() {
        let commands = PerHostGenerator::default().generate(&HostPortTable::new()).unwrap();
        assert!(commands.is_empty());
    }
}
