use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{info, warn};

use super::{port_clause, scan_type_flags, CommandGenerator};
use crate::error::{Error, Result};
use crate::ports::HostPortTable;

pub const BATCH_TOOL: &str = "axiom-scan";
pub const DEFAULT_MODULE: &str = "nmapx";
pub const HOST_FILE_SUFFIX: &str = "hosts";

/// Name of the host-list file for a run started at `at`:
/// `YYYYMMDD_HHMMSS_hosts.txt`.
pub fn host_file_name(at: &DateTime<Local>) -> String {
    format!("{}_{}.txt", at.format("%Y%m%d_%H%M%S"), HOST_FILE_SUFFIX)
}

/// A single axiom-scan invocation covering every host, with the hosts
/// written to a timestamped list file and one shared port specification.
#[derive(Debug, Clone)]
pub struct BatchGenerator {
    module: String,
    args: Option<String>,
    output_dir: PathBuf,
    timestamp: Option<DateTime<Local>>,
}

impl Default for BatchGenerator {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl BatchGenerator {
    pub fn new(module: Option<String>, args: Option<String>) -> Self {
        Self {
            module: module.unwrap_or_else(|| DEFAULT_MODULE.to_string()),
            args,
            output_dir: PathBuf::new(),
            timestamp: None,
        }
    }

    /// Directory the host file is created in. Defaults to the working directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Pin the timestamp used for the host file name.
    pub fn with_timestamp(mut self, at: DateTime<Local>) -> Self {
        self.timestamp = Some(at);
        self
    }

    pub fn host_file_path(&self) -> PathBuf {
        let at = self.timestamp.unwrap_or_else(Local::now);
        self.output_dir.join(host_file_name(&at))
    }

    fn write_host_file(&self, path: &Path, table: &HostPortTable) -> Result<()> {
        if path.exists() {
            warn!("Overwriting existing host file {}", path.display());
        }

        let write = || -> std::io::Result<()> {
            let mut writer = BufWriter::new(File::create(path)?);
            for host in table.hosts() {
                writeln!(writer, "{}", host)?;
            }
            writer.flush()
        };

        write().map_err(|source| Error::HostFile {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl CommandGenerator for BatchGenerator {
    fn name(&self) -> &str {
        "batch"
    }

    fn generate(&self, table: &HostPortTable) -> Result<Vec<String>> {
        let path = self.host_file_path();
        self.write_host_file(&path, table)?;
        info!("Wrote {} hosts to {}", table.len(), path.display());

        let all_ports = table.union_ports();
        let args = match &self.args {
            Some(args) => args.clone(),
            None => {
                let mut flags = vec!["-A"];
                flags.extend(scan_type_flags(&all_ports));
                flags.join(" ")
            }
        };

        Ok(vec![format!(
            "{} {} -m {} -p{} {}",
            BATCH_TOOL,
            path.display(),
            self.module,
            port_clause(&all_ports),
            args
        )])
    }
}
