// Report parsers that turn scanner output into a host port table
pub mod masscan;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use clap::ValueEnum;
use tracing::debug;

use crate::error::{Error, Result};
use crate::ports::HostPortTable;
pub use masscan::MasscanParser;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum InputFormat {
    #[default]
    #[value(name = "masscan", help = "masscan grepable output (-oG)")]
    Masscan,
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Masscan => write!(f, "masscan"),
        }
    }
}

pub trait ReportParser {
    fn name(&self) -> &str;

    /// Build a table from a line-oriented report. Lines the grammar does not
    /// recognise are skipped.
    fn parse<R: BufRead>(&self, reader: R) -> Result<HostPortTable>;
}

/// Check that `path` is a readable regular file before any parsing starts.
pub fn open_report(path: &Path) -> Result<BufReader<File>> {
    let metadata = std::fs::metadata(path).map_err(|e| Error::InvalidInput {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    if !metadata.is_file() {
        return Err(Error::InvalidInput {
            path: path.to_path_buf(),
            reason: "not a regular file".to_string(),
        });
    }

    let file = File::open(path).map_err(|e| Error::InvalidInput {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(BufReader::new(file))
}

pub fn parse_file(path: &Path, format: InputFormat) -> Result<HostPortTable> {
    let reader = open_report(path)?;
    debug!("Opened {} as {} report", path.display(), format);
    let table = match format {
        InputFormat::Masscan => MasscanParser.parse(reader)?,
    };
    Ok(table)
}
