use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::OutputFormat;
use crate::ports::HostPortTable;

pub struct OutputWriter {
    format: OutputFormat,
    file: Option<PathBuf>,
}

impl OutputWriter {
    pub fn new(format: OutputFormat, file: Option<PathBuf>) -> Self {
        Self { format, file }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn write_commands(&self, commands: &[String]) -> Result<()> {
        let mut output = String::new();
        for cmd in commands {
            output.push_str(cmd);
            output.push('\n');
        }
        self.emit(&output)
    }

    pub fn write_table(&self, table: &HostPortTable) -> Result<()> {
        let mut output = serde_json::to_string_pretty(table)?;
        output.push('\n');
        self.emit(&output)
    }

    fn emit(&self, output: &str) -> Result<()> {
        match &self.file {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                let mut writer = BufWriter::new(file);
                writer.write_all(output.as_bytes())?;
                writer.flush()?;
            }
            None => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                handle.write_all(output.as_bytes())?;
                handle.flush()?;
            }
        }
        Ok(())
    }
}
