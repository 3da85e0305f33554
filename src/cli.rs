use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::parser::InputFormat;

#[derive(Parser, Debug)]
#[command(name = "portcmd")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Turn masscan reports into nmap / axiom-scan command lines", long_about = None)]
pub struct Cli {
    #[arg(help = "Scan report to parse")]
    pub file: PathBuf,

    #[arg(short = 'f', long, value_enum, default_value_t = InputFormat::Masscan, help = "Input file format")]
    pub format: InputFormat,

    #[arg(long, value_name = "CMD", help = "nmap command to prefix each per-host line with (default: \"nmap -A\" plus -sS/-sU)")]
    pub base_cli: Option<String>,

    #[arg(long, help = "Emit one axiom-scan command for all hosts instead of one nmap command per host")]
    pub batch: bool,

    #[arg(long, value_name = "MODULE", help = "axiom-scan module for batch mode (implies --batch, default: nmapx)")]
    pub batch_module: Option<String>,

    #[arg(long, value_name = "ARGS", allow_hyphen_values = true, help = "Arguments for batch mode, used verbatim (implies --batch, default: -A plus -sS/-sU)")]
    pub batch_args: Option<String>,

    #[arg(long, value_name = "DIR", help = "Directory to write the batch host list into (default: current directory)")]
    pub batch_dir: Option<PathBuf>,

    #[arg(short = 'o', long, value_enum, default_value = "commands", help = "Output format")]
    pub output_format: OutputFormat,

    #[arg(long, value_name = "FILE", help = "Write output to FILE instead of stdout")]
    pub output_file: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v, -vv, -vvv)")]
    pub verbose: u8,

    #[arg(short, long, help = "Only log errors")]
    pub quiet: bool,
}

impl Cli {
    /// Either batch-only option switches to batch mode on its own.
    pub fn batch_mode(&self) -> bool {
        self.batch || self.batch_module.is_some() || self.batch_args.is_some()
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum OutputFormat {
    #[value(name = "commands", help = "One command line per output line")]
    Commands,
    #[value(name = "json", help = "Parsed host/port table as JSON")]
    Json,
}
