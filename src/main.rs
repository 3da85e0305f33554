use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use portcmd::cli::{Cli, OutputFormat};
use portcmd::output::OutputWriter;
use portcmd::{parse_file, BatchGenerator, CommandGenerator, PerHostGenerator};

fn main() {
    let cli = Cli::parse();

    init_logging(&cli);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    debug!("CLI arguments: {:?}", cli);

    let table = parse_file(&cli.file, cli.format)
        .with_context(|| format!("Could not read report {}", cli.file.display()))?;

    let writer = OutputWriter::new(cli.output_format, cli.output_file.clone());
    if writer.format() == OutputFormat::Json {
        return writer.write_table(&table);
    }

    let generator: Box<dyn CommandGenerator> = if cli.batch_mode() {
        let mut batch = BatchGenerator::new(cli.batch_module.clone(), cli.batch_args.clone());
        if let Some(dir) = &cli.batch_dir {
            batch = batch.with_output_dir(dir);
        }
        Box::new(batch)
    } else {
        Box::new(PerHostGenerator::new(cli.base_cli.clone()))
    };

    let commands = generator
        .generate(&table)
        .with_context(|| format!("{} command generation failed", generator.name()))?;
    writer.write_commands(&commands)
}
