use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use svd_resolve::error::Warning;
use svd_resolve::{resolver, xml};

#[derive(Parser, Debug)]
#[clap(about, version, author)]
enum Command {
    /// Parses and resolves an SVD file, printing a short summary
    Resolve {
        /// Path to input SVD file
        svd_file: PathBuf,

        /// Write the structured resolve log as JSON to this path
        #[clap(long)]
        log: Option<PathBuf>,
    },
    /// Parses and resolves an SVD file without printing a summary
    ///
    /// Exit code reflects success/failure; errors and warnings go through
    /// `log`.
    Check {
        /// Path to input SVD file
        svd_file: PathBuf,
    },
}

impl Command {
    fn run(&self) -> Result<()> {
        match self {
            Self::Resolve { svd_file, log } => {
                let (device, warnings, resolve_log) = resolve_file(svd_file)?;

                let register_count: usize = device
                    .peripherals
                    .iter()
                    .map(|p| count_registers(&p.registers_clusters))
                    .sum();
                println!("peripherals: {}", device.peripherals.len());
                println!("registers: {register_count}");
                println!("warnings: {}", warnings.len());
                for warning in &warnings {
                    log::warn!("{warning:?}");
                }

                if let Some(log_path) = log {
                    let file = File::create(log_path).with_context(|| format!("creating {}", log_path.display()))?;
                    serde_json::to_writer_pretty(file, &resolve_log)?;
                }
            }
            Self::Check { svd_file } => {
                resolve_file(svd_file)?;
            }
        }
        Ok(())
    }
}

fn count_registers(items: &[svd_resolve::model::processed::RegisterOrCluster]) -> usize {
    items
        .iter()
        .map(|item| match item {
            svd_resolve::model::processed::RegisterOrCluster::Register(_) => 1,
            svd_resolve::model::processed::RegisterOrCluster::Cluster(c) => count_registers(&c.registers_clusters),
        })
        .sum()
}

fn resolve_file(path: &std::path::Path) -> Result<(svd_resolve::model::processed::Device, Vec<Warning>, svd_resolve::diagnostics::ResolveLog)> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;

    let mut warnings = Vec::new();
    let device = xml::parse_device(file, &mut warnings).with_context(|| format!("parsing {}", path.display()))?;
    let (processed, resolve_log) = resolver::resolve(device, &mut warnings).with_context(|| format!("resolving {}", path.display()))?;

    Ok((processed, warnings, resolve_log))
}

#[derive(Parser, Debug)]
struct CliArgs {
    #[clap(subcommand)]
    command: Command,
}

pub fn run() {
    env_logger::init();

    let args = CliArgs::parse();
    if let Err(e) = args.command.run().with_context(|| format!("svd-resolve ({})", clap::crate_version!())) {
        log::error!("{e:?}");
        std::process::exit(1);
    }
}
