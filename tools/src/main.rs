//! recon-runner: reconcile a system ledger against bank statements.
//!
//! Usage:
//!   recon-runner --system system.csv --bank alpha.csv,beta.csv \
//!                --start 2025-08-01 --end 2025-08-31 [--output-json out.json]
//!   recon-runner --config run.json [--output-json out.json]

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use recon_core::{
    config::{split_path_list, RunConfig, RunPlan},
    ingest,
    reconcile,
    report::Summary,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "recon-runner", version, about = "Reconcile a system ledger against bank statements")]
struct Cli {
    /// System transaction CSV file path
    #[arg(long, value_name = "PATH")]
    system: Option<PathBuf>,

    /// Comma-separated list of bank statement CSV file paths
    #[arg(long, value_name = "PATHS")]
    bank: Option<String>,

    /// Start date (YYYY-MM-DD) inclusive
    #[arg(long, value_name = "DATE")]
    start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD) inclusive
    #[arg(long, value_name = "DATE")]
    end: Option<NaiveDate>,

    /// Optional path to write the JSON summary
    #[arg(long = "output-json", value_name = "PATH")]
    output_json: Option<PathBuf>,

    /// JSON run config; explicit flags override its values
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    /// The config file (if any) with explicit flags layered on top.
    fn run_config(self) -> Result<RunConfig> {
        let base = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };
        let flags = RunConfig {
            system:      self.system,
            banks:       self.bank.as_deref().map(split_path_list).unwrap_or_default(),
            start:       self.start,
            end:         self.end,
            output_json: self.output_json,
        };
        Ok(base.merge(flags))
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let config = Cli::parse().run_config()?;
    let plan = match config.validate() {
        Ok(plan) => plan,
        Err(e) => {
            // Missing inputs are a usage error, same exit code as clap's.
            eprintln!("error: {e}");
            eprintln!("run with --help for usage");
            std::process::exit(2);
        }
    };

    let json = run(&plan)?;

    // File first: a failed write must leave stdout empty.
    if let Some(out) = &plan.output_json {
        std::fs::write(out, format!("{json}\n"))
            .with_context(|| format!("cannot write {}", out.display()))?;
        log::info!("summary written to {}", out.display());
    }
    println!("{json}");

    Ok(())
}

fn run(plan: &RunPlan) -> Result<String> {
    let system = ingest::parse_internal_csv(&plan.system)?;
    let banks = ingest::parse_external_files(&plan.banks)?;
    log::info!(
        "loaded {} system rows, {} bank rows from {} file(s)",
        system.len(),
        banks.len(),
        plan.banks.len()
    );

    let result = reconcile(&system, &banks, plan.window);
    let json = Summary::from_result(&result).to_pretty_json()?;
    Ok(json)
}
