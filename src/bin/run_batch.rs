//! Compute schedules for a portfolio of leases
//!
//! Reads a JSON array of `{ "id": ..., <schedule input> }` objects and writes
//! one yearly-totals CSV row per lease and year

use anyhow::{Context, Result};
use clap::Parser;
use lease_rent_schedule::schedule::export::write_yearly_totals_csv;
use lease_rent_schedule::{ScheduleConfig, ScheduleInput, ScheduleRunner};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "run_batch", about = "Compute rent schedules for many leases in parallel")]
struct Args {
    /// JSON array of leases
    #[arg(short, long, default_value = "leases.json")]
    input: PathBuf,

    /// Yearly totals output
    #[arg(short, long, default_value = "yearly_totals.csv")]
    output: PathBuf,

    /// Engine configuration (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct BatchLease {
    id: String,
    #[serde(flatten)]
    input: ScheduleInput,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let file = File::open(&args.input).with_context(|| format!("Unable to open {}", args.input.display()))?;
    let leases: Vec<BatchLease> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Unable to parse {}", args.input.display()))?;
    println!("Loaded {} leases in {:?}", leases.len(), start.elapsed());

    let config = match &args.config {
        Some(path) => ScheduleConfig::from_json_file(path)?,
        None => ScheduleConfig::default(),
    };
    let runner = ScheduleRunner::with_config(config);

    let inputs: Vec<ScheduleInput> = leases.iter().map(|l| l.input.clone()).collect();
    let run_start = Instant::now();
    let results = runner.run_batch_parallel(&inputs);
    println!("Computed {} schedules in {:?}", results.len(), run_start.elapsed());

    let mut computed = Vec::new();
    for (lease, result) in leases.iter().zip(&results) {
        match result {
            Ok(schedule) => computed.push((lease.id.as_str(), schedule.summary.yearly_totals.as_slice())),
            Err(e) => eprintln!("Lease {}: échéancier non calculé: {}", lease.id, e),
        }
    }

    let out = File::create(&args.output).with_context(|| format!("Unable to create {}", args.output.display()))?;
    write_yearly_totals_csv(out, computed.iter().copied())?;

    let total_net: f64 = results
        .iter()
        .filter_map(|r| r.as_ref().ok())
        .map(|r| r.summary.total_net_rent_ht)
        .sum();
    println!("Portfolio net rent HT: {:.2}", total_net);
    println!("Yearly totals written to: {}", args.output.display());

    Ok(())
}
