//! Lease Rent Schedule CLI
//!
//! Command-line interface for computing lease rent schedules

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lease_rent_schedule::lease::{load_index_points, load_schedule_input};
use lease_rent_schedule::schedule::{effective_end_date, export};
use lease_rent_schedule::{ScheduleConfig, ScheduleEngine};
use log::info;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lease_rent_schedule")]
#[command(author, version, about = "Rent schedule projection for commercial leases", long_about = None)]
struct Cli {
    /// Engine configuration (JSON); defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the rent schedule of one lease
    Compute {
        /// Schedule input (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Index series (CSV: EffectiveDate,IndexValue) replacing the input's known points
        #[arg(long)]
        index_csv: Option<PathBuf>,

        /// Write periods to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write yearly totals to this CSV file
        #[arg(short, long)]
        yearly: Option<PathBuf>,

        /// Print the full result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Validate a schedule input without computing it
    Validate {
        /// Schedule input (JSON)
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ScheduleConfig::from_json_file(path)
            .with_context(|| format!("Unable to load config {}", path.display()))?,
        None => ScheduleConfig::default(),
    };

    match cli.command {
        Commands::Compute { input, index_csv, output, yearly, json } => {
            compute(config, &input, index_csv.as_ref(), output.as_ref(), yearly.as_ref(), json)
        }
        Commands::Validate { input } => validate(&config, &input),
    }
}

fn compute(
    config: ScheduleConfig,
    input_path: &PathBuf,
    index_csv: Option<&PathBuf>,
    output: Option<&PathBuf>,
    yearly: Option<&PathBuf>,
    json: bool,
) -> Result<()> {
    let mut input = load_schedule_input(input_path)
        .with_context(|| format!("Unable to load input {}", input_path.display()))?;

    if let Some(path) = index_csv {
        input.known_index_points = load_index_points(path)
            .with_context(|| format!("Unable to load index series {}", path.display()))?;
        info!("Loaded {} index points from {}", input.known_index_points.len(), path.display());
    }

    let engine = ScheduleEngine::new(config);
    let result = engine.compute(&input).context("échéancier non calculé")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Rent schedule ({} periods):", result.schedule.len());
        println!(
            "{:>10} {:>10} {:>4} {:>3} {:>9} {:>12} {:>12} {:>12} {:>12}",
            "Start", "End", "Year", "Per", "Factor", "BaseRent", "Charges", "Franchise", "NetRent"
        );
        println!("{}", "-".repeat(94));
        for row in &result.schedule {
            println!(
                "{:>10} {:>10} {:>4} {:>3} {:>9.6} {:>12.2} {:>12.2} {:>12.2} {:>12.2}",
                row.period_start,
                row.period_end,
                row.year,
                row.quarter.or(row.month).unwrap_or(0),
                row.index_factor,
                row.base_rent_ht,
                row.total_charges_ht(),
                row.franchise_ht,
                row.net_rent_ht,
            );
        }

        let summary = &result.summary;
        println!("\nYearly totals:");
        for total in &summary.yearly_totals {
            println!(
                "  {}: base {:.2}  charges {:.2}  net {:.2}",
                total.year, total.base_rent_ht, total.charges_ht, total.net_rent_ht
            );
        }
        println!("\nSummary:");
        println!("  Total Base Rent HT: {:.2}", summary.total_base_rent_ht);
        println!("  Total Charges HT: {:.2}", summary.total_charges_ht);
        println!("  Total Net Rent HT: {:.2}", summary.total_net_rent_ht);
        println!("  Deposit HT: {:.2}", summary.deposit_ht);
        println!("  TCAM: {:.4}%", summary.tcam * 100.0);
        for condition in &result.boundary_conditions {
            println!("  Note: {:?}", condition);
        }
    }

    if let Some(path) = output {
        export::write_schedule_csv_file(path, &result.schedule)
            .with_context(|| format!("Unable to write {}", path.display()))?;
        println!("\nPeriods written to: {}", path.display());
    }

    if let Some(path) = yearly {
        let file = File::create(path).with_context(|| format!("Unable to create {}", path.display()))?;
        let lease_id = input_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        export::write_yearly_totals_csv(file, [(lease_id.as_str(), result.summary.yearly_totals.as_slice())])?;
        println!("Yearly totals written to: {}", path.display());
    }

    Ok(())
}

fn validate(config: &ScheduleConfig, input_path: &PathBuf) -> Result<()> {
    let input = load_schedule_input(input_path)
        .with_context(|| format!("Unable to load input {}", input_path.display()))?;
    input.validate()?;
    let end = effective_end_date(&input, config.default_horizon_years)?;

    println!(
        "Valid {} lease from {} to {} (projected to {})",
        input.payment_frequency, input.start_date, input.end_date, end
    );
    Ok(())
}
