//! ridegen — synthetic ride-hailing data generator.
//!
//! ```text
//! ridegen generate --rides 500 --days 7 --seed 42 --out output --sqlite
//! ridegen report --input output/rides.csv --out output/report.json --top 5
//! ```

mod cli;
mod logging;


use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use rh_gen::GeneratorBuilder;
use rh_output::{
    CsvWriter, FanOutWriter, ParquetWriter, RideOutputObserver, RideReport, RunSummary,
    SqliteWriter, load_rides_csv,
};

use cli::{Cli, Command, GenerateArgs, ReportArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.as_deref());

    match cli.command {
        Command::Generate(args) => {
            let summary = run_generate(&args)?;
            println!("{summary}");
        }
        Command::Report(args) => {
            let report = run_report(&args)?;
            print_report(&report, args.top);
        }
    }
    Ok(())
}

// ── generate ──────────────────────────────────────────────────────────────────

fn run_generate(args: &GenerateArgs) -> Result<RunSummary> {
    let config = args.resolve_config()?;
    let mut generator = GeneratorBuilder::new(config).build()?;

    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating output directory {}", args.out.display()))?;

    let mut writers = FanOutWriter::new();
    writers.push(CsvWriter::new(&args.out)?);
    if args.sqlite {
        writers.push(SqliteWriter::new(&args.out)?);
    }
    if args.parquet {
        writers.push(ParquetWriter::new(&args.out)?);
    }

    let mut obs = RideOutputObserver::new(writers);
    let t0 = Instant::now();
    generator.run(&mut obs);

    if let Some(e) = obs.take_error() {
        return Err(e).context("writing ride output");
    }
    info!(
        out = %args.out.display(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "output written"
    );
    Ok(obs.summary())
}

// ── report ────────────────────────────────────────────────────────────────────

fn run_report(args: &ReportArgs) -> Result<RideReport> {
    let rows = load_rides_csv(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;
    let report = RideReport::from_rows(&rows, args.top);

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&report)?;
    fs::write(&args.out, json).with_context(|| format!("writing {}", args.out.display()))?;
    info!(rides = rows.len(), out = %args.out.display(), "report written");

    Ok(report)
}

fn print_report(report: &RideReport, top: usize) {
    println!("{}", report.summary);
    println!();

    println!("{:<6} {:>8}", "Hour", "Rides");
    println!("{}", "-".repeat(15));
    for h in &report.top_hours {
        println!("{:<6} {:>8}", h.hour, h.rides);
    }
    println!();

    println!("{:<22} {:>14}", "Pickup zone", "Revenue (₹)");
    println!("{}", "-".repeat(37));
    for z in report.top_zones(top) {
        println!("{:<22} {:>14.2}", z.zone, z.revenue);
    }
}
