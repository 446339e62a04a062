//! Command-line definition and config resolution.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rh_core::GeneratorConfig;

// ── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "ridegen",
    version,
    about = "Synthetic ride-hailing data generator",
    long_about = "Generates a reproducible table of ride-hailing trips (time, zones,\n\
                  trip physics, outcome, fare) and reports on persisted output."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log filter, e.g. `debug` or `rh_gen=trace`.  Overrides RUST_LOG.
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate rides and write them to the output directory
    Generate(GenerateArgs),
    /// Aggregate a persisted rides.csv into a JSON report
    Report(ReportArgs),
}

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// JSON file with generator settings; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of rides to generate
    #[arg(long)]
    pub rides: Option<u32>,

    /// Length of the historical window in days
    #[arg(long)]
    pub days: Option<u32>,

    /// Seed of the random stream
    #[arg(long)]
    pub seed: Option<u64>,

    /// Exclusive end of the window (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Output directory (created if missing)
    #[arg(long, default_value = "output")]
    pub out: PathBuf,

    /// Also write rides.db
    #[arg(long)]
    pub sqlite: bool,

    /// Also write rides.parquet
    #[arg(long)]
    pub parquet: bool,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// rides.csv written by `generate`
    #[arg(long, default_value = "output/rides.csv")]
    pub input: PathBuf,

    /// Where to write the JSON report
    #[arg(long, default_value = "output/report.json")]
    pub out: PathBuf,

    /// How many hours / zones to list
    #[arg(long, default_value_t = 5)]
    pub top: usize,
}

// ── Config resolution ─────────────────────────────────────────────────────────

impl GenerateArgs {
    /// Defaults, overlaid with the `--config` file, overlaid with flags.
    pub fn resolve_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => GeneratorConfig::default(),
        };

        if let Some(n) = self.rides {
            config.n_rides = n;
        }
        if let Some(d) = self.days {
            config.days = d;
        }
        if let Some(s) = self.seed {
            config.seed = s;
        }
        if let Some(date) = self.end_date {
            config.end_date = Some(date);
        }
        Ok(config)
    }
}

pub fn load_config(path: &Path) -> Result<GeneratorConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}
