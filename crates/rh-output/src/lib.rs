//! `rh-output` — ride output writers, loader, summary and reports.
//!
//! Three backends are provided behind Cargo features:
//!
//! | Feature   | Backend     | Files created      |
//! |-----------|-------------|--------------------|
//! | *(none)*  | CSV         | `rides.csv`        |
//! | `sqlite`  | SQLite      | `rides.db`         |
//! | `parquet` | Parquet     | `rides.parquet`    |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`RideOutputObserver`], which implements `rh_gen::GenObserver` and keeps
//! a running [`RunSummary`].  [`FanOutWriter`] feeds several backends from
//! one run.
//!
//! The reporting side ([`load_rides_csv`], [`RideReport`]) works on persisted
//! rows only, never on the generator.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rh_output::{CsvWriter, RideOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = RideOutputObserver::new(writer);
//! generator.run(&mut obs);
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! println!("{}", obs.summary());
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod report;
pub mod row;
pub mod summary;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;

#[cfg(test)]
mod tests;

pub use crate::csv::{CsvWriter, RIDES_CSV, load_rides_csv, load_rides_reader};
pub use error::{OutputError, OutputResult};
pub use observer::RideOutputObserver;
pub use report::{DriverRevenue, HeatmapRow, HourCount, HourRate, RideReport, ZoneRevenue};
pub use row::RideRow;
pub use summary::RunSummary;
pub use writer::{FanOutWriter, OutputWriter};

#[cfg(feature = "sqlite")]
pub use sqlite::{RIDES_DB, SqliteWriter};

#[cfg(feature = "parquet")]
pub use crate::parquet::{ParquetWriter, RIDES_PARQUET};
