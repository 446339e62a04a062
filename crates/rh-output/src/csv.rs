//! CSV output backend and loader.
//!
//! The writer creates `rides.csv` in the configured output directory, header
//! row first, one row per ride in `ride_id` order:
//!
//! ```csv
//! ride_id,ride_datetime,day_of_week,hour_of_day,pickup_zone,drop_zone,distance_km,wait_time_min,ride_time_min,fare_amount,is_completed,driver_id,rider_id,rating,cancellation_reason
//! 1,2024-06-03 08:14:00,Monday,8,Hebbal,MG Road,9.41,5.2,27.9,281.3,1,17,204,4.4,
//! 2,2024-06-05 23:02:00,Wednesday,23,Jayanagar,KR Puram,4.07,3.1,12.6,84.52,0,61,9,,Rider cancelled
//! ```
//!
//! The loader reads the same layout back, validating each row.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::Writer;
use tracing::debug;

use crate::writer::OutputWriter;
use crate::{OutputResult, RideRow};

/// File name the writer creates inside its output directory.
pub const RIDES_CSV: &str = "rides.csv";

// ── Writer ────────────────────────────────────────────────────────────────────

/// Writes rides to `rides.csv`.
pub struct CsvWriter {
    rides:    Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create (or truncate) `rides.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let path = dir.join(RIDES_CSV);
        let mut rides = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)?;
        rides.write_record(RideRow::COLUMNS)?;
        debug!(path = %path.display(), "csv writer opened");

        Ok(Self { rides, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_rides(&mut self, rows: &[RideRow]) -> OutputResult<()> {
        for row in rows {
            self.rides.serialize(row)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.rides.flush()?;
        Ok(())
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Load persisted rides from a CSV file written by [`CsvWriter`].
pub fn load_rides_csv(path: &Path) -> OutputResult<Vec<RideRow>> {
    let file = File::open(path)?;
    load_rides_reader(file)
}

/// Like [`load_rides_csv`] but accepts any `Read` source.
///
/// Every row is checked with [`RideRow::validate`]; the first invalid row
/// aborts the load.
pub fn load_rides_reader<R: Read>(reader: R) -> OutputResult<Vec<RideRow>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.deserialize::<RideRow>() {
        let row = result?;
        row.validate()?;
        rows.push(row);
    }

    Ok(rows)
}
