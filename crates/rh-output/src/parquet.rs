//! Parquet output backend (feature `parquet`).
//!
//! Creates `rides.parquet` in the configured output directory.  `rating` and
//! `cancellation_reason` are nullable columns; every other column is required.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{BooleanBuilder, Float64Builder, StringBuilder, UInt8Builder, UInt32Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{OutputResult, RideRow};

/// File name the writer creates inside its output directory.
pub const RIDES_PARQUET: &str = "rides.parquet";

fn rides_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("ride_id",             DataType::UInt32,  false),
        Field::new("ride_datetime",       DataType::Utf8,    false),
        Field::new("day_of_week",         DataType::Utf8,    false),
        Field::new("hour_of_day",         DataType::UInt8,   false),
        Field::new("pickup_zone",         DataType::Utf8,    false),
        Field::new("drop_zone",           DataType::Utf8,    false),
        Field::new("distance_km",         DataType::Float64, false),
        Field::new("wait_time_min",       DataType::Float64, false),
        Field::new("ride_time_min",       DataType::Float64, false),
        Field::new("fare_amount",         DataType::Float64, false),
        Field::new("is_completed",        DataType::Boolean, false),
        Field::new("driver_id",           DataType::UInt32,  false),
        Field::new("rider_id",            DataType::UInt32,  false),
        Field::new("rating",              DataType::Float64, true),
        Field::new("cancellation_reason", DataType::Utf8,    true),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes rides to a Parquet file.
///
/// `finish()` **must** be called to write the Parquet file footer; a file
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    rides:  Option<ArrowWriter<File>>,
    schema: Arc<Schema>,
}

impl ParquetWriter {
    /// Create `rides.parquet` in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let schema = rides_schema();
        let file = File::create(dir.join(RIDES_PARQUET))?;
        let rides = ArrowWriter::try_new(file, Arc::clone(&schema), Some(snappy_props()))?;

        Ok(Self { rides: Some(rides), schema })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_rides(&mut self, rows: &[RideRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.rides.as_mut() else {
            return Ok(());
        };

        let mut ride_ids       = UInt32Builder::new();
        let mut datetimes      = StringBuilder::new();
        let mut weekdays       = StringBuilder::new();
        let mut hours          = UInt8Builder::new();
        let mut pickups        = StringBuilder::new();
        let mut drops          = StringBuilder::new();
        let mut distances      = Float64Builder::new();
        let mut waits          = Float64Builder::new();
        let mut ride_times     = Float64Builder::new();
        let mut fares          = Float64Builder::new();
        let mut completed      = BooleanBuilder::new();
        let mut driver_ids     = UInt32Builder::new();
        let mut rider_ids      = UInt32Builder::new();
        let mut ratings        = Float64Builder::new();
        let mut reasons        = StringBuilder::new();

        for row in rows {
            ride_ids.append_value(row.ride_id);
            datetimes.append_value(&row.ride_datetime);
            weekdays.append_value(&row.day_of_week);
            hours.append_value(row.hour_of_day);
            pickups.append_value(&row.pickup_zone);
            drops.append_value(&row.drop_zone);
            distances.append_value(row.distance_km);
            waits.append_value(row.wait_time_min);
            ride_times.append_value(row.ride_time_min);
            fares.append_value(row.fare_amount);
            completed.append_value(row.completed());
            driver_ids.append_value(row.driver_id);
            rider_ids.append_value(row.rider_id);
            ratings.append_option(row.rating);
            if row.cancellation_reason.is_empty() {
                reasons.append_null();
            } else {
                reasons.append_value(&row.cancellation_reason);
            }
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.schema),
            vec![
                Arc::new(ride_ids.finish()),
                Arc::new(datetimes.finish()),
                Arc::new(weekdays.finish()),
                Arc::new(hours.finish()),
                Arc::new(pickups.finish()),
                Arc::new(drops.finish()),
                Arc::new(distances.finish()),
                Arc::new(waits.finish()),
                Arc::new(ride_times.finish()),
                Arc::new(fares.finish()),
                Arc::new(completed.finish()),
                Arc::new(driver_ids.finish()),
                Arc::new(rider_ids.finish()),
                Arc::new(ratings.finish()),
                Arc::new(reasons.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.rides.take() {
            w.close()?;
        }
        Ok(())
    }
}
