//! Integration tests for rh-output.

use crate::row::RideRow;

fn completed_row(ride_id: u32, hour: u8, zone: &str, driver_id: u32, fare: f64) -> RideRow {
    RideRow {
        ride_id,
        ride_datetime:       format!("2024-06-03 {hour:02}:15:00"),
        day_of_week:         "Monday".into(),
        hour_of_day:         hour,
        pickup_zone:         zone.into(),
        drop_zone:           "MG Road".into(),
        distance_km:         7.25,
        wait_time_min:       4.5,
        ride_time_min:       21.8,
        fare_amount:         fare,
        is_completed:        1,
        driver_id,
        rider_id:            ride_id + 100,
        rating:              Some(4.3),
        cancellation_reason: String::new(),
    }
}

fn cancelled_row(ride_id: u32, hour: u8, zone: &str) -> RideRow {
    RideRow {
        is_completed:        0,
        rating:              None,
        cancellation_reason: "Rider cancelled".into(),
        fare_amount:         99.0,
        ..completed_row(ride_id, hour, zone, 1, 0.0)
    }
}

fn sample_rows() -> Vec<RideRow> {
    vec![
        completed_row(1, 8, "Hebbal", 3, 250.0),
        completed_row(2, 8, "Whitefield", 1, 120.5),
        cancelled_row(3, 8, "Hebbal"),
        completed_row(4, 18, "Hebbal", 3, 80.0),
        cancelled_row(5, 2, "Whitefield"),
    ]
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::{CsvWriter, RIDES_CSV, load_rides_csv, load_rides_reader};
    use crate::writer::OutputWriter;
    use crate::{OutputError, RideOutputObserver};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_file_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join(RIDES_CSV).exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(RIDES_CSV)).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, RideRow::COLUMNS);
    }

    #[test]
    fn csv_round_trip_through_loader() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let rows = sample_rows();
        w.write_rides(&rows).unwrap();
        w.finish().unwrap();

        let loaded = load_rides_csv(&dir.path().join(RIDES_CSV)).unwrap();
        assert_eq!(loaded, rows);
    }

    #[test]
    fn csv_inapplicable_fields_are_empty() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_rides(&[completed_row(1, 9, "Hebbal", 1, 150.0), cancelled_row(2, 9, "Hebbal")])
            .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(RIDES_CSV)).unwrap();
        let records: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(&records[0][13], "4.3"); // rating
        assert_eq!(&records[0][14], "");    // cancellation_reason
        assert_eq!(&records[1][13], "");
        assert_eq!(&records[1][14], "Rider cancelled");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_batch_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_rides(&[]).unwrap();
    }

    #[test]
    fn loader_rejects_rating_on_cancelled_ride() {
        let header = RideRow::COLUMNS.join(",");
        let data = format!(
            "{header}\n1,2024-06-03 08:00:00,Monday,8,Hebbal,MG Road,5.0,3.0,15.0,120.0,0,4,9,4.1,Rider cancelled\n"
        );
        let err = load_rides_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, OutputError::InvalidRow { ride_id: 1, .. }), "got {err}");
    }

    #[test]
    fn loader_rejects_unknown_reason() {
        let header = RideRow::COLUMNS.join(",");
        let data = format!(
            "{header}\n7,2024-06-03 08:00:00,Monday,8,Hebbal,MG Road,5.0,3.0,15.0,120.0,0,4,9,,Flat tyre\n"
        );
        assert!(load_rides_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn loader_rejects_malformed_number() {
        let header = RideRow::COLUMNS.join(",");
        let data = format!(
            "{header}\n1,2024-06-03 08:00:00,Monday,8,Hebbal,MG Road,far,3.0,15.0,120.0,1,4,9,4.0,\n"
        );
        assert!(matches!(load_rides_reader(data.as_bytes()), Err(OutputError::Csv(_))));
    }

    #[test]
    fn integration_csv() {
        use chrono::NaiveDate;
        use rh_core::GeneratorConfig;
        use rh_gen::GeneratorBuilder;

        let config = GeneratorConfig {
            n_rides:  50,
            end_date: NaiveDate::from_ymd_opt(2024, 6, 8),
            ..Default::default()
        };
        let mut generator = GeneratorBuilder::new(config).build().unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = RideOutputObserver::with_batch_size(writer, 16);
        assert_eq!(generator.run(&mut obs), 50);
        assert!(obs.take_error().is_none(), "no write errors expected");

        let rows = load_rides_csv(&dir.path().join(RIDES_CSV)).unwrap();
        assert_eq!(rows.len(), 50);
        let ids: Vec<u32> = rows.iter().map(|r| r.ride_id).collect();
        assert_eq!(ids, (1..=50).collect::<Vec<_>>());

        let summary = obs.summary();
        assert_eq!(summary.total_rides, 50);
        let from_file = crate::RunSummary::from_rows(&rows);
        assert_eq!(summary.completed_rides, from_file.completed_rides);
        assert!((summary.total_revenue - from_file.total_revenue).abs() < 1e-6);
    }
}

// ── Fan-out ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod fan_out_tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::writer::{FanOutWriter, OutputWriter};
    use crate::{OutputError, OutputResult};

    #[derive(Default)]
    struct Log {
        rows:     usize,
        finishes: usize,
    }

    struct Recording {
        log:  Rc<RefCell<Log>>,
        fail: bool,
    }

    impl OutputWriter for Recording {
        fn write_rides(&mut self, rows: &[RideRow]) -> OutputResult<()> {
            self.log.borrow_mut().rows += rows.len();
            if self.fail {
                return Err(OutputError::UnknownZone(0));
            }
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.log.borrow_mut().finishes += 1;
            Ok(())
        }
    }

    #[test]
    fn every_writer_sees_every_batch() {
        let a = Rc::new(RefCell::new(Log::default()));
        let b = Rc::new(RefCell::new(Log::default()));
        let mut fan = FanOutWriter::new();
        fan.push(Recording { log: Rc::clone(&a), fail: false });
        fan.push(Recording { log: Rc::clone(&b), fail: false });
        assert_eq!(fan.len(), 2);

        fan.write_rides(&sample_rows()).unwrap();
        fan.write_rides(&sample_rows()[..1]).unwrap();
        fan.finish().unwrap();

        assert_eq!(a.borrow().rows, 6);
        assert_eq!(b.borrow().rows, 6);
        assert_eq!(a.borrow().finishes, 1);
        assert_eq!(b.borrow().finishes, 1);
    }

    #[test]
    fn failing_writer_does_not_starve_others() {
        let a = Rc::new(RefCell::new(Log::default()));
        let b = Rc::new(RefCell::new(Log::default()));
        let mut fan = FanOutWriter::new();
        fan.push(Recording { log: Rc::clone(&a), fail: true });
        fan.push(Recording { log: Rc::clone(&b), fail: false });

        assert!(fan.write_rides(&sample_rows()).is_err());
        assert_eq!(b.borrow().rows, 5);
    }
}

// ── Rows ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod row_tests {
    use chrono::NaiveDate;
    use rh_core::{GeneratorConfig, ZoneId, ZoneSet};
    use rh_gen::GeneratorBuilder;

    use super::*;
    use crate::OutputError;

    #[test]
    fn rows_from_generated_records_validate() {
        let config = GeneratorConfig {
            n_rides:  200,
            end_date: NaiveDate::from_ymd_opt(2024, 6, 8),
            ..Default::default()
        };
        let mut generator = GeneratorBuilder::new(config).build().unwrap();
        let zones = generator.zones().clone();
        for record in generator.generate() {
            let row = RideRow::from_record(&record, &zones).unwrap();
            row.validate().unwrap();
            assert_ne!(row.pickup_zone, row.drop_zone);
            assert_eq!(row.completed(), record.is_completed());
            assert_eq!(row.fare_amount, record.fare_amount);
        }
    }

    #[test]
    fn unknown_zone_is_an_error() {
        let config = GeneratorConfig {
            n_rides:  1,
            end_date: NaiveDate::from_ymd_opt(2024, 6, 8),
            ..Default::default()
        };
        let mut record = GeneratorBuilder::new(config).build().unwrap().generate().remove(0);
        record.pickup_zone = ZoneId(40);

        let zones = ZoneSet::default();
        let err = RideRow::from_record(&record, &zones).unwrap_err();
        assert!(matches!(err, OutputError::UnknownZone(40)));
    }

    #[test]
    fn validate_checks_flag_and_bounds() {
        let mut row = completed_row(1, 8, "Hebbal", 1, 100.0);
        assert!(row.validate().is_ok());

        row.rating = Some(5.5);
        assert!(row.validate().is_err());

        let mut row = completed_row(2, 8, "Hebbal", 1, 100.0);
        row.is_completed = 2;
        assert!(row.validate().is_err());

        let mut row = completed_row(3, 8, "Hebbal", 1, 100.0);
        row.hour_of_day = 24;
        assert!(row.validate().is_err());

        let mut row = cancelled_row(4, 8, "Hebbal");
        row.cancellation_reason.clear();
        assert!(row.validate().is_err(), "cancelled ride needs a reason");
    }
}

// ── Summary & report ─────────────────────────────────────────────────────────

#[cfg(test)]
mod report_tests {
    use super::*;
    use crate::summary::group_thousands;
    use crate::{RideReport, RunSummary};

    #[test]
    fn summary_counts_completed_revenue_only() {
        let s = RunSummary::from_rows(&sample_rows());
        assert_eq!(s.total_rides, 5);
        assert_eq!(s.completed_rides, 3);
        assert!((s.total_revenue - 450.5).abs() < 1e-9);
        assert!((s.completion_rate() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn empty_summary_rate_is_zero() {
        assert_eq!(RunSummary::default().completion_rate(), 0.0);
    }

    #[test]
    fn summary_display() {
        let s = RunSummary { total_rides: 500, completed_rides: 430, total_revenue: 123_456.789 };
        let text = s.to_string();
        assert!(text.contains("Total rides: 500"), "{text}");
        assert!(text.contains("Completion rate: 86.0%"), "{text}");
        assert!(text.contains("Total revenue (₹): 123,456.79"), "{text}");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0.0), "0.00");
        assert_eq!(group_thousands(999.5), "999.50");
        assert_eq!(group_thousands(1_000.0), "1,000.00");
        assert_eq!(group_thousands(1_234_567.891), "1,234,567.89");
        assert_eq!(group_thousands(-4_500.0), "-4,500.00");
    }

    #[test]
    fn hours_ranked_by_demand() {
        let report = RideReport::from_rows(&sample_rows(), 2);
        assert_eq!(report.rides_by_hour.len(), 24);
        assert_eq!(report.rides_by_hour[8].rides, 3);
        assert_eq!(report.top_hours.len(), 2);
        assert_eq!(report.top_hours[0].hour, 8);
        // hours 2 and 18 tie on one ride; the earlier hour wins
        assert_eq!(report.top_hours[1].hour, 2);
    }

    #[test]
    fn zone_revenue_excludes_cancellations() {
        let report = RideReport::from_rows(&sample_rows(), 5);
        let zones = &report.revenue_by_pickup_zone;
        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].zone, "Hebbal");
        assert!((zones[0].revenue - 330.0).abs() < 1e-9);
        assert_eq!(zones[1].zone, "Whitefield");
        assert!((zones[1].revenue - 120.5).abs() < 1e-9);
        assert_eq!(report.top_zones(1).len(), 1);
        assert_eq!(report.top_zones(10).len(), 2);
    }

    #[test]
    fn driver_revenue_sorted_by_id() {
        let report = RideReport::from_rows(&sample_rows(), 5);
        let drivers = &report.revenue_by_driver;
        assert_eq!(drivers.len(), 2);
        assert_eq!(drivers[0].driver_id, 1);
        assert_eq!(drivers[0].completed_rides, 1);
        assert_eq!(drivers[1].driver_id, 3);
        assert_eq!(drivers[1].completed_rides, 2);
        assert!((drivers[1].revenue - 330.0).abs() < 1e-9);
    }

    #[test]
    fn heatmap_and_cancellation_rates() {
        let report = RideReport::from_rows(&sample_rows(), 5);
        assert_eq!(report.demand_heatmap.len(), 7);
        assert_eq!(report.demand_heatmap[0].day_of_week, "Monday");
        assert_eq!(report.demand_heatmap[0].rides_by_hour[8], 3);
        assert!(report.demand_heatmap[1..].iter().all(|r| r.rides_by_hour.iter().all(|&c| c == 0)));

        let rates = &report.cancellation_rate_by_hour;
        let hours: Vec<u8> = rates.iter().map(|r| r.hour).collect();
        assert_eq!(hours, [2, 8, 18]);
        assert_eq!(rates[0].rate, 1.0);
        assert!((rates[1].rate - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(rates[2].rate, 0.0);
    }

    #[test]
    fn empty_report() {
        let report = RideReport::from_rows(&[], 3);
        assert_eq!(report.summary.total_rides, 0);
        assert_eq!(report.completion_rate, 0.0);
        assert!(report.top_hours.iter().all(|h| h.rides == 0));
        assert!(report.revenue_by_pickup_zone.is_empty());
        assert!(report.cancellation_rate_by_hour.is_empty());
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::sqlite::{RIDES_DB, SqliteWriter};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join(RIDES_DB).exists());
    }

    #[test]
    fn sqlite_ride_count() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_rides(&sample_rows()).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join(RIDES_DB)).unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM rides", [], |r| r.get(0)).unwrap();
        assert_eq!(count, 5);
    }

    #[test]
    fn sqlite_rating_null_for_cancelled() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_rides(&sample_rows()).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join(RIDES_DB)).unwrap();
        let rating: Option<f64> = conn
            .query_row("SELECT rating FROM rides WHERE ride_id = 3", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rating, None);
        let rating: Option<f64> = conn
            .query_row("SELECT rating FROM rides WHERE ride_id = 1", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rating, Some(4.3));
    }

    #[test]
    fn sqlite_reopen_replaces_table() {
        let dir = tmp();
        {
            let mut w = SqliteWriter::new(dir.path()).unwrap();
            w.write_rides(&sample_rows()).unwrap();
            w.finish().unwrap();
        }
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_rides(&sample_rows()[..2]).unwrap();
        w.finish().unwrap();

        let count: i64 = w
            .connection()
            .query_row("SELECT COUNT(*) FROM rides", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn sqlite_queries_match_report() {
        let rows = sample_rows();
        let mut w = SqliteWriter::with_connection(rusqlite::Connection::open_in_memory().unwrap())
            .unwrap();
        w.write_rides(&rows).unwrap();
        w.finish().unwrap();

        let report = crate::RideReport::from_rows(&rows, 3);

        let by_hour = w.rides_by_hour().unwrap();
        let nonzero: Vec<_> = report.rides_by_hour.iter().copied().filter(|h| h.rides > 0).collect();
        assert_eq!(by_hour, nonzero);

        assert_eq!(w.revenue_by_pickup_zone().unwrap(), report.revenue_by_pickup_zone);
        assert_eq!(w.revenue_by_driver().unwrap(), report.revenue_by_driver);
    }
}

// ── Parquet tests ─────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use tempfile::TempDir;

    use arrow::array::{Array, Float64Array, StringArray};
    use arrow::datatypes::DataType;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use super::*;
    use crate::parquet::{ParquetWriter, RIDES_PARQUET};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn parquet_file_created() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert!(dir.path().join(RIDES_PARQUET).exists());
    }

    #[test]
    fn parquet_round_trip() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.write_rides(&sample_rows()).unwrap();
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join(RIDES_PARQUET)).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let schema = builder.schema().clone();
        let batches: Vec<_> = builder.build().unwrap().map(|b| b.unwrap()).collect();
        let total_rows: usize = batches.iter().map(|b| b.num_rows()).sum();
        assert_eq!(total_rows, 5);

        let field_names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(field_names, RideRow::COLUMNS);
        assert_eq!(*schema.field_with_name("is_completed").unwrap().data_type(), DataType::Boolean);
    }

    #[test]
    fn parquet_nullable_outcome_columns() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.write_rides(&sample_rows()[..3]).unwrap();
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join(RIDES_PARQUET)).unwrap();
        let batch = ParquetRecordBatchReaderBuilder::try_new(file)
            .unwrap()
            .build()
            .unwrap()
            .next()
            .unwrap()
            .unwrap();

        let ratings = batch
            .column_by_name("rating")
            .unwrap()
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert!(ratings.is_valid(0));
        assert!(ratings.is_null(2));

        let reasons = batch
            .column_by_name("cancellation_reason")
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert!(reasons.is_null(0));
        assert_eq!(reasons.value(2), "Rider cancelled");
    }

    #[test]
    fn parquet_finish_required() {
        let dir = tmp();
        {
            let mut w = ParquetWriter::new(dir.path()).unwrap();
            w.write_rides(&sample_rows()).unwrap();
        }

        let file = std::fs::File::open(dir.path().join(RIDES_PARQUET)).unwrap();
        let result = ParquetRecordBatchReaderBuilder::try_new(file);
        assert!(result.is_err(), "file without Parquet footer should fail to open");
    }
}
