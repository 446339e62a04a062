//! SQLite output backend (feature `sqlite`).
//!
//! Creates `rides.db` in the configured output directory with a single
//! `rides` table, one column per [`RideRow`] field.  Opening the writer drops
//! and recreates the table, so a rerun fully replaces the previous data.

use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::report::{DriverRevenue, HourCount, ZoneRevenue};
use crate::writer::OutputWriter;
use crate::{OutputResult, RideRow};

/// File name the writer creates inside its output directory.
pub const RIDES_DB: &str = "rides.db";

/// Writes rides to an SQLite database and answers group-by queries over it.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `rides.db` in `dir` and replace the `rides` table.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join(RIDES_DB))?;
        Self::with_connection(conn)
    }

    /// Use an existing connection (e.g. `Connection::open_in_memory()`).
    pub fn with_connection(conn: Connection) -> OutputResult<Self> {
        conn.execute_batch(
            "DROP TABLE IF EXISTS rides;
             CREATE TABLE rides (
                 ride_id             INTEGER PRIMARY KEY,
                 ride_datetime       TEXT    NOT NULL,
                 day_of_week         TEXT    NOT NULL,
                 hour_of_day         INTEGER NOT NULL,
                 pickup_zone         TEXT    NOT NULL,
                 drop_zone           TEXT    NOT NULL,
                 distance_km         REAL    NOT NULL,
                 wait_time_min       REAL    NOT NULL,
                 ride_time_min       REAL    NOT NULL,
                 fare_amount         REAL    NOT NULL,
                 is_completed        INTEGER NOT NULL,
                 driver_id           INTEGER NOT NULL,
                 rider_id            INTEGER NOT NULL,
                 rating              REAL,
                 cancellation_reason TEXT    NOT NULL
             );",
        )?;
        debug!("sqlite rides table recreated");

        Ok(Self { conn, finished: false })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Ride count per hour of day (all rides), hour ascending.
    pub fn rides_by_hour(&self) -> OutputResult<Vec<HourCount>> {
        let mut stmt = self.conn.prepare(
            "SELECT hour_of_day, COUNT(*) FROM rides \
             GROUP BY hour_of_day ORDER BY hour_of_day",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok(HourCount { hour: r.get(0)?, rides: r.get::<_, i64>(1)? as u64 })
        })?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    /// Completed-ride revenue per pickup zone, highest first.
    pub fn revenue_by_pickup_zone(&self) -> OutputResult<Vec<ZoneRevenue>> {
        let mut stmt = self.conn.prepare(
            "SELECT pickup_zone, SUM(fare_amount) AS revenue FROM rides \
             WHERE is_completed = 1 \
             GROUP BY pickup_zone ORDER BY revenue DESC, pickup_zone",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok(ZoneRevenue { zone: r.get(0)?, revenue: r.get(1)? })
        })?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    /// Completed-ride revenue per driver, by driver id.
    pub fn revenue_by_driver(&self) -> OutputResult<Vec<DriverRevenue>> {
        let mut stmt = self.conn.prepare(
            "SELECT driver_id, COUNT(*), SUM(fare_amount) FROM rides \
             WHERE is_completed = 1 \
             GROUP BY driver_id ORDER BY driver_id",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok(DriverRevenue {
                driver_id:       r.get(0)?,
                completed_rides: r.get::<_, i64>(1)? as u64,
                revenue:         r.get(2)?,
            })
        })?;
        Ok(rows.collect::<Result<_, _>>()?)
    }
}

impl OutputWriter for SqliteWriter {
    fn write_rides(&mut self, rows: &[RideRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO rides \
                 (ride_id, ride_datetime, day_of_week, hour_of_day, pickup_zone, drop_zone, \
                  distance_km, wait_time_min, ride_time_min, fare_amount, is_completed, \
                  driver_id, rider_id, rating, cancellation_reason) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.ride_id,
                    row.ride_datetime,
                    row.day_of_week,
                    row.hour_of_day,
                    row.pickup_zone,
                    row.drop_zone,
                    row.distance_km,
                    row.wait_time_min,
                    row.ride_time_min,
                    row.fare_amount,
                    row.is_completed,
                    row.driver_id,
                    row.rider_id,
                    row.rating,
                    row.cancellation_reason,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA optimize;")?;
        Ok(())
    }
}
