//! The flat, serialised form of a ride.

use rh_core::{ZoneSet, weekday_name};
use rh_model::outcome::round_to;
use rh_model::{CancellationReason, RideRecord};
use serde::{Deserialize, Serialize};

use crate::{OutputError, OutputResult};

/// Timestamp layout of the `ride_datetime` column.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One ride as written to CSV / SQLite / Parquet.  Field order is column order.
///
/// Zones are resolved to labels and floats are rounded for display (distance
/// to 2 decimals, wait and ride time to 1).  `rating` is empty and
/// `cancellation_reason` is `""` when not applicable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideRow {
    pub ride_id:             u32,
    pub ride_datetime:       String,
    pub day_of_week:         String,
    pub hour_of_day:         u8,
    pub pickup_zone:         String,
    pub drop_zone:           String,
    pub distance_km:         f64,
    pub wait_time_min:       f64,
    pub ride_time_min:       f64,
    pub fare_amount:         f64,
    /// `1` completed, `0` cancelled.
    pub is_completed:        u8,
    pub driver_id:           u32,
    pub rider_id:            u32,
    pub rating:              Option<f64>,
    pub cancellation_reason: String,
}

impl RideRow {
    pub const COLUMNS: [&'static str; 15] = [
        "ride_id",
        "ride_datetime",
        "day_of_week",
        "hour_of_day",
        "pickup_zone",
        "drop_zone",
        "distance_km",
        "wait_time_min",
        "ride_time_min",
        "fare_amount",
        "is_completed",
        "driver_id",
        "rider_id",
        "rating",
        "cancellation_reason",
    ];

    /// Flatten `record`, resolving its zones against `zones`.
    pub fn from_record(record: &RideRecord, zones: &ZoneSet) -> OutputResult<Self> {
        let label = |id: rh_core::ZoneId| {
            zones
                .label(id)
                .map(str::to_owned)
                .ok_or(OutputError::UnknownZone(id.0))
        };

        Ok(Self {
            ride_id:             record.ride_id.0,
            ride_datetime:       record.timestamp.format(DATETIME_FORMAT).to_string(),
            day_of_week:         weekday_name(record.day_of_week).to_owned(),
            hour_of_day:         record.hour_of_day,
            pickup_zone:         label(record.pickup_zone)?,
            drop_zone:           label(record.drop_zone)?,
            distance_km:         round_to(record.distance_km, 2),
            wait_time_min:       round_to(record.wait_time_min, 1),
            ride_time_min:       round_to(record.ride_time_min, 1),
            fare_amount:         record.fare_amount,
            is_completed:        record.is_completed() as u8,
            driver_id:           record.driver_id.0,
            rider_id:            record.rider_id.0,
            rating:              record.rating(),
            cancellation_reason: record
                .cancellation_reason()
                .map(|r| r.label().to_owned())
                .unwrap_or_default(),
        })
    }

    #[inline]
    pub fn completed(&self) -> bool {
        self.is_completed == 1
    }

    /// Check the per-row invariants of persisted data: a 0/1 completion flag,
    /// exactly one of rating / reason populated, a known reason label, and a
    /// rating within bounds.
    pub fn validate(&self) -> OutputResult<()> {
        let invalid = |reason: String| OutputError::InvalidRow { ride_id: self.ride_id, reason };

        match (self.is_completed, self.rating, self.cancellation_reason.is_empty()) {
            (1, Some(r), true) => {
                if !(2.5..=5.0).contains(&r) {
                    return Err(invalid(format!("rating {r} outside [2.5, 5.0]")));
                }
            }
            (0, None, false) => {
                if CancellationReason::from_label(&self.cancellation_reason).is_none() {
                    return Err(invalid(format!(
                        "unknown cancellation reason {:?}",
                        self.cancellation_reason
                    )));
                }
            }
            (flag @ (0 | 1), ..) => {
                return Err(invalid(format!(
                    "is_completed={flag} but rating={:?}, cancellation_reason={:?}",
                    self.rating, self.cancellation_reason
                )));
            }
            (flag, ..) => return Err(invalid(format!("is_completed must be 0 or 1, got {flag}"))),
        }

        if self.hour_of_day > 23 {
            return Err(invalid(format!("hour_of_day {} out of range", self.hour_of_day)));
        }
        Ok(())
    }
}
