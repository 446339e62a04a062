//! The generated ride record.

use std::fmt;

use chrono::{NaiveDateTime, Weekday};
use rh_core::{DriverId, RideId, RiderId, ZoneId, is_peak_hour};

// ── CancellationReason ────────────────────────────────────────────────────────

/// Why a ride did not complete.  Closed set.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum CancellationReason {
    DriverNoShow,
    RiderCancelled,
    PaymentIssue,
}

impl CancellationReason {
    /// All reasons, in the order of [`WEIGHTS`](Self::WEIGHTS).
    pub const ALL: [CancellationReason; 3] = [
        CancellationReason::DriverNoShow,
        CancellationReason::RiderCancelled,
        CancellationReason::PaymentIssue,
    ];

    /// Categorical weights of a cancellation; sum to 1.0.
    pub const WEIGHTS: [f64; 3] = [0.5, 0.4, 0.1];

    pub fn label(self) -> &'static str {
        match self {
            CancellationReason::DriverNoShow   => "Driver no-show",
            CancellationReason::RiderCancelled => "Rider cancelled",
            CancellationReason::PaymentIssue   => "Payment issue",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.label() == label)
    }
}

impl fmt::Display for CancellationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── RideOutcome ───────────────────────────────────────────────────────────────

/// Completion outcome.  A rating exists only for completed rides and a
/// cancellation reason only for cancelled ones.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum RideOutcome {
    /// `rating` is in `[2.5, 5.0]`, one decimal.
    Completed { rating: f64 },
    Cancelled { reason: CancellationReason },
}

// ── RideRecord ────────────────────────────────────────────────────────────────

/// One simulated ride.  Built in a single pass and never mutated afterwards.
#[derive(Clone, PartialEq, Debug)]
pub struct RideRecord {
    pub ride_id:       RideId,
    pub timestamp:     NaiveDateTime,
    pub day_of_week:   Weekday,
    /// 0–23.
    pub hour_of_day:   u8,
    pub pickup_zone:   ZoneId,
    pub drop_zone:     ZoneId,
    /// ≥ 1.0, full precision.
    pub distance_km:   f64,
    /// ≥ 1.0, full precision.
    pub wait_time_min: f64,
    /// ≥ 5.0, full precision.
    pub ride_time_min: f64,
    /// ≥ 40.0, rounded to 2 decimals.  Charged by the meter whether or not
    /// the ride completed.
    pub fare_amount:   f64,
    pub driver_id:     DriverId,
    pub rider_id:      RiderId,
    pub outcome:       RideOutcome,
}

impl RideRecord {
    #[inline]
    pub fn is_completed(&self) -> bool {
        matches!(self.outcome, RideOutcome::Completed { .. })
    }

    #[inline]
    pub fn rating(&self) -> Option<f64> {
        match self.outcome {
            RideOutcome::Completed { rating } => Some(rating),
            RideOutcome::Cancelled { .. } => None,
        }
    }

    #[inline]
    pub fn cancellation_reason(&self) -> Option<CancellationReason> {
        match self.outcome {
            RideOutcome::Completed { .. } => None,
            RideOutcome::Cancelled { reason } => Some(reason),
        }
    }

    /// Peak state recomputed from the hour.
    #[inline]
    pub fn is_peak(&self) -> bool {
        is_peak_hour(self.hour_of_day)
    }
}
