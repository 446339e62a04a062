//! Generation window and calendar helpers.
//!
//! # Design
//!
//! Rides are stamped inside a window of `days` whole days that ends at the
//! start of the configured end date:
//!
//!   window_start = midnight(end_date) - days
//!
//! A timestamp is `window_start + day_offset·1d + hour·1h + minute·1min` with
//! `day_offset ∈ [0, days)`, so the window covers `[window_start, end_date)`
//! at minute granularity.  The peak/off-peak latent state is a pure function
//! of the hour and is never stored.

use std::fmt;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::{RhError, RhResult};

/// Inclusive hour bands considered peak: morning and evening commutes.
pub const PEAK_BANDS: [(u8, u8); 2] = [(7, 10), (17, 20)];

/// `true` iff `hour` falls in one of the [`PEAK_BANDS`].
#[inline]
pub fn is_peak_hour(hour: u8) -> bool {
    PEAK_BANDS.iter().any(|&(lo, hi)| (lo..=hi).contains(&hour))
}

/// Full English weekday name, as written to output rows.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Today's date in the local time zone.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

// ── GenerationWindow ──────────────────────────────────────────────────────────

/// The bounded historical window rides are stamped into.
///
/// Cheap to copy; holds no heap data.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GenerationWindow {
    /// Midnight at the start of the first day of the window.
    pub start: NaiveDateTime,
    /// Number of whole days covered.  Always ≥ 1.
    pub days: u32,
}

impl GenerationWindow {
    /// Window of `days` whole days ending at midnight of `end_date`.
    pub fn ending_on(end_date: NaiveDate, days: u32) -> RhResult<Self> {
        if days == 0 {
            return Err(RhError::Config("days must be at least 1".into()));
        }
        let start = end_date
            .checked_sub_days(chrono::Days::new(days as u64))
            .ok_or_else(|| RhError::Config(format!("{days} days before {end_date} is out of range")))?;
        Ok(Self { start: start.and_time(NaiveTime::MIN), days })
    }

    /// Timestamp at `day_offset` days, `hour` hours and `minute` minutes past
    /// the window start.
    ///
    /// Callers keep `day_offset < days`, `hour < 24`, `minute < 60`.
    pub fn timestamp_at(&self, day_offset: u32, hour: u8, minute: u8) -> NaiveDateTime {
        self.start
            + Duration::days(day_offset as i64)
            + Duration::hours(hour as i64)
            + Duration::minutes(minute as i64)
    }

    /// Exclusive upper bound of the window (midnight of the end date).
    pub fn end(&self) -> NaiveDateTime {
        self.start + Duration::days(self.days as i64)
    }

    #[inline]
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        ts >= self.start && ts < self.end()
    }
}

impl fmt::Display for GenerationWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {} ({} days)", self.start, self.end(), self.days)
    }
}
