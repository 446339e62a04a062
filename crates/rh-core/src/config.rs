//! Run configuration.

use chrono::NaiveDate;

use crate::time::today_local;
use crate::zone::DEFAULT_ZONES;
use crate::{GenerationWindow, RhError, RhResult, ZoneSet};

/// Largest accepted `n_rides`; the id after the last ride must still fit a `u32`.
pub const MAX_RIDES: u32 = u32::MAX - 1;

/// Top-level generator configuration.
///
/// Every value here is fixed for the whole run.  Typically built from
/// `Default`, optionally overlaid with a JSON file and CLI flags by the
/// application crate.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorConfig {
    /// Number of rides to generate.  Must be in `1..=MAX_RIDES`.
    pub n_rides: u32,

    /// Length of the historical window in whole days.  Must be ≥ 1.
    pub days: u32,

    /// Seed of the run's random stream.  The same seed always produces
    /// identical records.
    pub seed: u64,

    /// Ordered zone labels; at least two, all distinct.
    pub zones: Vec<String>,

    /// Drivers are drawn uniformly from `1..=driver_pool_size`.
    pub driver_pool_size: u32,

    /// Riders are drawn uniformly from `1..=rider_pool_size`.
    pub rider_pool_size: u32,

    /// Last day (exclusive) of the window.  `None` = today, local time.
    pub end_date: Option<NaiveDate>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            n_rides:          500,
            days:             7,
            seed:             42,
            zones:            DEFAULT_ZONES.iter().map(|s| s.to_string()).collect(),
            driver_pool_size: 80,
            rider_pool_size:  300,
            end_date:         None,
        }
    }
}

impl GeneratorConfig {
    /// Check every precondition of a run.  Called before any draw happens.
    pub fn validate(&self) -> RhResult<()> {
        if self.n_rides == 0 {
            return Err(RhError::Config("n_rides must be at least 1".into()));
        }
        if self.n_rides > MAX_RIDES {
            return Err(RhError::Config(format!("n_rides must be at most {MAX_RIDES}")));
        }
        if self.days == 0 {
            return Err(RhError::Config("days must be at least 1".into()));
        }
        if self.driver_pool_size == 0 {
            return Err(RhError::Config("driver_pool_size must be at least 1".into()));
        }
        if self.rider_pool_size == 0 {
            return Err(RhError::Config("rider_pool_size must be at least 1".into()));
        }
        self.zone_set().map(|_| ())
    }

    /// Validated zone set built from `zones`.
    pub fn zone_set(&self) -> RhResult<ZoneSet> {
        ZoneSet::new(self.zones.iter().cloned())
    }

    /// Resolve `end_date` (defaulting to today) into a concrete window.
    pub fn window(&self) -> RhResult<GenerationWindow> {
        let end = self.end_date.unwrap_or_else(today_local);
        GenerationWindow::ending_on(end, self.days)
    }
}
