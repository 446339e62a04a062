//! Aggregation reports over persisted rides.
//!
//! Everything here is computed from [`RideRow`]s (what was written), never
//! from the generator.  Revenue figures count completed rides only; demand
//! figures count every ride.  The report is `Serialize` so a dashboard can
//! consume it as JSON.

use chrono::Weekday;
use rh_core::weekday_name;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::{RideRow, RunSummary};

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourCount {
    pub hour:  u8,
    pub rides: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneRevenue {
    pub zone:    String,
    pub revenue: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DriverRevenue {
    pub driver_id:       u32,
    pub completed_rides: u64,
    pub revenue:         f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourRate {
    pub hour: u8,
    /// Cancelled / total for that hour, in `[0, 1]`.
    pub rate: f64,
}

/// Ride counts for one weekday, indexed by hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapRow {
    pub day_of_week:   String,
    pub rides_by_hour: [u64; 24],
}

/// All aggregates the analysis stage reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RideReport {
    pub summary:                   RunSummary,
    pub completion_rate:           f64,
    /// 24 entries, hour 0 first.
    pub rides_by_hour:             Vec<HourCount>,
    /// Busiest hours, most rides first (ties: earlier hour first).
    pub top_hours:                 Vec<HourCount>,
    /// Completed-ride revenue per pickup zone, highest first.
    pub revenue_by_pickup_zone:    Vec<ZoneRevenue>,
    /// Completed-ride revenue per driver, by driver id.
    pub revenue_by_driver:         Vec<DriverRevenue>,
    /// Monday first; weekdays with no rides are all-zero rows.
    pub demand_heatmap:            Vec<HeatmapRow>,
    /// Hours with at least one ride, ascending.
    pub cancellation_rate_by_hour: Vec<HourRate>,
}

impl RideReport {
    /// Aggregate `rows`, keeping the `top_n` busiest hours.
    pub fn from_rows(rows: &[RideRow], top_n: usize) -> Self {
        let summary = RunSummary::from_rows(rows);

        let mut by_hour = [0u64; 24];
        let mut cancelled_by_hour = [0u64; 24];
        let mut heatmap = [[0u64; 24]; 7];
        let mut zone_revenue: FxHashMap<&str, f64> = FxHashMap::default();
        let mut driver_revenue: FxHashMap<u32, (u64, f64)> = FxHashMap::default();

        for row in rows {
            let h = row.hour_of_day as usize;
            if h >= 24 {
                continue;
            }
            by_hour[h] += 1;
            if let Some(d) = WEEK.iter().position(|&d| weekday_name(d) == row.day_of_week) {
                heatmap[d][h] += 1;
            }

            if row.completed() {
                *zone_revenue.entry(row.pickup_zone.as_str()).or_default() += row.fare_amount;
                let entry = driver_revenue.entry(row.driver_id).or_default();
                entry.0 += 1;
                entry.1 += row.fare_amount;
            } else {
                cancelled_by_hour[h] += 1;
            }
        }

        let rides_by_hour: Vec<HourCount> = (0..24u8)
            .map(|hour| HourCount { hour, rides: by_hour[hour as usize] })
            .collect();

        let mut top_hours = rides_by_hour.clone();
        top_hours.sort_by(|a, b| b.rides.cmp(&a.rides).then(a.hour.cmp(&b.hour)));
        top_hours.truncate(top_n);

        let mut revenue_by_pickup_zone: Vec<ZoneRevenue> = zone_revenue
            .into_iter()
            .map(|(zone, revenue)| ZoneRevenue { zone: zone.to_owned(), revenue })
            .collect();
        revenue_by_pickup_zone.sort_by(|a, b| {
            b.revenue.total_cmp(&a.revenue).then_with(|| a.zone.cmp(&b.zone))
        });

        let mut revenue_by_driver: Vec<DriverRevenue> = driver_revenue
            .into_iter()
            .map(|(driver_id, (completed_rides, revenue))| DriverRevenue {
                driver_id,
                completed_rides,
                revenue,
            })
            .collect();
        revenue_by_driver.sort_by_key(|d| d.driver_id);

        let demand_heatmap = WEEK
            .iter()
            .zip(heatmap)
            .map(|(&day, rides_by_hour)| HeatmapRow {
                day_of_week: weekday_name(day).to_owned(),
                rides_by_hour,
            })
            .collect();

        let cancellation_rate_by_hour = (0..24u8)
            .filter(|&h| by_hour[h as usize] > 0)
            .map(|hour| HourRate {
                hour,
                rate: cancelled_by_hour[hour as usize] as f64 / by_hour[hour as usize] as f64,
            })
            .collect();

        Self {
            completion_rate: summary.completion_rate(),
            summary,
            rides_by_hour,
            top_hours,
            revenue_by_pickup_zone,
            revenue_by_driver,
            demand_heatmap,
            cancellation_rate_by_hour,
        }
    }

    /// The `n` pickup zones with the most completed-ride revenue.
    pub fn top_zones(&self, n: usize) -> &[ZoneRevenue] {
        &self.revenue_by_pickup_zone[..n.min(self.revenue_by_pickup_zone.len())]
    }
}
