//! Headline numbers of a run: ride count, completion rate, revenue.

use std::fmt;

use serde::Serialize;

use crate::RideRow;

/// Running totals.  Revenue counts completed rides only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RunSummary {
    pub total_rides:     u64,
    pub completed_rides: u64,
    pub total_revenue:   f64,
}

impl RunSummary {
    #[inline]
    pub fn add(&mut self, completed: bool, fare_amount: f64) {
        self.total_rides += 1;
        if completed {
            self.completed_rides += 1;
            self.total_revenue += fare_amount;
        }
    }

    pub fn from_rows<'a, I: IntoIterator<Item = &'a RideRow>>(rows: I) -> Self {
        let mut s = Self::default();
        for r in rows {
            s.add(r.completed(), r.fare_amount);
        }
        s
    }

    /// Fraction of rides completed, in `[0, 1]`.  `0.0` for an empty run.
    pub fn completion_rate(&self) -> f64 {
        if self.total_rides == 0 {
            return 0.0;
        }
        self.completed_rides as f64 / self.total_rides as f64
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total rides: {}", self.total_rides)?;
        writeln!(f, "Completion rate: {:.1}%", self.completion_rate() * 100.0)?;
        write!(f, "Total revenue (₹): {}", group_thousands(self.total_revenue))
    }
}

/// `1234567.891` → `"1,234,567.89"`.
pub fn group_thousands(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}
