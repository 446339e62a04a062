//! Temporal sampler: a minute-granular timestamp inside the window.

use chrono::{Datelike, NaiveDateTime, Weekday};
use rh_core::{GenerationWindow, RideRng, is_peak_hour};

/// Output of the temporal stage.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TemporalDraw {
    pub timestamp:   NaiveDateTime,
    pub day_of_week: Weekday,
    pub hour_of_day: u8,
}

impl TemporalDraw {
    #[inline]
    pub fn is_peak(&self) -> bool {
        is_peak_hour(self.hour_of_day)
    }
}

/// Draw day offset, hour and minute (in that order), each uniform.
pub fn sample_time(window: &GenerationWindow, rng: &mut RideRng) -> TemporalDraw {
    let day_offset: u32 = rng.gen_range(0..window.days);
    let hour: u8 = rng.gen_range(0..24);
    let minute: u8 = rng.gen_range(0..60);

    let timestamp = window.timestamp_at(day_offset, hour, minute);
    TemporalDraw {
        timestamp,
        day_of_week: timestamp.weekday(),
        hour_of_day: hour,
    }
}
