//! Trip-physics sampler: distance, wait time and ride duration.
//!
//! Each quantity is a Gaussian (or pace-scaled) draw with a one-sided floor.
//! Floors clip, they never reject and redraw, so the number of stream draws
//! per ride is constant.

use rh_core::RideRng;

pub const DISTANCE_MEAN_PEAK_KM:     f64 = 8.0;
pub const DISTANCE_MEAN_OFF_PEAK_KM: f64 = 6.0;
pub const DISTANCE_STD_KM:           f64 = 3.0;
pub const MIN_DISTANCE_KM:           f64 = 1.0;

pub const WAIT_MEAN_PEAK_MIN:        f64 = 6.0;
pub const WAIT_MEAN_OFF_PEAK_MIN:    f64 = 4.0;
pub const WAIT_STD_MIN:              f64 = 2.0;
pub const MIN_WAIT_MIN:              f64 = 1.0;

/// Minutes per kilometre, drawn uniformly per ride.
pub const PACE_MIN_PER_KM:           (f64, f64) = (2.5, 3.5);
pub const MIN_RIDE_MIN:              f64 = 5.0;

/// Physical quantities of one trip, at full precision.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TripPhysics {
    pub distance_km:   f64,
    pub wait_time_min: f64,
    pub ride_time_min: f64,
}

/// Draw distance, wait and pace (in that order).
///
/// Duration is `distance × pace`, so it tracks distance by construction.
pub fn sample_physics(is_peak: bool, rng: &mut RideRng) -> TripPhysics {
    let distance_mean = if is_peak { DISTANCE_MEAN_PEAK_KM } else { DISTANCE_MEAN_OFF_PEAK_KM };
    let distance_km = rng.normal(distance_mean, DISTANCE_STD_KM).max(MIN_DISTANCE_KM);

    let wait_mean = if is_peak { WAIT_MEAN_PEAK_MIN } else { WAIT_MEAN_OFF_PEAK_MIN };
    let wait_time_min = rng.normal(wait_mean, WAIT_STD_MIN).max(MIN_WAIT_MIN);

    let pace = rng.uniform(PACE_MIN_PER_KM.0, PACE_MIN_PER_KM.1);
    let ride_time_min = (distance_km * pace).max(MIN_RIDE_MIN);

    TripPhysics { distance_km, wait_time_min, ride_time_min }
}
