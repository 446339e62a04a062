//! Outcome and pricing: completion, fare, rating, cancellation reason.

use rh_core::{RideRng, WeightedChoice};

use crate::{CancellationReason, ModelResult, TripPhysics};

// ── Completion ────────────────────────────────────────────────────────────────

pub const BASE_COMPLETION_PROB: f64 = 0.9;
pub const LONG_WAIT_MIN:        f64 = 8.0;
pub const LONG_WAIT_PENALTY:    f64 = 0.03;
pub const LONG_RIDE_MIN:        f64 = 40.0;
pub const LONG_RIDE_PENALTY:    f64 = 0.02;

/// `0.9 − 0.03·[wait > 8] − 0.02·[ride > 40]`.
///
/// Only four values are possible (0.85, 0.87, 0.88, 0.9); the result is
/// deliberately left unclamped.
pub fn completion_probability(wait_time_min: f64, ride_time_min: f64) -> f64 {
    let mut p = BASE_COMPLETION_PROB;
    if wait_time_min > LONG_WAIT_MIN {
        p -= LONG_WAIT_PENALTY;
    }
    if ride_time_min > LONG_RIDE_MIN {
        p -= LONG_RIDE_PENALTY;
    }
    p
}

/// Bernoulli(`p`) using one uniform draw: completed iff `u < p`.
#[inline]
pub fn sample_completed(p: f64, rng: &mut RideRng) -> bool {
    rng.random::<f64>() < p
}

// ── Fare ──────────────────────────────────────────────────────────────────────

pub const FARE_PER_KM:    f64 = 18.0;
pub const FARE_PER_MIN:   f64 = 1.2;
pub const PEAK_SURGE:     f64 = 1.4;
pub const FARE_NOISE_STD: f64 = 10.0;
pub const MIN_FARE:       f64 = 40.0;

#[inline]
pub fn surge_multiplier(is_peak: bool) -> f64 {
    if is_peak { PEAK_SURGE } else { 1.0 }
}

/// `max(40, round(distance·18·surge + ride_time·1.2 + noise, 2))`.
pub fn fare_amount(trip: &TripPhysics, is_peak: bool, noise: f64) -> f64 {
    let distance_part = trip.distance_km * FARE_PER_KM * surge_multiplier(is_peak);
    let time_part = trip.ride_time_min * FARE_PER_MIN;
    round_to(distance_part + time_part + noise, 2).max(MIN_FARE)
}

/// Draw the Normal(0, 10) fare noise and price the trip.
pub fn sample_fare(trip: &TripPhysics, is_peak: bool, rng: &mut RideRng) -> f64 {
    let noise = rng.normal(0.0, FARE_NOISE_STD);
    fare_amount(trip, is_peak, noise)
}

// ── Rating ────────────────────────────────────────────────────────────────────

pub const RATING_BASE:          f64 = 4.5;
pub const RATING_DECAY_PER_MIN: f64 = 0.02;
pub const RATING_STD:           f64 = 0.4;
pub const MIN_RATING:           f64 = 2.5;
pub const MAX_RATING:           f64 = 5.0;

#[inline]
pub fn expected_rating(wait_time_min: f64) -> f64 {
    RATING_BASE - RATING_DECAY_PER_MIN * wait_time_min
}

/// Gaussian around [`expected_rating`], clipped to `[2.5, 5.0]`, one decimal.
pub fn sample_rating(wait_time_min: f64, rng: &mut RideRng) -> f64 {
    let raw = rng.normal(expected_rating(wait_time_min), RATING_STD);
    round_to(raw.clamp(MIN_RATING, MAX_RATING), 1)
}

// ── Cancellation reason ───────────────────────────────────────────────────────

/// Single categorical draw over [`CancellationReason::ALL`].
#[derive(Clone, Debug)]
pub struct ReasonSampler(WeightedChoice);

impl ReasonSampler {
    pub fn new() -> ModelResult<Self> {
        Ok(Self(WeightedChoice::new(CancellationReason::WEIGHTS)?))
    }

    pub fn sample(&self, rng: &mut RideRng) -> CancellationReason {
        CancellationReason::ALL[rng.choose_index(&self.0)]
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Round half away from zero to `decimals` places (`0.125` → `0.13`, not
/// banker's rounding).
pub fn round_to(x: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (x * scale).round() / scale
}
