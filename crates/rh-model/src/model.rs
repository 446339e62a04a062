//! The `RideModel` trait and the standard four-stage implementation.

use rh_core::{
    DriverId, GenerationWindow, GeneratorConfig, RideId, RideRng, RiderId, ZoneSet, is_peak_hour,
};

use crate::outcome::{completion_probability, sample_completed, sample_fare, sample_rating};
use crate::physics::sample_physics;
use crate::temporal::sample_time;
use crate::{ModelError, ModelResult, ReasonSampler, RideOutcome, RideRecord, ZoneSampler};

/// Turns draws from a [`RideRng`] into one [`RideRecord`].
///
/// Implementations hold only run-wide configuration; they never keep state
/// between records.  Reproducibility depends on `sample_ride` consuming the
/// stream in the same order every call.
pub trait RideModel {
    /// Build the record for `ride_id`.
    fn sample_ride(&self, ride_id: RideId, rng: &mut RideRng) -> RideRecord;

    /// Zone labels the produced `ZoneId`s refer to.
    fn zones(&self) -> &ZoneSet;
}

/// The standard model: temporal → spatial → physics → outcome & pricing.
#[derive(Clone, Debug)]
pub struct StandardRideModel {
    window:           GenerationWindow,
    zones:            ZoneSet,
    zone_sampler:     ZoneSampler,
    reasons:          ReasonSampler,
    driver_pool_size: u32,
    rider_pool_size:  u32,
}

impl StandardRideModel {
    /// Validate `config`, resolve its window and build all weight tables.
    pub fn from_config(config: &GeneratorConfig) -> ModelResult<Self> {
        config.validate()?;
        Self::new(
            config.window()?,
            config.zone_set()?,
            config.driver_pool_size,
            config.rider_pool_size,
        )
    }

    pub fn new(
        window:           GenerationWindow,
        zones:            ZoneSet,
        driver_pool_size: u32,
        rider_pool_size:  u32,
    ) -> ModelResult<Self> {
        if driver_pool_size == 0 || rider_pool_size == 0 {
            return Err(ModelError::Config(format!(
                "pool sizes must be at least 1 (drivers {driver_pool_size}, riders {rider_pool_size})"
            )));
        }
        Ok(Self {
            window,
            zone_sampler: ZoneSampler::new(&zones)?,
            zones,
            reasons: ReasonSampler::new()?,
            driver_pool_size,
            rider_pool_size,
        })
    }

    pub fn window(&self) -> &GenerationWindow {
        &self.window
    }
}

impl RideModel for StandardRideModel {
    fn sample_ride(&self, ride_id: RideId, rng: &mut RideRng) -> RideRecord {
        let when = sample_time(&self.window, rng);
        let is_peak = is_peak_hour(when.hour_of_day);

        let (pickup_zone, drop_zone) = self.zone_sampler.sample(rng);

        let trip = sample_physics(is_peak, rng);

        let p = completion_probability(trip.wait_time_min, trip.ride_time_min);
        let completed = sample_completed(p, rng);

        // Priced before the outcome matters: what the meter would have charged.
        let fare_amount = sample_fare(&trip, is_peak, rng);

        let outcome = if completed {
            RideOutcome::Completed { rating: sample_rating(trip.wait_time_min, rng) }
        } else {
            RideOutcome::Cancelled { reason: self.reasons.sample(rng) }
        };

        // Independent of everything above.
        let driver_id = DriverId(rng.gen_range(1..=self.driver_pool_size));
        let rider_id = RiderId(rng.gen_range(1..=self.rider_pool_size));

        RideRecord {
            ride_id,
            timestamp: when.timestamp,
            day_of_week: when.day_of_week,
            hour_of_day: when.hour_of_day,
            pickup_zone,
            drop_zone,
            distance_km: trip.distance_km,
            wait_time_min: trip.wait_time_min,
            ride_time_min: trip.ride_time_min,
            fare_amount,
            driver_id,
            rider_id,
            outcome,
        }
    }

    fn zones(&self) -> &ZoneSet {
        &self.zones
    }
}
