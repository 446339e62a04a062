//! The `Generator` and its per-record loop.

use rh_core::{MAX_RIDES, RideId, RideRng, ZoneSet};
use rh_model::{RideModel, RideRecord};
use tracing::{info, trace};

use crate::{GenError, GenObserver, GenResult};

/// Owns one run: the model, the random stream and the id counter.
///
/// Nothing else carries over between records.  `Generator` is also an
/// [`Iterator`] over the records still to be generated, so it can be
/// consumed lazily or collected.
///
/// Create via [`GeneratorBuilder`][crate::GeneratorBuilder], or
/// [`Generator::new`] for a custom [`RideModel`].
pub struct Generator<M: RideModel> {
    model:   M,
    rng:     RideRng,
    n_rides: u32,
    seed:    u64,
    next_id: RideId,
}

impl<M: RideModel> Generator<M> {
    /// Fails unless `n_rides` is in `1..=MAX_RIDES`.
    pub fn new(model: M, n_rides: u32, seed: u64) -> GenResult<Self> {
        if n_rides == 0 {
            return Err(GenError::Config("n_rides must be at least 1".into()));
        }
        if n_rides > MAX_RIDES {
            return Err(GenError::Config(format!("n_rides must be at most {MAX_RIDES}")));
        }
        Ok(Self {
            model,
            rng: RideRng::new(seed),
            n_rides,
            seed,
            next_id: RideId::FIRST,
        })
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn zones(&self) -> &ZoneSet {
        self.model.zones()
    }

    pub fn n_rides(&self) -> u32 {
        self.n_rides
    }

    /// Records not yet generated.
    pub fn remaining(&self) -> u32 {
        self.n_rides.saturating_sub(self.next_id.0 - 1)
    }

    /// Generate every remaining record, reporting each to `observer`.
    ///
    /// Returns the number of records generated by this call.
    pub fn run<O: GenObserver>(&mut self, observer: &mut O) -> u32 {
        info!(n_rides = self.n_rides, seed = self.seed, "generation started");
        observer.on_run_start(self.model.zones(), self.n_rides);

        let mut generated = 0u32;
        while let Some(record) = self.next_record() {
            observer.on_record(&record);
            generated += 1;
        }

        observer.on_run_end(generated);
        info!(generated, "generation finished");
        generated
    }

    /// Generate every remaining record into a `Vec`, in `ride_id` order.
    pub fn generate(&mut self) -> Vec<RideRecord> {
        let mut records = Vec::with_capacity(self.remaining() as usize);
        records.extend(self.by_ref());
        records
    }

    fn next_record(&mut self) -> Option<RideRecord> {
        if self.next_id.0 > self.n_rides {
            return None;
        }
        let id = self.next_id;
        let record = self.model.sample_ride(id, &mut self.rng);
        trace!(
            ride_id = id.0,
            hour = record.hour_of_day,
            completed = record.is_completed(),
            fare = record.fare_amount,
            "ride generated"
        );
        self.next_id = id.next();
        Some(record)
    }
}

impl<M: RideModel> Iterator for Generator<M> {
    type Item = RideRecord;

    fn next(&mut self) -> Option<RideRecord> {
        self.next_record()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining() as usize;
        (n, Some(n))
    }
}

impl<M: RideModel> ExactSizeIterator for Generator<M> {}
