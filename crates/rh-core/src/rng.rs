//! Deterministic random stream and the weighted-choice primitive.
//!
//! # Determinism strategy
//!
//! Each generation run owns exactly one [`RideRng`], seeded from the
//! configured integer seed.  Nothing reads process-global randomness, so two
//! generators built from the same configuration produce identical records as
//! long as they consume the stream in the same order.  The per-record draw
//! order is fixed by `rh-model`:
//!
//! ```text
//! day → hour → minute → pickup → drop → distance → wait → pace
//!     → completion → fare noise → rating | reason → driver → rider
//! ```

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::{RhError, RhResult};

// ── RideRng ───────────────────────────────────────────────────────────────────

/// The single random stream of one generation run.
///
/// Not `Sync`: a run is strictly sequential and the stream is never shared.
pub struct RideRng(SmallRng);

impl RideRng {
    pub fn new(seed: u64) -> Self {
        RideRng(SmallRng::seed_from_u64(seed))
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    /// For `f64` this is uniform on `[0, 1)`.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Continuous uniform draw on `[low, high)`.
    #[inline]
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.0.gen_range(low..high)
    }

    /// Gaussian draw with the given mean and standard deviation.
    ///
    /// Scales a standard-normal variate instead of building a
    /// `rand_distr::Normal`, so there is no fallible constructor on the hot path.
    #[inline]
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let z: f64 = self.0.sample(StandardNormal);
        mean + std_dev * z
    }

    /// Draw an index from a prebuilt weight table.
    #[inline]
    pub fn choose_index(&mut self, choice: &WeightedChoice) -> usize {
        choice.0.sample(&mut self.0)
    }
}

// ── WeightedChoice ────────────────────────────────────────────────────────────

/// A categorical distribution over `0..len` built once from a weight table.
///
/// Shared by every "pick one from a filtered or weighted set" site: the
/// drop-zone draw (uniform weights with the pickup zone zeroed) and the
/// cancellation-reason draw.  Each sample consumes exactly one uniform draw
/// from the stream.  Construction is the only fallible step, so callers
/// validate their tables once, before generation starts.
#[derive(Clone, Debug)]
pub struct WeightedChoice(WeightedIndex<f64>);

impl WeightedChoice {
    /// Build from non-negative weights.  At least one weight must be positive.
    pub fn new<I>(weights: I) -> RhResult<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        WeightedIndex::new(weights)
            .map(WeightedChoice)
            .map_err(|e| RhError::Config(format!("invalid weight table: {e}")))
    }

    /// Uniform weights over `len` items with `excluded` given zero weight.
    pub fn uniform_excluding(len: usize, excluded: usize) -> RhResult<Self> {
        Self::new((0..len).map(|i| if i == excluded { 0.0 } else { 1.0 }))
    }
}
