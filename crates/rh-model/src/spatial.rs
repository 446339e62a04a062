//! Spatial sampler: ordered (pickup, drop) zone pair with pickup ≠ drop.

use rh_core::{RideRng, WeightedChoice, ZoneId, ZoneSet};

use crate::ModelResult;

/// Precomputed drop-zone tables, one per possible pickup zone.
///
/// Table `i` has uniform weight on every zone except `i`, which has weight 0,
/// so the drop draw can never repeat the pickup.  Building the tables is the
/// only fallible step; sampling is infallible.
#[derive(Clone, Debug)]
pub struct ZoneSampler {
    drop_tables: Vec<WeightedChoice>,
}

impl ZoneSampler {
    pub fn new(zones: &ZoneSet) -> ModelResult<Self> {
        let n = zones.len();
        let drop_tables = (0..n)
            .map(|pickup| WeightedChoice::uniform_excluding(n, pickup))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { drop_tables })
    }

    /// Pickup uniform over all zones, then drop uniform over the rest.
    pub fn sample(&self, rng: &mut RideRng) -> (ZoneId, ZoneId) {
        let pickup = rng.gen_range(0..self.drop_tables.len());
        let drop = rng.choose_index(&self.drop_tables[pickup]);
        debug_assert_ne!(pickup, drop);
        (ZoneId(pickup as u16), ZoneId(drop as u16))
    }
}
