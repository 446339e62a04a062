//! `rh-core` — foundational types for the ride-hailing data generator.
//!
//! This crate is a dependency of every other `rh-*` crate.  It intentionally
//! has no `rh-*` dependencies and few external ones (`rand`, `rand_distr`,
//! `chrono`, `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `RideId`, `DriverId`, `RiderId`, `ZoneId`             |
//! | [`rng`]         | `RideRng` (per-run stream), `WeightedChoice`          |
//! | [`time`]        | `GenerationWindow`, peak-hour bands, weekday names    |
//! | [`zone`]        | `ZoneSet`, the default zone list                      |
//! | [`config`]      | `GeneratorConfig`                                     |
//! | [`error`]       | `RhError`, `RhResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config and id types.     |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod zone;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{GeneratorConfig, MAX_RIDES};
pub use error::{RhError, RhResult};
pub use ids::{DriverId, RideId, RiderId, ZoneId};
pub use rng::{RideRng, WeightedChoice};
pub use time::{GenerationWindow, is_peak_hour, weekday_name};
pub use zone::{DEFAULT_ZONES, ZoneSet};
