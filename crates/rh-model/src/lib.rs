//! `rh-model` — the per-ride generative model.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`temporal`]  | timestamp draw inside the window, hour / weekday derivation   |
//! | [`spatial`]   | `ZoneSampler`: ordered (pickup, drop) pair, pickup ≠ drop     |
//! | [`physics`]   | distance, wait and pace-derived ride duration                 |
//! | [`outcome`]   | completion probability, fare, rating, cancellation reason     |
//! | [`record`]    | `RideRecord`, `RideOutcome`, `CancellationReason`             |
//! | [`model`]     | `RideModel` trait, `StandardRideModel`                        |
//! | [`error`]     | `ModelError`, `ModelResult<T>`                                |
//!
//! # Stage order
//!
//! One record is produced by four stages run in a fixed order, each consuming
//! outputs of the previous ones:
//!
//! ```text
//! temporal ─(hour → is_peak)─► spatial ─► physics ─► outcome & pricing
//! ```
//!
//! Peak state is never stored; every consumer recomputes it from the hour
//! with [`rh_core::is_peak_hour`].

pub mod error;
pub mod model;
pub mod outcome;
pub mod physics;
pub mod record;
pub mod spatial;
pub mod temporal;

#[cfg(test)]
mod tests;

pub use error::{ModelError, ModelResult};
pub use model::{RideModel, StandardRideModel};
pub use outcome::ReasonSampler;
pub use physics::TripPhysics;
pub use record::{CancellationReason, RideOutcome, RideRecord};
pub use spatial::ZoneSampler;
pub use temporal::TemporalDraw;
