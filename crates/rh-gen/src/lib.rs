//! `rh-gen` — the generation loop.
//!
//! # Per-record pipeline
//!
//! ```text
//! for ride_id in 1..=n_rides:
//!   ① Temporal : timestamp, weekday, hour; is_peak from hour
//!   ② Spatial  : pickup, then drop ≠ pickup
//!   ③ Physics  : distance, wait, pace → duration
//!   ④ Outcome  : completion, fare, rating | reason, driver, rider
//!   → observer.on_record(&record)
//! ```
//!
//! The loop is single-threaded with no I/O; writers hang off the
//! [`GenObserver`] hooks.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rh_core::GeneratorConfig;
//! use rh_gen::{GeneratorBuilder, NoopObserver};
//!
//! let mut generator = GeneratorBuilder::new(GeneratorConfig::default()).build()?;
//! generator.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod generator;
pub mod observer;


pub use builder::GeneratorBuilder;
pub use error::{GenError, GenResult};
pub use generator::Generator;
pub use observer::{GenObserver, NoopObserver};
