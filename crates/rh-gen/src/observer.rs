//! Generator observer trait for progress reporting and data collection.

use rh_core::ZoneSet;
use rh_model::RideRecord;

/// Callbacks invoked by [`Generator::run`][crate::Generator::run].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u32 }
///
/// impl GenObserver for ProgressPrinter {
///     fn on_record(&mut self, record: &RideRecord) {
///         if record.ride_id.0 % self.interval == 0 {
///             println!("generated {}", record.ride_id);
///         }
///     }
/// }
/// ```
pub trait GenObserver {
    /// Called once before the first record.
    ///
    /// `zones` resolves the `ZoneId`s carried by every record of this run.
    fn on_run_start(&mut self, _zones: &ZoneSet, _n_rides: u32) {}

    /// Called once per record, in `ride_id` order, right after it is built.
    fn on_record(&mut self, _record: &RideRecord) {}

    /// Called once after the last record.
    fn on_run_end(&mut self, _generated: u32) {}
}

/// A [`GenObserver`] that does nothing.
pub struct NoopObserver;

impl GenObserver for NoopObserver {}
