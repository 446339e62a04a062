//! `RideOutputObserver<W>` — bridges `GenObserver` to an `OutputWriter`.

use rh_core::ZoneSet;
use rh_gen::GenObserver;
use rh_model::RideRecord;
use tracing::debug;

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult, RideRow, RunSummary};

/// Rows buffered before a batch is handed to the writer.
pub const DEFAULT_BATCH_SIZE: usize = 1_024;

/// A [`GenObserver`] that flattens every record into a [`RideRow`], writes
/// rows in batches to any [`OutputWriter`] backend, and keeps a
/// [`RunSummary`].
///
/// Errors from the writer are stored internally because `GenObserver`
/// methods have no return value.  After `generator.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct RideOutputObserver<W: OutputWriter> {
    writer:     W,
    zones:      ZoneSet,
    buffer:     Vec<RideRow>,
    batch_size: usize,
    summary:    RunSummary,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> RideOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self::with_batch_size(writer, DEFAULT_BATCH_SIZE)
    }

    pub fn with_batch_size(writer: W, batch_size: usize) -> Self {
        Self {
            writer,
            zones:      ZoneSet::default(),
            buffer:     Vec::with_capacity(batch_size.max(1)),
            batch_size: batch_size.max(1),
            summary:    RunSummary::default(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `generator.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Totals over every record observed so far.
    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    fn flush_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let result = self.writer.write_rides(&self.buffer);
        self.buffer.clear();
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> GenObserver for RideOutputObserver<W> {
    fn on_run_start(&mut self, zones: &ZoneSet, _n_rides: u32) {
        self.zones = zones.clone();
    }

    fn on_record(&mut self, record: &RideRecord) {
        self.summary.add(record.is_completed(), record.fare_amount);

        match RideRow::from_record(record, &self.zones) {
            Ok(row) => self.buffer.push(row),
            Err(e) => self.store_err(Err(e)),
        }
        if self.buffer.len() >= self.batch_size {
            self.flush_buffer();
        }
    }

    fn on_run_end(&mut self, generated: u32) {
        self.flush_buffer();
        let result = self.writer.finish();
        self.store_err(result);
        debug!(generated, "output writer finished");
    }
}
