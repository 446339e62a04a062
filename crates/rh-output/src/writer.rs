//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OutputResult, RideRow};

/// Trait implemented by CSV, SQLite, and Parquet writers.
///
/// Errors are returned to the caller; [`RideOutputObserver`] stores the
/// first one for [`take_error`].
///
/// [`RideOutputObserver`]: crate::RideOutputObserver
/// [`take_error`]: crate::RideOutputObserver::take_error
pub trait OutputWriter {
    /// Append a batch of rows, in order.
    fn write_rides(&mut self, rows: &[RideRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

impl<W: OutputWriter + ?Sized> OutputWriter for Box<W> {
    fn write_rides(&mut self, rows: &[RideRow]) -> OutputResult<()> {
        (**self).write_rides(rows)
    }

    fn finish(&mut self) -> OutputResult<()> {
        (**self).finish()
    }
}

/// Forwards every batch to each inner writer, in insertion order.
///
/// A failing writer does not stop the others from receiving the batch or
/// from being finished; the first error is returned.
#[derive(Default)]
pub struct FanOutWriter {
    writers: Vec<Box<dyn OutputWriter>>,
}

impl FanOutWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<W: OutputWriter + 'static>(&mut self, writer: W) {
        self.writers.push(Box::new(writer));
    }

    pub fn len(&self) -> usize {
        self.writers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }

    fn each(
        &mut self,
        mut f: impl FnMut(&mut dyn OutputWriter) -> OutputResult<()>,
    ) -> OutputResult<()> {
        let mut first = Ok(());
        for w in &mut self.writers {
            let result = f(w.as_mut());
            if first.is_ok() {
                first = result;
            }
        }
        first
    }
}

impl OutputWriter for FanOutWriter {
    fn write_rides(&mut self, rows: &[RideRow]) -> OutputResult<()> {
        self.each(|w| w.write_rides(rows))
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.each(|w| w.finish())
    }
}
