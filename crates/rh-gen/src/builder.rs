//! Fluent builder for constructing a [`Generator`].

use chrono::NaiveDate;
use rh_core::GeneratorConfig;
use rh_model::StandardRideModel;
use tracing::debug;

use crate::{Generator, GenResult};

/// Fluent builder for [`Generator<StandardRideModel>`].
///
/// All configuration is validated in [`build`](Self::build), before a single
/// draw is taken, so an invalid run produces no partial output.
///
/// # Optional inputs (override the config)
///
/// | Method            | Default                        |
/// |-------------------|--------------------------------|
/// | `.end_date(d)`    | `config.end_date`, else today  |
/// | `.seed(s)`        | `config.seed`                  |
/// | `.n_rides(n)`     | `config.n_rides`               |
///
/// # Example
///
/// ```rust,ignore
/// let mut generator = GeneratorBuilder::new(GeneratorConfig::default())
///     .end_date(NaiveDate::from_ymd_opt(2024, 6, 8).unwrap())
///     .build()?;
/// let rides = generator.generate();
/// ```
pub struct GeneratorBuilder {
    config: GeneratorConfig,
}

impl GeneratorBuilder {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Pin the window end so timestamps are reproducible too.
    pub fn end_date(mut self, date: NaiveDate) -> Self {
        self.config.end_date = Some(date);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn n_rides(mut self, n_rides: u32) -> Self {
        self.config.n_rides = n_rides;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Validate the configuration, resolve the window and build the model.
    pub fn build(self) -> GenResult<Generator<StandardRideModel>> {
        self.config.validate()?;
        let model = StandardRideModel::from_config(&self.config)?;
        debug!(
            window = %model.window(),
            zones = self.config.zones.len(),
            "generator built"
        );
        Generator::new(model, self.config.n_rides, self.config.seed)
    }
}
