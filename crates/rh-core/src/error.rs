//! Generator error type.
//!
//! Sub-crates define their own error enums and wrap `RhError` as one variant
//! via `#[from]`, so configuration failures surface unchanged at the top.

use thiserror::Error;

/// The top-level error type for `rh-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum RhError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `rh-*` crates.
pub type RhResult<T> = Result<T, RhError>;
