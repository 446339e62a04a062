use rh_core::RhError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] RhError),
}

pub type ModelResult<T> = Result<T, ModelError>;
