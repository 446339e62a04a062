use rh_core::RhError;
use rh_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("generator configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] RhError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type GenResult<T> = Result<T, GenError>;
