use thiserror::Error;

use crate::integration::{DefinitionError, IntegrationError};
use crate::validation::{SchemaError, ValidationError};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Definition error: {0}")]
    Definition(#[from] DefinitionError),
    #[error("Integration error: {0}")]
    Integration(#[from] IntegrationError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type InternalResult<T> = Result<T, Error>;

impl Error {
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Error::Internal(message.into())
    }
}
