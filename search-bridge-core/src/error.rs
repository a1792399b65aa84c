use thiserror::Error;

use crate::backend::BackendError;

pub type Result<T, E = AdapterError> = std::result::Result<T, E>;

/// Adapter errors
#[derive(Error, Debug)]
pub enum AdapterError {
    /// Caller passed the wrong number or types of arguments.
    /// Raised before the backend is touched.
    #[error("{0}")]
    InvalidArguments(String),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Failed to marshal search response: {0}")]
    Marshal(#[from] serde_json::Error),
}

impl AdapterError {
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        AdapterError::InvalidArguments(message.into())
    }

    pub fn is_caller_error(&self) -> bool {
        matches!(self, AdapterError::InvalidArguments(_))
    }
}
