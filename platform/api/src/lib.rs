use std::sync::Arc;

use async_graphql::{Error, ErrorExtensions};
use thiserror::Error;

/// Shared result type for repository and GraphQL operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error taxonomy surfaced by every store-backed operation. `Validation`
/// messages reach the client verbatim; `Internal` detail never does.
#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("store connection failed")]
    Connection,
    #[error("{0}")]
    Validation(String),
    #[error("resource not found")]
    NotFound,
    #[error("internal server error")]
    Internal(Arc<anyhow::Error>),
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::Connection => "CONNECTION",
            ApiError::Validation(_) => "VALIDATION",
            ApiError::NotFound => "NOT_FOUND",
            ApiError::Internal(_) => "INTERNAL",
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal(err: anyhow::Error) -> Self {
        Self::Internal(Arc::new(err))
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self::internal(value)
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> Error {
        Error::new(self.to_string()).extend_with(|_err, e| {
            e.set("code", self.code());
        })
    }
}

/// Convert any error into a GraphQL error payload while hiding internals.
pub fn internal_error(err: impl Into<anyhow::Error>) -> Error {
    ApiError::internal(err.into()).extend()
}
