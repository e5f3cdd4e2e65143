//! Remote catalog error types.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised while searching for or downloading granules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Credentials missing, expired or rejected.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Transport failure or unexpected server response.
    #[error("network error: {0}")]
    Network(String),

    /// No granules matched, or the granule file is gone.
    #[error("not found: {0}")]
    NotFound(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Network(err.to_string())
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Network(format!("local I/O: {}", err))
    }
}
