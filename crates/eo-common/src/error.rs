//! Configuration errors raised while planning a query.

use thiserror::Error;

/// A programmer or deployment fault: the request can never succeed, so it is
/// never converted into simulated data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Unknown region: '{0}'")]
    UnknownRegion(String),

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: String, end: String },
}
