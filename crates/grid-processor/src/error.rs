//! Error types for dataset assembly and aggregation.

use thiserror::Error;

/// Errors raised while combining granule files into one dataset.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssemblyError {
    /// No granule files were supplied.
    #[error("no granule files to assemble")]
    EmptyInput,

    /// A granule could not be read or does not match the others.
    #[error("granule format error in {path}: {message}")]
    Format { path: String, message: String },

    /// A coordinate axis does not match the data dimension it labels.
    #[error("coordinate axis '{axis}' has {coords} labels but the data dimension has {len}")]
    CoordinateMismatch {
        axis: &'static str,
        coords: usize,
        len: usize,
    },

    /// A coordinate axis is not strictly ascending, or the grid geometry
    /// that would produce it is degenerate.
    #[error("coordinate axis '{axis}' is invalid: {message}")]
    InvalidAxis {
        axis: &'static str,
        message: String,
    },

    /// Assembly was abandoned before every granule was read.
    #[error("assembly cancelled")]
    Cancelled,
}

impl AssemblyError {
    /// Create a Format error.
    pub fn format(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Errors raised while reducing a dataset over a region.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregationError {
    /// The region selects no grid points.
    #[error("region selects no grid points: {0}")]
    EmptySelection(String),

    /// Every selected value was missing, or the mean is not a number.
    #[error("regional mean is undefined: {0}")]
    InvalidResult(String),
}
