//! Pipeline failure taxonomy.

use std::fmt;
use std::time::Duration;

use earthdata_client::CatalogError;
use grid_processor::{AggregationError, AssemblyError};
use serde::Serialize;
use thiserror::Error;

/// Any failure of the real-data path. Every variant degrades to the
/// simulated result.
#[derive(Error, Debug)]
pub enum PipelineFailure {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    /// The real-data attempt ran past its deadline.
    #[error("pipeline did not finish within {0:?}")]
    Timeout(Duration),

    /// Panics, cancelled tasks and local setup failures.
    #[error("unclassified failure: {0}")]
    Unclassified(String),
}

impl PipelineFailure {
    pub fn category(&self) -> FailureCategory {
        match self {
            PipelineFailure::Catalog(CatalogError::Authentication(_)) => {
                FailureCategory::Authentication
            }
            PipelineFailure::Catalog(CatalogError::Network(_)) => FailureCategory::Network,
            PipelineFailure::Catalog(CatalogError::NotFound(_)) => FailureCategory::NotFound,
            PipelineFailure::Assembly(AssemblyError::EmptyInput) => FailureCategory::EmptyInput,
            PipelineFailure::Assembly(AssemblyError::Format { .. })
            | PipelineFailure::Assembly(AssemblyError::CoordinateMismatch { .. })
            | PipelineFailure::Assembly(AssemblyError::InvalidAxis { .. }) => {
                FailureCategory::Format
            }
            // only the deadline cancels assembly
            PipelineFailure::Assembly(AssemblyError::Cancelled) => FailureCategory::Timeout,
            PipelineFailure::Aggregation(AggregationError::EmptySelection(_)) => {
                FailureCategory::EmptySelection
            }
            PipelineFailure::Aggregation(AggregationError::InvalidResult(_)) => {
                FailureCategory::InvalidResult
            }
            PipelineFailure::Timeout(_) => FailureCategory::Timeout,
            PipelineFailure::Unclassified(_) => FailureCategory::Unclassified,
        }
    }
}

/// Enumerated reason a request fell back to simulated data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    Authentication,
    Network,
    NotFound,
    Format,
    EmptyInput,
    EmptySelection,
    InvalidResult,
    Timeout,
    Unclassified,
}

impl FailureCategory {
    /// Label used in logs and the `category` metric label.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureCategory::Authentication => "authentication",
            FailureCategory::Network => "network",
            FailureCategory::NotFound => "not_found",
            FailureCategory::Format => "format",
            FailureCategory::EmptyInput => "empty_input",
            FailureCategory::EmptySelection => "empty_selection",
            FailureCategory::InvalidResult => "invalid_result",
            FailureCategory::Timeout => "timeout",
            FailureCategory::Unclassified => "unclassified",
        }
    }

    /// True for failures of the remote catalog rather than local processing.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            FailureCategory::Authentication | FailureCategory::Network | FailureCategory::NotFound
        )
    }
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
