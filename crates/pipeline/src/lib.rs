//! NO2 analysis pipeline.
//!
//! [`Orchestrator::run`] plans the query for a region, searches and
//! downloads granules, assembles and aggregates them, and always returns an
//! [`AggregationResult`](eo_common::AggregationResult). Any data failure is
//! classified into a [`FailureCategory`] and replaced by the
//! [`FallbackSupplier`]'s simulated result. Only configuration errors
//! reach the caller.

pub mod failure;
pub mod fallback;
pub mod orchestrator;
pub mod risk;

pub use failure::{FailureCategory, PipelineFailure};
pub use fallback::{FallbackSupplier, SIMULATED_NO2_VALUE};
pub use orchestrator::{Orchestrator, DEFAULT_DOWNLOAD_CONCURRENCY, DEFAULT_PIPELINE_TIMEOUT};
pub use risk::{RiskAssessment, RiskLevel, NO2_RISK_THRESHOLD};
