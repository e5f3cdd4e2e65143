//! Common types shared across the NO2 analysis crates and services.
//!
//! - [`BoundingBox`]: geographic region of interest in WGS84 degrees
//! - [`Region`] / [`QueryPlanner`]: supported regions and the immutable
//!   [`QueryDescriptor`] built for them
//! - [`AggregationResult`]: the single record handed to presentation, real
//!   or simulated

pub mod bbox;
pub mod error;
pub mod query;
pub mod region;
pub mod result;

pub use bbox::BoundingBox;
pub use error::ConfigurationError;
pub use query::{DateRange, QueryDescriptor, QueryPlanner};
pub use region::Region;
pub use result::{canonical_no2_unit, AggregationResult, NO2_METRIC_NAME, NO2_UNIT};
