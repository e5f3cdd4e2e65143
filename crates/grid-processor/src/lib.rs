//! Granule Assembly and Regional Aggregation
//!
//! This crate turns a set of downloaded Level-3 granules into one scalar:
//!
//! ```text
//! granule paths
//!      │
//!      ▼
//! DatasetAssembler::assemble(paths)
//!      │
//!      ├─► Read each granule's field in parallel (GranuleSource)
//!      │
//!      ├─► Check every file has the same grid shape
//!      │
//!      ├─► Stack along time, mask fill values
//!      │
//!      └─► Attach lat/lon axes rebuilt from GridGeometry
//!               │
//!               ▼
//!        AssembledDataset (time × lat × lon)
//!               │
//!               ▼
//! RegionAggregator::aggregate(dataset, bbox)
//!      │
//!      ├─► Nearest-neighbor index window per axis
//!      │
//!      └─► Running mean over time/lat/lon, skipping missing values
//!               │
//!               ▼
//!          RegionMean
//! ```
//!
//! # Example
//!
//! ```ignore
//! use grid_processor::{DatasetAssembler, GridGeometry, NetCdfGranuleSource, RegionAggregator};
//!
//! let assembler = DatasetAssembler::new(
//!     Arc::new(NetCdfGranuleSource::omno2d()),
//!     GridGeometry::omi_quarter_degree(),
//! );
//! let dataset = assembler.assemble(&paths)?;
//! let mean = RegionAggregator::default().aggregate(&dataset, query.bounding_box())?;
//! ```

pub mod aggregate;
pub mod assembler;
pub mod dataset;
pub mod error;
pub mod geometry;
pub mod source;

// Re-export commonly used types at crate root
pub use aggregate::{RegionAggregator, RegionMean};
pub use assembler::DatasetAssembler;
pub use dataset::AssembledDataset;
pub use error::{AggregationError, AssemblyError};
pub use geometry::{reconstruct_axis, GridGeometry};
pub use source::{GranuleSource, NetCdfGranuleSource};
