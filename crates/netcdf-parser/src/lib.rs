//! Gridded field reader for satellite granules (OMI/Aura Level-3).
//!
//! Level-3 OMI products ship as HDF-EOS5 files, which libnetcdf opens as
//! netCDF-4. The science fields live several groups deep
//! (`HDFEOS/GRIDS/<grid>/Data Fields`) and carry no coordinate variables:
//! the dimensions are anonymous `phony_dim_N` axes, so callers must
//! reconstruct latitude/longitude from the product's documented geometry.
//!
//! This crate only extracts the raw 2-D field plus its fill value and unit.

pub mod error;
pub mod field;
pub mod native;

pub use error::{NetCdfError, NetCdfResult};
pub use field::{FieldPath, GriddedField};
pub use native::{read_gridded_field, silence_hdf5_errors};
