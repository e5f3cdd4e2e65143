//! Granule sources: where assembly gets each file's raw field from.

use std::path::Path;

use netcdf_parser::{read_gridded_field, FieldPath, GriddedField};

use crate::error::AssemblyError;

/// Reads the science field out of one local granule file.
///
/// Implementations must be shareable across rayon worker threads.
pub trait GranuleSource: Send + Sync {
    /// Name of the field this source extracts.
    fn variable(&self) -> &str;

    fn read_granule(&self, path: &Path) -> Result<GriddedField, AssemblyError>;
}

/// Reads granules from disk through libnetcdf.
#[derive(Debug, Clone)]
pub struct NetCdfGranuleSource {
    field: FieldPath,
}

impl NetCdfGranuleSource {
    pub fn new(field: FieldPath) -> Self {
        Self { field }
    }

    /// OMNO2d tropospheric column field.
    pub fn omno2d() -> Self {
        Self::new(FieldPath::omno2d_tropospheric())
    }

    pub fn field(&self) -> &FieldPath {
        &self.field
    }
}

impl GranuleSource for NetCdfGranuleSource {
    fn variable(&self) -> &str {
        &self.field.variable
    }

    fn read_granule(&self, path: &Path) -> Result<GriddedField, AssemblyError> {
        read_gridded_field(path, &self.field)
            .map_err(|e| AssemblyError::format(path.display().to_string(), e.to_string()))
    }
}
