//! Native granule reading using the netcdf library.
//!
//! HDF-EOS5 granules are plain HDF5 underneath, so libnetcdf opens them as
//! netCDF-4 and exposes the EOS grid folders as nested groups.

use std::path::Path;
use std::sync::Once;

use tracing::debug;

use crate::error::{NetCdfError, NetCdfResult};
use crate::field::{FieldPath, GriddedField};

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when errors
/// are handled gracefully by the Rust code (e.g., when probing for optional
/// attributes that don't exist). This disables that output by calling
/// H5Eset_auto2 with null handlers. Call it early in `main()`, before any
/// HDF5/NetCDF operations occur; repeated calls are no-ops.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Read one 2-D science field from a granule on disk.
///
/// The file handle is closed before returning, on success and on error.
pub fn read_gridded_field<P: AsRef<Path>>(path: P, field: &FieldPath) -> NetCdfResult<GriddedField> {
    let path = path.as_ref();

    let nc_file = netcdf::open(path).map_err(|e| NetCdfError::OpenFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    // libnetcdf resolves slash separated names through nested groups
    let var = nc_file.variable(&field.full_path()).ok_or_else(|| {
        NetCdfError::MissingData(format!(
            "variable '{}' in group '{}'",
            field.variable, field.group
        ))
    })?;

    let dims: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    let (rows, cols) = match dims.as_slice() {
        [rows, cols] => (*rows, *cols),
        other => {
            return Err(NetCdfError::InvalidFormat(format!(
                "expected 2-D field '{}', found {} dimensions",
                field.variable,
                other.len()
            )))
        }
    };

    let values: Vec<f64> = var
        .get_values(..)
        .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to read {}: {}", field.variable, e)))?;

    if values.len() != rows * cols {
        return Err(NetCdfError::InvalidFormat(format!(
            "{} holds {} values, expected {}x{}",
            field.variable,
            values.len(),
            rows,
            cols
        )));
    }

    // HDF-EOS writers use both the netCDF and the EOS attribute spellings
    let fill_value = get_f64_attr(&var, "_FillValue").or_else(|| get_f64_attr(&var, "MissingValue"));
    let units = get_string_attr(&var, "Units").or_else(|| get_string_attr(&var, "units"));

    debug!(
        path = %path.display(),
        variable = %field.variable,
        rows = rows,
        cols = cols,
        fill_value = ?fill_value,
        "Read gridded field"
    );

    Ok(GriddedField {
        rows,
        cols,
        values,
        fill_value,
        units,
    })
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Helper to get a numeric attribute as f64.
fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f64::try_from(attr_value).ok()
}

/// Helper to get a string attribute.
fn get_string_attr(var: &netcdf::Variable, name: &str) -> Option<String> {
    if !has_attr(var, name) {
        return None;
    }
    match var.attribute_value(name)?.ok()? {
        netcdf::AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}
