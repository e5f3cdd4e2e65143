//! Field locations and the raw grid read from one granule.

/// Group path and variable name of a science field inside a granule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    /// Slash separated group path, e.g. `HDFEOS/GRIDS/ColumnAmountNO2/Data Fields`.
    pub group: String,
    /// Variable name inside `group`.
    pub variable: String,
}

impl FieldPath {
    pub fn new(group: impl Into<String>, variable: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            variable: variable.into(),
        }
    }

    /// OMNO2d tropospheric NO2 column (cloud screened, 0.25° global grid).
    pub fn omno2d_tropospheric() -> Self {
        Self::new(
            "HDFEOS/GRIDS/ColumnAmountNO2/Data Fields",
            "ColumnAmountNO2Trop",
        )
    }

    /// Full path of the variable, usable directly with libnetcdf lookups.
    pub fn full_path(&self) -> String {
        let group = self.group.trim_matches('/');
        if group.is_empty() {
            self.variable.clone()
        } else {
            format!("{}/{}", group, self.variable)
        }
    }
}

/// A 2-D field as stored in the file, rows first.
///
/// Values are kept raw: fill values are not replaced, the consumer decides
/// how to treat them through `fill_value`.
#[derive(Debug, Clone, PartialEq)]
pub struct GriddedField {
    pub rows: usize,
    pub cols: usize,
    pub values: Vec<f64>,
    pub fill_value: Option<f64>,
    pub units: Option<String>,
}

impl GriddedField {
    /// Shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}
