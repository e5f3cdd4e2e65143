//! The assembled (time, latitude, longitude) dataset.

use crate::error::AssemblyError;

/// A field stacked along time with labelled spatial axes.
///
/// Values are stored time-major, then row (latitude), then column
/// (longitude). Construction enforces that each coordinate axis has exactly
/// as many labels as its data dimension.
#[derive(Debug, Clone)]
pub struct AssembledDataset {
    variable: String,
    units: Option<String>,
    fill_value: Option<f64>,
    times: usize,
    latitudes: Vec<f64>,
    longitudes: Vec<f64>,
    values: Vec<f64>,
}

impl AssembledDataset {
    /// Build a dataset of `shape = (times, rows, cols)`.
    pub fn new(
        variable: impl Into<String>,
        shape: (usize, usize, usize),
        values: Vec<f64>,
        latitudes: Vec<f64>,
        longitudes: Vec<f64>,
    ) -> Result<Self, AssemblyError> {
        let variable = variable.into();
        let (times, rows, cols) = shape;

        if values.len() != times * rows * cols {
            return Err(AssemblyError::format(
                variable.as_str(),
                format!(
                    "{} values cannot fill shape {}x{}x{}",
                    values.len(),
                    times,
                    rows,
                    cols
                ),
            ));
        }
        if latitudes.len() != rows {
            return Err(AssemblyError::CoordinateMismatch {
                axis: "lat",
                coords: latitudes.len(),
                len: rows,
            });
        }
        if longitudes.len() != cols {
            return Err(AssemblyError::CoordinateMismatch {
                axis: "lon",
                coords: longitudes.len(),
                len: cols,
            });
        }
        check_ascending("lat", &latitudes)?;
        check_ascending("lon", &longitudes)?;

        Ok(Self {
            variable,
            units: None,
            fill_value: None,
            times,
            latitudes,
            longitudes,
            values,
        })
    }

    pub fn with_units(mut self, units: Option<String>) -> Self {
        self.units = units;
        self
    }

    pub fn with_fill_value(mut self, fill_value: Option<f64>) -> Self {
        self.fill_value = fill_value;
        self
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    pub fn fill_value(&self) -> Option<f64> {
        self.fill_value
    }

    pub fn latitudes(&self) -> &[f64] {
        &self.latitudes
    }

    pub fn longitudes(&self) -> &[f64] {
        &self.longitudes
    }

    /// Shape as `(times, rows, cols)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.times, self.latitudes.len(), self.longitudes.len())
    }

    /// Value at time step `t`, row `i`, column `j`.
    pub fn get(&self, t: usize, i: usize, j: usize) -> Option<f64> {
        let (times, rows, cols) = self.shape();
        if t >= times || i >= rows || j >= cols {
            return None;
        }
        self.values.get((t * rows + i) * cols + j).copied()
    }

    /// One latitude row of one time step.
    pub(crate) fn row(&self, t: usize, i: usize) -> &[f64] {
        let (_, rows, cols) = self.shape();
        let start = (t * rows + i) * cols;
        &self.values[start..start + cols]
    }

    /// NaN or equal to the fill value.
    pub fn is_missing(&self, value: f64) -> bool {
        value.is_nan() || self.fill_value.map_or(false, |fill| value == fill)
    }
}

/// Region selection bisects the axes, so they must be finite and strictly
/// ascending.
fn check_ascending(axis: &'static str, coords: &[f64]) -> Result<(), AssemblyError> {
    if let Some(bad) = coords.iter().find(|c| !c.is_finite()) {
        return Err(AssemblyError::InvalidAxis {
            axis,
            message: format!("label {} is not finite", bad),
        });
    }
    if let Some(i) = coords.windows(2).position(|pair| pair[1] <= pair[0]) {
        return Err(AssemblyError::InvalidAxis {
            axis,
            message: format!(
                "labels must ascend, but {} follows {} at index {}",
                coords[i + 1],
                coords[i],
                i + 1
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_length_mismatch_is_error() {
        let err = AssembledDataset::new("x", (1, 2, 3), vec![0.0; 6], vec![0.0, 1.0, 2.0], vec![0.0; 3])
            .unwrap_err();
        assert_eq!(
            err,
            AssemblyError::CoordinateMismatch {
                axis: "lat",
                coords: 3,
                len: 2
            }
        );
    }

    #[test]
    fn test_descending_axis_is_error() {
        let err = AssembledDataset::new("x", (1, 3, 1), vec![0.0; 3], vec![2.0, 1.0, 0.0], vec![0.0])
            .unwrap_err();
        assert!(matches!(err, AssemblyError::InvalidAxis { axis: "lat", .. }));

        let err = AssembledDataset::new("x", (1, 1, 2), vec![0.0; 2], vec![0.0], vec![1.0, 1.0])
            .unwrap_err();
        assert!(matches!(err, AssemblyError::InvalidAxis { axis: "lon", .. }));
    }

    #[test]
    fn test_indexing() {
        let values: Vec<f64> = (0..12).map(f64::from).collect();
        let ds = AssembledDataset::new("x", (2, 2, 3), values, vec![0.0, 1.0], vec![0.0, 1.0, 2.0])
            .unwrap();
        assert_eq!(ds.get(0, 0, 0), Some(0.0));
        assert_eq!(ds.get(0, 1, 2), Some(5.0));
        assert_eq!(ds.get(1, 0, 1), Some(7.0));
        assert_eq!(ds.get(2, 0, 0), None);
        assert_eq!(ds.row(1, 1), &[9.0, 10.0, 11.0]);
    }

    #[test]
    fn test_missing_detection() {
        let ds = AssembledDataset::new("x", (1, 1, 1), vec![0.0], vec![0.0], vec![0.0])
            .unwrap()
            .with_fill_value(Some(-1.0e30));
        assert!(ds.is_missing(f64::NAN));
        assert!(ds.is_missing(-1.0e30));
        assert!(!ds.is_missing(0.0));
    }
}
