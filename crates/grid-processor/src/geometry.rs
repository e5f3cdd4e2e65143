//! Grid geometry and analytic coordinate reconstruction.
//!
//! Level-3 granules store bare `phony_dim` arrays. The coordinates are
//! implied by the product documentation: cell centres on a regular grid
//! starting at a known origin with a fixed resolution.

use serde::{Deserialize, Serialize};

use crate::error::AssemblyError;

/// Regular lat/lon grid, rows running south to north, columns west to east.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    /// Latitude of the first row's cell centre (degrees).
    pub lat_origin: f64,
    /// Longitude of the first column's cell centre (degrees).
    pub lon_origin: f64,
    /// Row spacing (degrees).
    pub lat_step: f64,
    /// Column spacing (degrees).
    pub lon_step: f64,
    pub n_lat: usize,
    pub n_lon: usize,
}

impl GridGeometry {
    /// OMI Level-3 global grid: 0.25° cells, 720 × 1440.
    pub fn omi_quarter_degree() -> Self {
        Self {
            lat_origin: -89.875,
            lon_origin: -179.875,
            lat_step: 0.25,
            lon_step: 0.25,
            n_lat: 720,
            n_lon: 1440,
        }
    }

    /// Latitude labels for every row.
    pub fn latitudes(&self) -> Vec<f64> {
        reconstruct_axis(self.lat_origin, self.lat_step, self.n_lat)
    }

    /// Longitude labels for every column.
    pub fn longitudes(&self) -> Vec<f64> {
        reconstruct_axis(self.lon_origin, self.lon_step, self.n_lon)
    }

    /// Check that both axes are non-empty and run strictly south to north,
    /// west to east. Region selection relies on ascending axes.
    pub fn validate(&self) -> Result<(), AssemblyError> {
        check_axis("lat", self.lat_origin, self.lat_step, self.n_lat)?;
        check_axis("lon", self.lon_origin, self.lon_step, self.n_lon)
    }

    /// Grid shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_lat, self.n_lon)
    }
}

fn check_axis(axis: &'static str, origin: f64, step: f64, count: usize) -> Result<(), AssemblyError> {
    let message = if count == 0 {
        "grid has no cells".to_string()
    } else if !origin.is_finite() {
        format!("origin {} is not finite", origin)
    } else if !(step.is_finite() && step > 0.0) {
        format!("step {} must be positive", step)
    } else {
        return Ok(());
    };
    Err(AssemblyError::InvalidAxis { axis, message })
}

fn axis_extent(origin: f64, step: f64, count: usize) -> (f64, f64) {
    let last = origin + count.saturating_sub(1) as f64 * step;
    (origin, last)
}

/// Evenly spaced labels from `origin` over `count` cells of width `step`.
///
/// Both endpoints are included and the final label is exactly
/// `origin + (count - 1) * step`, so the axis always spans the documented extent.
pub fn reconstruct_axis(origin: f64, step: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![origin],
        _ => {
            let (start, stop) = axis_extent(origin, step, count);
            let delta = (stop - start) / (count - 1) as f64;
            let mut axis: Vec<f64> = (0..count).map(|i| start + i as f64 * delta).collect();
            axis[count - 1] = stop;
            axis
        }
    }
}
