//! Test data generators for synthetic Level-3 granule grids.
//!
//! Grids are row-major, rows running south to north, matching the layout
//! of OMI Level-3 fields.

/// Creates a grid where every point inside `bbox` holds `value` and every
/// other point holds `fill`.
///
/// `bbox` is `(min_lon, min_lat, max_lon, max_lat)`, edges inclusive.
///
/// # Example
///
/// ```
/// use test_utils::create_region_grid;
///
/// let lats = [0.0, 1.0, 2.0];
/// let lons = [0.0, 1.0];
/// let grid = create_region_grid(&lats, &lons, (0.5, 0.5, 1.5, 1.5), 7.0, -1.0);
/// assert_eq!(grid, vec![-1.0, -1.0, -1.0, 7.0, -1.0, -1.0]);
/// ```
pub fn create_region_grid(
    lats: &[f64],
    lons: &[f64],
    bbox: (f64, f64, f64, f64),
    value: f64,
    fill: f64,
) -> Vec<f64> {
    let (min_lon, min_lat, max_lon, max_lat) = bbox;
    let mut data = Vec::with_capacity(lats.len() * lons.len());
    for &lat in lats {
        for &lon in lons {
            let inside = lon >= min_lon && lon <= max_lon && lat >= min_lat && lat <= max_lat;
            data.push(if inside { value } else { fill });
        }
    }
    data
}

/// Creates a grid filled with a single value.
pub fn create_constant_grid(rows: usize, cols: usize, value: f64) -> Vec<f64> {
    vec![value; rows * cols]
}

/// Creates a grid where each value is `row * 1000 + col`.
///
/// Handy for checking that windowing picked the right rows and columns.
pub fn create_index_grid(rows: usize, cols: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            data.push((row * 1000 + col) as f64);
        }
    }
    data
}

/// Replaces every `stride`-th value with `fill`, starting at index 0.
pub fn punch_holes(mut data: Vec<f64>, stride: usize, fill: f64) -> Vec<f64> {
    if stride == 0 {
        return data;
    }
    for value in data.iter_mut().step_by(stride) {
        *value = fill;
    }
    data
}
