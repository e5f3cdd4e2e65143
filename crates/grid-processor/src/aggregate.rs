//! Regional aggregation: nearest-neighbor windowing and a missing-aware mean.

use std::ops::RangeInclusive;

use eo_common::{canonical_no2_unit, BoundingBox};
use serde::Serialize;
use tracing::debug;

use crate::dataset::AssembledDataset;
use crate::error::AggregationError;

/// Mean of a field over a region and all time steps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionMean {
    pub value: f64,
    pub unit: String,
    /// Number of non-missing values that entered the mean.
    pub sample_count: usize,
    pub time_steps: usize,
    /// Selected latitude labels `(first, last)`.
    pub lat_window: (f64, f64),
    /// Selected longitude labels `(first, last)`.
    pub lon_window: (f64, f64),
}

/// Reduces an [`AssembledDataset`] to one value over a bounding box.
#[derive(Debug, Clone)]
pub struct RegionAggregator {
    default_unit: String,
}

impl Default for RegionAggregator {
    fn default() -> Self {
        Self::new(eo_common::NO2_UNIT)
    }
}

impl RegionAggregator {
    /// `default_unit` is reported when the dataset carries no unit of its own.
    /// A dataset unit is reported in its canonical spelling.
    pub fn new(default_unit: impl Into<String>) -> Self {
        Self {
            default_unit: default_unit.into(),
        }
    }

    /// Mean over the nearest-neighbor window of `bbox`, skipping NaN and
    /// fill values.
    pub fn aggregate(
        &self,
        dataset: &AssembledDataset,
        bbox: &BoundingBox,
    ) -> Result<RegionMean, AggregationError> {
        let (times, _, _) = dataset.shape();
        if times == 0 {
            return Err(AggregationError::EmptySelection(
                "dataset has no time steps".to_string(),
            ));
        }

        let lat_range = select_window(dataset.latitudes(), bbox.min_lat, bbox.max_lat)
            .ok_or_else(|| {
                AggregationError::EmptySelection(format!(
                    "latitude {}..{} outside grid",
                    bbox.min_lat, bbox.max_lat
                ))
            })?;
        let lon_range = select_window(dataset.longitudes(), bbox.min_lon, bbox.max_lon)
            .ok_or_else(|| {
                AggregationError::EmptySelection(format!(
                    "longitude {}..{} outside grid",
                    bbox.min_lon, bbox.max_lon
                ))
            })?;

        // Running mean: exact for constant fields and immune to sum overflow
        let mut mean = 0.0_f64;
        let mut count = 0_usize;
        for t in 0..times {
            for i in lat_range.clone() {
                let row = &dataset.row(t, i)[lon_range.clone()];
                for &value in row {
                    if dataset.is_missing(value) {
                        continue;
                    }
                    count += 1;
                    mean += (value - mean) / count as f64;
                }
            }
        }

        let selected = times * lat_range.clone().count() * lon_range.clone().count();
        debug!(
            selected = selected,
            valid = count,
            lat_rows = ?lat_range,
            lon_cols = ?lon_range,
            "Aggregated region"
        );

        if count == 0 {
            return Err(AggregationError::InvalidResult(format!(
                "all {} selected values are missing",
                selected
            )));
        }
        if !mean.is_finite() {
            return Err(AggregationError::InvalidResult(format!(
                "mean evaluated to {}",
                mean
            )));
        }

        let lats = dataset.latitudes();
        let lons = dataset.longitudes();
        Ok(RegionMean {
            value: mean,
            unit: dataset
                .units()
                .map(canonical_no2_unit)
                .unwrap_or_else(|| self.default_unit.clone()),
            sample_count: count,
            time_steps: times,
            lat_window: (lats[*lat_range.start()], lats[*lat_range.end()]),
            lon_window: (lons[*lon_range.start()], lons[*lon_range.end()]),
        })
    }
}

/// Index of the label closest to `target` on an ascending axis.
///
/// Ties resolve to the lower index. [`AssembledDataset`] only holds
/// ascending axes, so every axis reaching here satisfies that.
pub fn nearest_index(axis: &[f64], target: f64) -> Option<usize> {
    if axis.is_empty() || target.is_nan() {
        return None;
    }
    let upper = axis.partition_point(|&v| v < target);
    if upper == 0 {
        return Some(0);
    }
    if upper == axis.len() {
        return Some(axis.len() - 1);
    }
    let lower = upper - 1;
    if (target - axis[lower]).abs() <= (axis[upper] - target).abs() {
        Some(lower)
    } else {
        Some(upper)
    }
}

/// Inclusive index window for `[lo, hi]` on an ascending axis.
///
/// Each bound snaps to its nearest label. Returns `None` when the interval
/// is inverted or lies entirely outside the axis (allowing half a cell of
/// slack at either end).
fn select_window(axis: &[f64], lo: f64, hi: f64) -> Option<RangeInclusive<usize>> {
    if axis.is_empty() || lo.is_nan() || hi.is_nan() || lo > hi {
        return None;
    }
    let half_cell = if axis.len() > 1 {
        (axis[1] - axis[0]).abs() / 2.0
    } else {
        0.0
    };
    let first = axis[0] - half_cell;
    let last = axis[axis.len() - 1] + half_cell;
    if hi < first || lo > last {
        return None;
    }

    let start = nearest_index(axis, lo)?;
    let end = nearest_index(axis, hi)?;
    (start <= end).then_some(start..=end)
}
