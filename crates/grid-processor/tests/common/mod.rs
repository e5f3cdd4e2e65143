//! In-memory granule source shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use grid_processor::{AssemblyError, GranuleSource, GridGeometry};
use netcdf_parser::GriddedField;
use test_utils::fixtures::grid::GridFixture;

/// Serves pre-built fields keyed by path.
#[derive(Default)]
pub struct MemorySource {
    fields: HashMap<PathBuf, GriddedField>,
}

impl MemorySource {
    pub fn with(mut self, path: &str, field: GriddedField) -> Self {
        self.fields.insert(PathBuf::from(path), field);
        self
    }

    pub fn into_arc(self) -> Arc<dyn GranuleSource> {
        Arc::new(self)
    }
}

impl GranuleSource for MemorySource {
    fn variable(&self) -> &str {
        "ColumnAmountNO2Trop"
    }

    fn read_granule(&self, path: &Path) -> Result<GriddedField, AssemblyError> {
        self.fields
            .get(path)
            .cloned()
            .ok_or_else(|| AssemblyError::format(path.display().to_string(), "no such granule"))
    }
}

pub fn field(rows: usize, cols: usize, values: Vec<f64>, fill: Option<f64>) -> GriddedField {
    GriddedField {
        rows,
        cols,
        values,
        fill_value: fill,
        units: Some("molec/cm2".to_string()),
    }
}

pub fn geometry(fixture: GridFixture) -> GridGeometry {
    GridGeometry {
        lat_origin: fixture.lat_origin,
        lon_origin: fixture.lon_origin,
        lat_step: fixture.step,
        lon_step: fixture.step,
        n_lat: fixture.n_lat,
        n_lon: fixture.n_lon,
    }
}

pub fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}
