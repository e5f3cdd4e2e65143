//! Combines granule files into one time-stacked dataset.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use netcdf_parser::GriddedField;
use rayon::prelude::*;
use tracing::{debug, info, instrument};

use crate::dataset::AssembledDataset;
use crate::error::AssemblyError;
use crate::geometry::GridGeometry;
use crate::source::GranuleSource;

/// Joins granules along time and labels them with reconstructed coordinates.
#[derive(Clone)]
pub struct DatasetAssembler {
    source: Arc<dyn GranuleSource>,
    geometry: GridGeometry,
}

impl DatasetAssembler {
    pub fn new(source: Arc<dyn GranuleSource>, geometry: GridGeometry) -> Self {
        Self { source, geometry }
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Assemble `paths` (in time order) into one dataset.
    ///
    /// Every file must carry the same 2-D grid. Fill values are masked to NaN
    /// per file, so files written with different sentinels stack cleanly.
    pub fn assemble(&self, paths: &[PathBuf]) -> Result<AssembledDataset, AssemblyError> {
        self.assemble_until(paths, &AtomicBool::new(false))
    }

    /// Like [`assemble`](Self::assemble), but stops before reading another
    /// granule once `cancel` is set.
    #[instrument(skip(self, paths, cancel), fields(files = paths.len()))]
    pub fn assemble_until(
        &self,
        paths: &[PathBuf],
        cancel: &AtomicBool,
    ) -> Result<AssembledDataset, AssemblyError> {
        if paths.is_empty() {
            return Err(AssemblyError::EmptyInput);
        }
        self.geometry.validate()?;

        let fields: Vec<GriddedField> = paths
            .par_iter()
            .map(|path| {
                if cancel.load(Ordering::Relaxed) {
                    return Err(AssemblyError::Cancelled);
                }
                self.source.read_granule(path)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let (rows, cols) = fields[0].shape();
        for (path, field) in paths.iter().zip(&fields).skip(1) {
            if field.shape() != (rows, cols) {
                return Err(AssemblyError::format(
                    path.display().to_string(),
                    format!(
                        "grid is {}x{}, expected {}x{} like the first granule",
                        field.rows, field.cols, rows, cols
                    ),
                ));
            }
        }

        let times = fields.len();
        let units = fields.iter().find_map(|f| f.units.clone());
        let fill_value = fields[0].fill_value;

        // Each granule's buffer is freed as soon as it is stacked.
        let mut values = Vec::with_capacity(times * rows * cols);
        for field in fields {
            let fill = field.fill_value;
            values.extend(field.values.into_iter().map(|v| match fill {
                Some(fill) if v == fill => f64::NAN,
                _ => v,
            }));
        }

        debug!(
            times = times,
            rows = rows,
            cols = cols,
            "Stacked granules along time"
        );

        let dataset = AssembledDataset::new(
            self.source.variable(),
            (times, rows, cols),
            values,
            self.geometry.latitudes(),
            self.geometry.longitudes(),
        )?
        .with_units(units)
        .with_fill_value(fill_value);

        info!(
            times = times,
            rows = rows,
            cols = cols,
            "Assembled granule dataset"
        );

        Ok(dataset)
    }
}
