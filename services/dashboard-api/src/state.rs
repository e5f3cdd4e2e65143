//! Application state for the dashboard API.

use std::sync::Arc;

use anyhow::{Context, Result};
use earthdata_client::{CmrClient, EarthdataSession};
use eo_common::QueryPlanner;
use grid_processor::{DatasetAssembler, GridGeometry, NetCdfGranuleSource};
use metrics_exporter_prometheus::PrometheusHandle;
use pipeline::Orchestrator;

use crate::config::DashboardConfig;

/// Shared application state. Read-only after startup.
pub struct AppState {
    pub orchestrator: Orchestrator,

    /// Renders the Prometheus exposition for `/metrics`.
    pub prometheus: PrometheusHandle,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator, prometheus: PrometheusHandle) -> Self {
        Self {
            orchestrator,
            prometheus,
        }
    }

    /// Wire the production pipeline: CMR catalog, netCDF granule reader and
    /// the OMI quarter-degree grid.
    pub fn from_config(
        config: &DashboardConfig,
        session: EarthdataSession,
        prometheus: PrometheusHandle,
    ) -> Result<Self> {
        let date_range = config
            .pipeline
            .date_range()
            .context("Invalid analysis period")?;
        let catalog =
            CmrClient::new(config.cmr.to_client_config()).context("Failed to build CMR client")?;
        let assembler = DatasetAssembler::new(
            Arc::new(NetCdfGranuleSource::omno2d()),
            GridGeometry::omi_quarter_degree(),
        );

        let orchestrator = Orchestrator::new(Arc::new(catalog), session, assembler)
            .with_planner(QueryPlanner::new(date_range))
            .with_timeout(config.pipeline.timeout())
            .with_download_concurrency(config.pipeline.download_concurrency);

        Ok(Self::new(orchestrator, prometheus))
    }
}
