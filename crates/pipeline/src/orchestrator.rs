//! The fault boundary around one real-data attempt.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{NaiveDate, Utc};
use earthdata_client::{CatalogClient, EarthdataSession};
use eo_common::{AggregationResult, ConfigurationError, QueryDescriptor, QueryPlanner};
use futures::{StreamExt, TryStreamExt};
use grid_processor::{DatasetAssembler, RegionAggregator, RegionMean};
use metrics::{counter, histogram};
use tempfile::TempDir;
use tracing::{info, instrument, warn};

use crate::failure::PipelineFailure;
use crate::fallback::FallbackSupplier;

/// Deadline for the whole real-data attempt.
pub const DEFAULT_PIPELINE_TIMEOUT: Duration = Duration::from_secs(120);

/// Granule downloads in flight at once.
pub const DEFAULT_DOWNLOAD_CONCURRENCY: usize = 4;

/// Runs plan → search → download → assemble → aggregate, degrading to the
/// fallback on any data failure.
///
/// Shared read-only between requests; each call owns its own scratch
/// directory and dataset.
pub struct Orchestrator {
    catalog: Arc<dyn CatalogClient>,
    session: EarthdataSession,
    assembler: DatasetAssembler,
    aggregator: RegionAggregator,
    planner: QueryPlanner,
    fallback: FallbackSupplier,
    timeout: Duration,
    download_concurrency: usize,
    scratch_root: Option<PathBuf>,
}

impl Orchestrator {
    pub fn new(
        catalog: Arc<dyn CatalogClient>,
        session: EarthdataSession,
        assembler: DatasetAssembler,
    ) -> Self {
        Self {
            catalog,
            session,
            assembler,
            aggregator: RegionAggregator::default(),
            planner: QueryPlanner::default(),
            fallback: FallbackSupplier::default(),
            timeout: DEFAULT_PIPELINE_TIMEOUT,
            download_concurrency: DEFAULT_DOWNLOAD_CONCURRENCY,
            scratch_root: None,
        }
    }

    pub fn with_planner(mut self, planner: QueryPlanner) -> Self {
        self.planner = planner;
        self
    }

    pub fn with_aggregator(mut self, aggregator: RegionAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackSupplier) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_download_concurrency(mut self, concurrency: usize) -> Self {
        self.download_concurrency = concurrency.max(1);
        self
    }

    /// Create per-request scratch directories under `root` instead of the
    /// system temp dir.
    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn planner(&self) -> &QueryPlanner {
        &self.planner
    }

    /// Analyse `region_name` for today.
    pub async fn run(&self, region_name: &str) -> Result<AggregationResult, ConfigurationError> {
        self.run_on(region_name, Utc::now().date_naive()).await
    }

    /// Analyse `region_name`, stamping the result with `today`.
    ///
    /// Returns `Err` only for configuration faults. Every other failure is
    /// logged with its category and answered with the simulated result.
    #[instrument(skip(self, today))]
    pub async fn run_on(
        &self,
        region_name: &str,
        today: NaiveDate,
    ) -> Result<AggregationResult, ConfigurationError> {
        let query = self.planner.plan(region_name)?;
        let started = Instant::now();

        let outcome = self.attempt_live(&query).await;
        histogram!("pipeline_duration_seconds").record(started.elapsed().as_secs_f64());

        match outcome {
            Ok(mean) => {
                counter!("pipeline_runs_total", "outcome" => "live").increment(1);
                info!(
                    region = query.region_name(),
                    value = mean.value,
                    samples = mean.sample_count,
                    time_steps = mean.time_steps,
                    "Computed regional mean from live data"
                );
                Ok(AggregationResult::live(
                    query.region_name(),
                    mean.value,
                    mean.unit,
                    today,
                ))
            }
            Err(failure) => {
                let category = failure.category();
                counter!("pipeline_runs_total", "outcome" => "simulated").increment(1);
                counter!("pipeline_fallbacks_total", "category" => category.as_str()).increment(1);
                warn!(
                    region = query.region_name(),
                    category = category.as_str(),
                    remote = category.is_remote(),
                    error = %failure,
                    "Falling back to simulated data"
                );
                Ok(self.fallback.supply(&query, today))
            }
        }
    }

    /// One real-data attempt for a planned query under the pipeline
    /// deadline, without the fallback.
    pub async fn attempt_live(&self, query: &QueryDescriptor) -> Result<RegionMean, PipelineFailure> {
        match tokio::time::timeout(self.timeout, self.attempt(query)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(PipelineFailure::Timeout(self.timeout)),
        }
    }

    /// The scratch directory and the cancel guard live in this future, so
    /// the deadline dropping it stops assembly and removes the granules.
    async fn attempt(&self, query: &QueryDescriptor) -> Result<RegionMean, PipelineFailure> {
        let scratch = self.scratch_dir()?;
        // Dropped before `scratch`.
        let cancel = CancelOnDrop::default();

        let granules = self.catalog.search(&self.session, query).await?;
        info!(count = granules.len(), "Downloading granules");

        let dest_dir = scratch.path().to_path_buf();
        let paths: Vec<PathBuf> = futures::stream::iter(granules)
            .map(|granule| {
                let catalog = Arc::clone(&self.catalog);
                let session = self.session.clone();
                let dest_dir = dest_dir.clone();
                async move { catalog.download(&session, &granule, &dest_dir).await }
            })
            .buffered(self.download_concurrency)
            .try_collect()
            .await?;

        let assembler = self.assembler.clone();
        let aggregator = self.aggregator.clone();
        let bbox = *query.bounding_box();
        let cancelled = cancel.flag();

        tokio::task::spawn_blocking(move || {
            let dataset = assembler.assemble_until(&paths, &cancelled)?;
            let mean = aggregator.aggregate(&dataset, &bbox)?;
            Ok::<_, PipelineFailure>(mean)
        })
        .await
        .map_err(|e| PipelineFailure::Unclassified(format!("processing task failed: {}", e)))?
    }

    fn scratch_dir(&self) -> Result<TempDir, PipelineFailure> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("no2-granules-");
        let dir = match &self.scratch_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        };
        dir.map_err(|e| PipelineFailure::Unclassified(format!("scratch directory: {}", e)))
    }
}

/// Raises its flag when dropped so a blocking assembly stops reading
/// granules once nobody waits for it.
#[derive(Default)]
struct CancelOnDrop(Arc<AtomicBool>);

impl CancelOnDrop {
    fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.0)
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}
