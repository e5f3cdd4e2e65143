//! End-to-end orchestrator behavior with an in-process catalog.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use earthdata_client::{CatalogClient, CatalogError, CatalogResult, EarthdataSession, GranuleHandle};
use eo_common::{ConfigurationError, QueryDescriptor, NO2_UNIT};
use grid_processor::{AssemblyError, DatasetAssembler, GranuleSource, GridGeometry, RegionMean};
use netcdf_parser::GriddedField;
use pipeline::{FailureCategory, Orchestrator, PipelineFailure, SIMULATED_NO2_VALUE};

/// 0.25° grid around California: lat 30.125..44.875, lon -127.875..-113.125.
fn california_geometry() -> GridGeometry {
    GridGeometry {
        lat_origin: 30.125,
        lon_origin: -127.875,
        lat_step: 0.25,
        lon_step: 0.25,
        n_lat: 60,
        n_lon: 60,
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 2).unwrap()
}

fn granules(n: usize) -> Vec<GranuleHandle> {
    (1..=n)
        .map(|day| GranuleHandle {
            id: format!("G{day}-GES_DISC"),
            title: format!("OMI-Aura_L3-OMNO2d_2025m09{day:02}_v003.he5"),
            url: format!("https://data.example/OMI-Aura_L3-OMNO2d_2025m09{day:02}_v003.he5"),
        })
        .collect()
}

/// Catalog double: canned search result, downloads write empty files.
struct StubCatalog {
    search: CatalogResult<Vec<GranuleHandle>>,
    fail_download_after: Option<(usize, CatalogError)>,
    search_delay: Option<Duration>,
    downloads: Mutex<Vec<PathBuf>>,
}

impl StubCatalog {
    fn returning(search: CatalogResult<Vec<GranuleHandle>>) -> Self {
        Self {
            search,
            fail_download_after: None,
            search_delay: None,
            downloads: Mutex::new(Vec::new()),
        }
    }

    fn downloaded(&self) -> Vec<PathBuf> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogClient for StubCatalog {
    async fn search(
        &self,
        _session: &EarthdataSession,
        _query: &QueryDescriptor,
    ) -> CatalogResult<Vec<GranuleHandle>> {
        if let Some(delay) = self.search_delay {
            tokio::time::sleep(delay).await;
        }
        self.search.clone()
    }

    async fn download(
        &self,
        _session: &EarthdataSession,
        granule: &GranuleHandle,
        dest_dir: &Path,
    ) -> CatalogResult<PathBuf> {
        if let Some((limit, err)) = &self.fail_download_after {
            if self.downloads.lock().unwrap().len() >= *limit {
                return Err(err.clone());
            }
        }
        let path = dest_dir.join(granule.file_name());
        std::fs::write(&path, b"granule")?;
        self.downloads.lock().unwrap().push(path.clone());
        Ok(path)
    }
}

/// Every granule holds the same constant value; the file must exist.
struct ConstantSource {
    value: f64,
}

impl GranuleSource for ConstantSource {
    fn variable(&self) -> &str {
        "ColumnAmountNO2Trop"
    }

    fn read_granule(&self, path: &Path) -> Result<GriddedField, AssemblyError> {
        if !path.exists() {
            return Err(AssemblyError::format(path.display().to_string(), "missing"));
        }
        let (rows, cols) = california_geometry().shape();
        Ok(GriddedField {
            rows,
            cols,
            values: vec![self.value; rows * cols],
            fill_value: None,
            units: None,
        })
    }
}

/// Takes `delay` per granule, like a large file on a slow disk.
struct SlowSource {
    delay: Duration,
}

impl GranuleSource for SlowSource {
    fn variable(&self) -> &str {
        "ColumnAmountNO2Trop"
    }

    fn read_granule(&self, path: &Path) -> Result<GriddedField, AssemblyError> {
        std::thread::sleep(self.delay);
        ConstantSource { value: 1.0e15 }.read_granule(path)
    }
}

struct PanickingSource;

impl GranuleSource for PanickingSource {
    fn variable(&self) -> &str {
        "ColumnAmountNO2Trop"
    }

    fn read_granule(&self, _path: &Path) -> Result<GriddedField, AssemblyError> {
        panic!("corrupt chunk index");
    }
}

fn orchestrator(catalog: Arc<StubCatalog>, source: Arc<dyn GranuleSource>) -> Orchestrator {
    Orchestrator::new(
        catalog,
        EarthdataSession::with_token("test"),
        DatasetAssembler::new(source, california_geometry()),
    )
}

fn constant(value: f64) -> Arc<dyn GranuleSource> {
    Arc::new(ConstantSource { value })
}

fn dir_is_empty(dir: &Path) -> bool {
    std::fs::read_dir(dir).unwrap().next().is_none()
}

fn assert_send<T: Send>(_: &T) {}

/// The live attempt for California, without the fallback.
async fn attempt(orchestrator: &Orchestrator) -> Result<RegionMean, PipelineFailure> {
    let query = orchestrator.planner().plan("california").unwrap();
    orchestrator.attempt_live(&query).await
}

#[tokio::test]
async fn test_consistent_granules_give_live_mean() {
    let catalog = Arc::new(StubCatalog::returning(Ok(granules(3))));
    let result = orchestrator(catalog.clone(), constant(2.5e-5))
        .run_on("california", today())
        .await
        .unwrap();

    assert!(!result.is_simulated);
    assert_eq!(result.value, 2.5e-5);
    assert_eq!(result.unit, NO2_UNIT);
    assert_eq!(result.analysis_date, "2025-10-02 (Live)");
    assert_eq!(catalog.downloaded().len(), 3);
}

#[tokio::test]
async fn test_downloads_keep_search_order() {
    let catalog = Arc::new(StubCatalog::returning(Ok(granules(5))));
    orchestrator(catalog.clone(), constant(1.0e15))
        .with_download_concurrency(1)
        .run_on("california", today())
        .await
        .unwrap();

    let names: Vec<String> = catalog
        .downloaded()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names[0], "OMI-Aura_L3-OMNO2d_2025m0901_v003.he5");
    assert_eq!(names[4], "OMI-Aura_L3-OMNO2d_2025m0905_v003.he5");
}

#[tokio::test]
async fn test_network_failure_falls_back_with_same_shape() {
    let live = orchestrator(
        Arc::new(StubCatalog::returning(Ok(granules(1)))),
        constant(1.0e15),
    )
    .run_on("california", today())
    .await
    .unwrap();

    let simulated = orchestrator(
        Arc::new(StubCatalog::returning(Err(CatalogError::Network(
            "connection reset".into(),
        )))),
        constant(1.0e15),
    )
    .run_on("california", today())
    .await
    .unwrap();

    assert!(simulated.is_simulated);
    assert_eq!(simulated.value, SIMULATED_NO2_VALUE);
    assert_eq!(simulated.analysis_date, "2025-10-02 (Simulated)");
    assert_eq!(simulated.metric_name, live.metric_name);
    assert_eq!(simulated.unit, live.unit);
    assert_eq!(simulated.region_name, live.region_name);
}

#[tokio::test]
async fn test_empty_granule_list_falls_back() {
    let result = orchestrator(
        Arc::new(StubCatalog::returning(Ok(Vec::new()))),
        constant(1.0e15),
    )
    .run_on("california", today())
    .await
    .unwrap();

    assert!(result.is_simulated);
}

#[tokio::test]
async fn test_unknown_region_is_not_absorbed() {
    let catalog = Arc::new(StubCatalog::returning(Ok(granules(1))));
    let err = orchestrator(catalog.clone(), constant(1.0e15))
        .run_on("atlantis", today())
        .await
        .unwrap_err();

    assert_eq!(err, ConfigurationError::UnknownRegion("atlantis".into()));
    assert!(catalog.downloaded().is_empty());
}

#[tokio::test]
async fn test_download_rejection_falls_back() {
    let mut stub = StubCatalog::returning(Ok(granules(3)));
    stub.fail_download_after = Some((0, CatalogError::Authentication("401".into())));

    let result = orchestrator(Arc::new(stub), constant(1.0e15))
        .run_on("california", today())
        .await
        .unwrap();

    assert!(result.is_simulated);
}

#[tokio::test]
async fn test_deadline_falls_back() {
    let mut stub = StubCatalog::returning(Ok(granules(1)));
    stub.search_delay = Some(Duration::from_secs(30));

    let result = orchestrator(Arc::new(stub), constant(1.0e15))
        .with_timeout(Duration::from_millis(50))
        .run_on("california", today())
        .await
        .unwrap();

    assert!(result.is_simulated);
}

#[tokio::test]
async fn test_processing_panic_falls_back() {
    let result = orchestrator(
        Arc::new(StubCatalog::returning(Ok(granules(2)))),
        Arc::new(PanickingSource),
    )
    .run_on("california", today())
    .await
    .unwrap();

    assert!(result.is_simulated);
}

#[tokio::test]
async fn test_scratch_directory_removed_after_success() {
    let root = tempfile::tempdir().unwrap();
    let catalog = Arc::new(StubCatalog::returning(Ok(granules(2))));

    let result = orchestrator(catalog.clone(), constant(1.0e15))
        .with_scratch_root(root.path())
        .run_on("california", today())
        .await
        .unwrap();

    assert!(!result.is_simulated);
    assert!(catalog.downloaded().iter().all(|p| p.starts_with(root.path())));
    assert!(catalog.downloaded().iter().all(|p| !p.exists()));
    assert!(dir_is_empty(root.path()));
}

#[tokio::test]
async fn test_scratch_directory_removed_after_failure() {
    let root = tempfile::tempdir().unwrap();
    let mut stub = StubCatalog::returning(Ok(granules(3)));
    stub.fail_download_after = Some((1, CatalogError::Network("reset".into())));
    let catalog = Arc::new(stub);

    let result = orchestrator(catalog.clone(), constant(1.0e15))
        .with_download_concurrency(1)
        .with_scratch_root(root.path())
        .run_on("california", today())
        .await
        .unwrap();

    assert!(result.is_simulated);
    assert_eq!(catalog.downloaded().len(), 1);
    assert!(dir_is_empty(root.path()));
}

#[test]
fn test_run_future_is_send() {
    // axum handlers and tokio::spawn both need this
    let orchestrator = orchestrator(
        Arc::new(StubCatalog::returning(Ok(granules(1)))),
        constant(1.0e15),
    );
    let run = orchestrator.run("california");
    assert_send(&run);
    let query = orchestrator.planner().plan("california").unwrap();
    let attempt = orchestrator.attempt_live(&query);
    assert_send(&attempt);
}

#[tokio::test]
async fn test_run_can_be_spawned() {
    let orchestrator = Arc::new(orchestrator(
        Arc::new(StubCatalog::returning(Ok(granules(2)))),
        constant(1.0e15),
    ));
    let task = {
        let orchestrator = Arc::clone(&orchestrator);
        tokio::spawn(async move { orchestrator.run_on("california", today()).await })
    };
    let result = task.await.unwrap().unwrap();
    assert!(!result.is_simulated);
}

#[tokio::test]
async fn test_deadline_during_assembly_removes_scratch_directory() {
    let root = tempfile::tempdir().unwrap();
    let catalog = Arc::new(StubCatalog::returning(Ok(granules(2))));

    let result = orchestrator(
        catalog.clone(),
        Arc::new(SlowSource {
            delay: Duration::from_secs(2),
        }),
    )
    .with_download_concurrency(1)
    .with_timeout(Duration::from_millis(300))
    .with_scratch_root(root.path())
    .run_on("california", today())
    .await
    .unwrap();

    assert!(result.is_simulated);
    assert_eq!(catalog.downloaded().len(), 2);
    // gone as soon as the fallback is returned, not when the read finishes
    assert!(dir_is_empty(root.path()));
}

#[tokio::test]
async fn test_empty_granule_list_is_empty_input() {
    let err = attempt(&orchestrator(
        Arc::new(StubCatalog::returning(Ok(Vec::new()))),
        constant(1.0e15),
    ))
    .await
    .unwrap_err();
    assert_eq!(err.category(), FailureCategory::EmptyInput);
}

#[tokio::test]
async fn test_failures_keep_their_category() {
    let network = attempt(&orchestrator(
        Arc::new(StubCatalog::returning(Err(CatalogError::Network(
            "connection reset".into(),
        )))),
        constant(1.0e15),
    ))
    .await
    .unwrap_err();
    assert_eq!(network.category(), FailureCategory::Network);

    let mut rejecting = StubCatalog::returning(Ok(granules(2)));
    rejecting.fail_download_after = Some((0, CatalogError::Authentication("401".into())));
    let auth = attempt(&orchestrator(Arc::new(rejecting), constant(1.0e15)))
        .await
        .unwrap_err();
    assert_eq!(auth.category(), FailureCategory::Authentication);

    let mut slow = StubCatalog::returning(Ok(granules(1)));
    slow.search_delay = Some(Duration::from_secs(30));
    let deadline = attempt(
        &orchestrator(Arc::new(slow), constant(1.0e15)).with_timeout(Duration::from_millis(50)),
    )
    .await
    .unwrap_err();
    assert_eq!(deadline.category(), FailureCategory::Timeout);

    let panic = attempt(&orchestrator(
        Arc::new(StubCatalog::returning(Ok(granules(1)))),
        Arc::new(PanickingSource),
    ))
    .await
    .unwrap_err();
    assert_eq!(panic.category(), FailureCategory::Unclassified);
}

#[tokio::test]
async fn test_nan_only_granules_are_invalid_result() {
    let err = attempt(&orchestrator(
        Arc::new(StubCatalog::returning(Ok(granules(2)))),
        constant(f64::NAN),
    ))
    .await
    .unwrap_err();
    assert_eq!(err.category(), FailureCategory::InvalidResult);
}
