//! Dashboard configuration loading and types.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use earthdata_client::CmrConfig;
use eo_common::{ConfigurationError, DateRange};
use serde::Deserialize;

/// Configuration loaded from an optional YAML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub pipeline: PipelineSection,
    pub cmr: CmrSection,
}

/// Analysis period and pipeline limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineSection {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub timeout_secs: u64,
    pub download_concurrency: usize,
}

impl Default for PipelineSection {
    fn default() -> Self {
        let range = DateRange::default();
        Self {
            start_date: range.start,
            end_date: range.end,
            timeout_secs: pipeline::DEFAULT_PIPELINE_TIMEOUT.as_secs(),
            download_concurrency: pipeline::DEFAULT_DOWNLOAD_CONCURRENCY,
        }
    }
}

impl PipelineSection {
    pub fn date_range(&self) -> Result<DateRange, ConfigurationError> {
        DateRange::new(self.start_date, self.end_date)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// CMR search endpoint settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CmrSection {
    pub search_url: String,
    pub page_size: u32,
    pub request_timeout_secs: u64,
}

impl Default for CmrSection {
    fn default() -> Self {
        let defaults = CmrConfig::default();
        Self {
            search_url: defaults.search_url,
            page_size: defaults.page_size,
            request_timeout_secs: defaults.request_timeout.as_secs(),
        }
    }
}

impl CmrSection {
    pub fn to_client_config(&self) -> CmrConfig {
        CmrConfig {
            search_url: self.search_url.clone(),
            page_size: self.page_size,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..CmrConfig::default()
        }
    }
}

impl DashboardConfig {
    /// Load from `path`, or defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::warn!(
                "Dashboard config {} does not exist, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read: {:?}", path))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse: {:?}", path))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_analysis_period() {
        let config = DashboardConfig::default();
        assert_eq!(config.pipeline.date_range().unwrap(), DateRange::default());
        assert_eq!(config.pipeline.timeout(), Duration::from_secs(120));
        assert!(config.cmr.search_url.ends_with("/granules.json"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = DashboardConfig::from_yaml(
            "pipeline:\n  start_date: 2025-07-01\n  end_date: 2025-07-31\n",
        )
        .unwrap();

        let range = config.pipeline.date_range().unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
        assert_eq!(config.pipeline.timeout_secs, 120);
        assert_eq!(config.cmr.page_size, 100);
    }

    #[test]
    fn test_inverted_dates_are_configuration_errors() {
        let config = DashboardConfig::from_yaml(
            "pipeline:\n  start_date: 2025-10-01\n  end_date: 2025-09-01\n",
        )
        .unwrap();
        assert!(matches!(
            config.pipeline.date_range(),
            Err(ConfigurationError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_bundled_config_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/dashboard.yaml");
        let config = DashboardConfig::load(&path).unwrap();
        assert_eq!(config.pipeline.download_concurrency, 4);
    }
}
