//! The remote catalog contract.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use eo_common::QueryDescriptor;
use serde::{Deserialize, Serialize};

use crate::error::CatalogResult;
use crate::session::EarthdataSession;

/// Reference to one remote granule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GranuleHandle {
    /// Provider concept id, e.g. `G1234-GES_DISC`.
    pub id: String,
    pub title: String,
    /// Direct data download URL.
    pub url: String,
}

impl GranuleHandle {
    /// Local file name for this granule: the last URL path segment, or the
    /// id when the URL has none.
    pub fn file_name(&self) -> String {
        let path = self.url.split(['?', '#']).next().unwrap_or_default();
        path.rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
            .unwrap_or(&self.id)
            .to_string()
    }
}

/// Searches a remote catalog and fetches granules to local disk.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Granules matching `query`, ordered by start time.
    async fn search(
        &self,
        session: &EarthdataSession,
        query: &QueryDescriptor,
    ) -> CatalogResult<Vec<GranuleHandle>>;

    /// Download `granule` into `dest_dir`, returning the local file path.
    async fn download(
        &self,
        session: &EarthdataSession,
        granule: &GranuleHandle,
        dest_dir: &Path,
    ) -> CatalogResult<PathBuf>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(url: &str) -> GranuleHandle {
        GranuleHandle {
            id: "G1-GES_DISC".to_string(),
            title: "t".to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_file_name_from_url() {
        assert_eq!(
            handle("https://data.gesdisc.earthdata.nasa.gov/OMNO2d.003/2025/OMI-Aura_L3-OMNO2d_2025m0901_v003.he5?x=1")
                .file_name(),
            "OMI-Aura_L3-OMNO2d_2025m0901_v003.he5"
        );
        assert_eq!(handle("https://host/dir/").file_name(), "G1-GES_DISC");
    }
}
