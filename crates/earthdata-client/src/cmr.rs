//! CMR granule search and streaming download.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use eo_common::QueryDescriptor;
use futures::StreamExt;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};

use crate::catalog::{CatalogClient, GranuleHandle};
use crate::error::{CatalogError, CatalogResult};
use crate::session::EarthdataSession;

/// Production CMR granule search endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://cmr.earthdata.nasa.gov/search/granules.json";

/// Suffix of the link relation marking a granule's data file.
const DATA_REL_SUFFIX: &str = "/data#";

/// Configuration for [`CmrClient`].
#[derive(Debug, Clone)]
pub struct CmrConfig {
    /// Full URL of the `granules.json` search endpoint.
    pub search_url: String,
    /// Maximum granules returned by one search.
    pub page_size: u32,
    /// Whole-request timeout (downloads included).
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for CmrConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            page_size: 100,
            request_timeout: Duration::from_secs(300),
            connect_timeout: Duration::from_secs(30),
        }
    }
}

/// [`CatalogClient`] backed by the Common Metadata Repository.
#[derive(Debug, Clone)]
pub struct CmrClient {
    client: Client,
    config: CmrConfig,
}

impl CmrClient {
    pub fn new(config: CmrConfig) -> CatalogResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(4)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| CatalogError::Network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &CmrConfig {
        &self.config
    }

    fn authorize(request: RequestBuilder, session: &EarthdataSession) -> RequestBuilder {
        match session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Stream a response body to `path`, removing the partial file on error.
    async fn stream_to_file(response: Response, path: &Path) -> CatalogResult<u64> {
        let mut file = fs::File::create(path).await?;
        let mut stream = response.bytes_stream();
        let mut written = 0u64;

        let result = async {
            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                file.write_all(&chunk).await?;
                written += chunk.len() as u64;
            }
            file.flush().await?;
            Ok::<(), CatalogError>(())
        }
        .await;

        if let Err(e) = result {
            drop(file);
            fs::remove_file(path).await.ok();
            return Err(e);
        }
        Ok(written)
    }
}

#[async_trait]
impl CatalogClient for CmrClient {
    #[instrument(skip(self, session, query), fields(product = query.product_id(), region = query.region_name()))]
    async fn search(
        &self,
        session: &EarthdataSession,
        query: &QueryDescriptor,
    ) -> CatalogResult<Vec<GranuleHandle>> {
        let params = [
            ("short_name", query.product_id().to_string()),
            ("version", query.product_version().to_string()),
            ("temporal[]", query.date_range().to_temporal_param()),
            ("bounding_box[]", query.bounding_box().to_wsen_string()),
            ("page_size", self.config.page_size.to_string()),
            ("sort_key", "start_date".to_string()),
        ];

        let request = self.client.get(&self.config.search_url).query(&params);
        let response = Self::authorize(request, session).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status, "granule search"));
        }

        let feed: CmrResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Network(format!("unreadable CMR response: {}", e)))?;

        let granules = granules_from_feed(feed);
        if granules.is_empty() {
            return Err(CatalogError::NotFound(format!(
                "no {} granules for {} in {}",
                query.product_id(),
                query.region_name(),
                query.date_range().to_temporal_param()
            )));
        }

        info!(count = granules.len(), "Found granules");
        Ok(granules)
    }

    #[instrument(skip(self, session, granule), fields(granule = %granule.id))]
    async fn download(
        &self,
        session: &EarthdataSession,
        granule: &GranuleHandle,
        dest_dir: &Path,
    ) -> CatalogResult<PathBuf> {
        if !session.is_authenticated() {
            return Err(CatalogError::Authentication(
                "no Earthdata token configured".to_string(),
            ));
        }

        let path = dest_dir.join(granule.file_name());
        let request = self.client.get(&granule.url);
        let response = Self::authorize(request, session).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, url = %granule.url, "Granule download rejected");
            return Err(classify_status(status, &granule.title));
        }

        let bytes = Self::stream_to_file(response, &path).await?;
        debug!(path = %path.display(), bytes = bytes, "Downloaded granule");
        Ok(path)
    }
}

/// Map a non-success HTTP status to a catalog error.
pub fn classify_status(status: StatusCode, context: &str) -> CatalogError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            CatalogError::Authentication(format!("{}: HTTP {}", context, status))
        }
        StatusCode::NOT_FOUND => CatalogError::NotFound(format!("{}: HTTP {}", context, status)),
        _ => CatalogError::Network(format!("{}: HTTP {}", context, status)),
    }
}

/// CMR JSON response envelope.
#[derive(Debug, Deserialize)]
pub struct CmrResponse {
    pub feed: CmrFeed,
}

#[derive(Debug, Deserialize)]
pub struct CmrFeed {
    #[serde(default)]
    pub entry: Vec<CmrEntry>,
}

#[derive(Debug, Deserialize)]
pub struct CmrEntry {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub links: Vec<CmrLink>,
}

#[derive(Debug, Deserialize)]
pub struct CmrLink {
    #[serde(default)]
    pub rel: String,
    pub href: String,
}

/// Turn a search feed into handles, keeping feed order.
///
/// Entries without a data link are skipped.
pub fn granules_from_feed(response: CmrResponse) -> Vec<GranuleHandle> {
    response
        .feed
        .entry
        .into_iter()
        .filter_map(|entry| {
            let url = entry
                .links
                .iter()
                .find(|link| link.rel.ends_with(DATA_REL_SUFFIX))
                .map(|link| link.href.clone());
            match url {
                Some(url) => Some(GranuleHandle {
                    id: entry.id,
                    title: entry.title,
                    url,
                }),
                None => {
                    debug!(id = %entry.id, "Skipping granule without data link");
                    None
                }
            }
        })
        .collect()
}
