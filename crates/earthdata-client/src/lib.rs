//! Client for NASA Earthdata granule search and download.
//!
//! [`CatalogClient`] is the contract the pipeline consumes. [`CmrClient`]
//! implements it against the Common Metadata Repository search API and
//! streams granule files to disk with the session's bearer token.

pub mod catalog;
pub mod cmr;
pub mod error;
pub mod session;

pub use catalog::{CatalogClient, GranuleHandle};
pub use cmr::{classify_status, granules_from_feed, CmrClient, CmrConfig};
pub use error::{CatalogError, CatalogResult};
pub use session::EarthdataSession;
