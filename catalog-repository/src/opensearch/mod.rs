//! OpenSearch implementation of the catalog store.
//!
//! This module provides a concrete implementation of `CatalogStore`
//! using OpenSearch as the backend.

mod client;
mod document;
mod index_config;
mod queries;
mod responses;

pub use client::{redact_url, OpenSearchCatalogStore, OpenSearchConfig};
pub use document::ProductDocument;
pub use index_config::{get_index_settings, IndexConfig, INDEX_NAME};
pub use responses::{decode_multi_get_response, decode_search_response, SearchPage};
