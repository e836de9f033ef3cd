//! # Catalog Repository
//!
//! This crate provides the product catalog contract and its search-engine
//! backed implementation. It includes the error taxonomy, the `CatalogStore`
//! backend interface, the `CatalogRepository` callers use, and a concrete
//! store for OpenSearch.

pub mod client;
pub mod config;
pub mod context;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;

pub use client::CatalogRepository;
pub use config::CatalogConfig;
pub use context::{CallContext, CancellationToken};
pub use errors::CatalogError;
pub use interfaces::CatalogStore;
pub use opensearch::{IndexConfig, OpenSearchCatalogStore, OpenSearchConfig};
pub use types::{BulkOrder, IdsRequest, Lookup, PageRequest, SearchRequest};
