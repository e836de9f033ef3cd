//! Catalog store trait definition.
//!
//! This module defines the abstract interface for catalog backend operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;

use crate::errors::CatalogError;
use crate::types::{Lookup, PageRequest, SearchRequest};
use catalog_shared::Product;

/// Abstracts the document-search backend that stores products.
///
/// Implementations perform exactly one backend round trip per call and no
/// retries. Pagination limits, id validation, result ordering and cancellation
/// are handled by `CatalogRepository` before and after these calls, so an
/// implementation only translates between products and its backend's shapes.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Create or fully replace the document stored under `product.id`.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was written
    /// * `Err(CatalogError)` - If encoding or the backend call fails
    async fn put_product(&self, product: &Product) -> Result<(), CatalogError>;

    /// Fetch a single product.
    ///
    /// # Returns
    ///
    /// * `Ok(Lookup::Found(product))` - If the document exists
    /// * `Ok(Lookup::NotFound)` - If the backend reports it absent
    /// * `Err(CatalogError)` - On transport or decode failure
    async fn get_product_by_id(&self, id: &str) -> Result<Lookup<Product>, CatalogError>;

    /// List products in backend order within the given window.
    async fn list_products(&self, page: PageRequest) -> Result<Vec<Product>, CatalogError>;

    /// Fetch the products for `ids` that exist, in backend response order.
    ///
    /// Missing ids are dropped without error.
    async fn list_products_with_ids(&self, ids: &[String]) -> Result<Vec<Product>, CatalogError>;

    /// Full-text match of the query against product name and description.
    async fn search_products(&self, request: &SearchRequest)
        -> Result<Vec<Product>, CatalogError>;

    /// Check if the backend is reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the backend answered successfully
    /// * `Ok(false)` - If it answered with a failure status
    /// * `Err(CatalogError)` - If the check could not be executed
    async fn health_check(&self) -> Result<bool, CatalogError>;

    /// Release the backend connection. Calling it more than once is harmless.
    fn close(&self);
}
