//! Catalog repository implementation.
//!
//! This module provides the main client for interacting with the catalog.
//! Application code uses this to store, fetch, list and search products.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::config::CatalogConfig;
use crate::context::CallContext;
use crate::errors::CatalogError;
use crate::interfaces::CatalogStore;
use crate::types::{BulkOrder, IdsRequest, Lookup, PageRequest, SearchRequest};
use catalog_shared::Product;

/// The main client for interacting with the product catalog.
///
/// Validation, pagination limits, bulk ordering and cancellation are applied
/// here; the backend specifics live in the `CatalogStore` it wraps.
#[derive(Clone)]
pub struct CatalogRepository {
    store: Arc<dyn CatalogStore>,
    config: CatalogConfig,
}

impl CatalogRepository {
    /// Create a new CatalogRepository with default configuration.
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            config: CatalogConfig::default(),
        }
    }

    /// Create a new CatalogRepository with custom configuration.
    pub fn with_config(store: Arc<dyn CatalogStore>, config: CatalogConfig) -> Self {
        Self { store, config }
    }

    /// Check if batch size exceeds the configured limit.
    fn validate_batch_size(&self, size: usize) -> Result<(), CatalogError> {
        if let Some(max) = self.config.max_batch_size {
            if size > max {
                return Err(CatalogError::batch_size_exceeded(size, max));
            }
        }
        Ok(())
    }

    /// Check that the page stays inside the configured result window.
    fn validate_page(&self, page: PageRequest) -> Result<(), CatalogError> {
        if let Some(max) = self.config.max_result_window {
            if page.end() > max {
                return Err(CatalogError::validation(format!(
                    "skip + take = {} exceeds the result window of {}",
                    page.end(),
                    max
                )));
            }
        }
        Ok(())
    }

    fn validate_id(id: &str) -> Result<(), CatalogError> {
        if id.trim().is_empty() {
            return Err(CatalogError::validation("id is required"));
        }
        Ok(())
    }

    fn validate_product(product: &Product) -> Result<(), CatalogError> {
        Self::validate_id(&product.id)?;
        if !product.price.is_finite() {
            return Err(CatalogError::validation(format!(
                "price must be a finite number, got {}",
                product.price
            )));
        }
        if product.price < 0.0 {
            return Err(CatalogError::validation(format!(
                "price must not be negative, got {}",
                product.price
            )));
        }
        Ok(())
    }

    /// Store a product, replacing every field of any product with the same id.
    /// Input: Product (non-empty id, finite non-negative price)
    /// Output: Result<(), CatalogError>, never `NotFound`
    #[instrument(skip(self, ctx, product), fields(id = %product.id))]
    pub async fn put_product(&self, ctx: &CallContext, product: &Product) -> Result<(), CatalogError> {
        Self::validate_product(product)?;

        ctx.run(self.store.put_product(product)).await
    }

    /// Fetch one product by id.
    /// Input: product id
    /// Output: Result<Lookup<Product>, CatalogError>
    #[instrument(skip(self, ctx))]
    pub async fn get_product_by_id(
        &self,
        ctx: &CallContext,
        id: &str,
    ) -> Result<Lookup<Product>, CatalogError> {
        Self::validate_id(id)?;

        ctx.run(self.store.get_product_by_id(id)).await
    }

    /// List products in backend order.
    /// Input: PageRequest (skip, take)
    /// Output: Result<Vec<Product>, CatalogError> with at most `take` items
    #[instrument(skip(self, ctx))]
    pub async fn list_products(
        &self,
        ctx: &CallContext,
        page: PageRequest,
    ) -> Result<Vec<Product>, CatalogError> {
        if page.is_empty() {
            return Ok(vec![]);
        }
        self.validate_page(page)?;

        let mut products = ctx.run(self.store.list_products(page)).await?;
        products.truncate(page.take as usize);
        Ok(products)
    }

    /// Fetch the products for a set of ids.
    /// Input: IdsRequest (ids, order)
    /// Output: Result<Vec<Product>, CatalogError> holding only the ids that exist
    ///
    /// Missing ids are dropped, not reported. With `BulkOrder::Backend` the
    /// order is whatever the backend enumerates; with `BulkOrder::Requested`
    /// it follows `ids`, one product per occurrence.
    ///
    /// The number of ids is limited by the configured max_batch_size (default: 1000).
    #[instrument(skip(self, ctx, request), fields(requested = request.ids.len(), order = ?request.order))]
    pub async fn list_products_with_ids(
        &self,
        ctx: &CallContext,
        request: IdsRequest,
    ) -> Result<Vec<Product>, CatalogError> {
        // Blank ids can never have been stored.
        let ids: Vec<String> = request
            .ids
            .into_iter()
            .filter(|id| !id.trim().is_empty())
            .collect();

        if ids.is_empty() {
            return Ok(vec![]);
        }
        self.validate_batch_size(ids.len())?;

        let products = ctx.run(self.store.list_products_with_ids(&ids)).await?;
        debug!(found = products.len(), "Bulk lookup completed");

        Ok(match request.order {
            BulkOrder::Backend => products,
            BulkOrder::Requested => Self::in_requested_order(&ids, products),
        })
    }

    /// Full-text search over product name and description.
    /// Input: SearchRequest (query, page)
    /// Output: Result<Vec<Product>, CatalogError> in backend relevance order, at most `take` items
    #[instrument(skip(self, ctx, request), fields(query = %request.query))]
    pub async fn search_products(
        &self,
        ctx: &CallContext,
        request: &SearchRequest,
    ) -> Result<Vec<Product>, CatalogError> {
        if request.page.is_empty() || request.query.trim().is_empty() {
            return Ok(vec![]);
        }
        self.validate_page(request.page)?;

        let mut products = ctx.run(self.store.search_products(request)).await?;
        products.truncate(request.page.take as usize);
        Ok(products)
    }

    /// Check if the backend is reachable.
    pub async fn health_check(&self, ctx: &CallContext) -> Result<bool, CatalogError> {
        ctx.run(self.store.health_check()).await
    }

    /// Release the backend connection. Safe to call more than once.
    pub fn close(&self) {
        self.store.close();
    }

    fn in_requested_order(ids: &[String], products: Vec<Product>) -> Vec<Product> {
        let by_id: HashMap<String, Product> = products
            .into_iter()
            .map(|product| (product.id.clone(), product))
            .collect();

        ids.iter().filter_map(|id| by_id.get(id).cloned()).collect()
    }
}
