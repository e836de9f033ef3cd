//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `CatalogStore`
//! using the OpenSearch Rust client.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use opensearch::{
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    params::Refresh,
    GetSourceParts, IndexParts, MgetParts, OpenSearch, SearchParts,
};
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::errors::{classify_status, CatalogError, ResponseClass};
use crate::interfaces::CatalogStore;
use crate::opensearch::document::ProductDocument;
use crate::opensearch::index_config::{get_index_settings, IndexConfig};
use crate::opensearch::queries::{build_list_query, build_multi_get_body, build_search_query};
use crate::opensearch::responses::{decode_multi_get_response, decode_search_response, decode_source};
use crate::types::{Lookup, PageRequest, SearchRequest};
use catalog_shared::Product;

/// Settings for the OpenSearch store.
#[derive(Debug, Clone, Default)]
pub struct OpenSearchConfig {
    /// Index the products live in.
    pub index: IndexConfig,
    /// Wait for a refresh after each write so it is immediately searchable.
    pub refresh_on_write: bool,
    /// Per-request timeout applied by the transport.
    pub request_timeout: Option<Duration>,
}

/// OpenSearch catalog store.
///
/// Holds one `OpenSearch` client for its whole lifetime. The client pools
/// connections internally and is safe to share across tasks.
///
/// # Example
///
/// ```ignore
/// let store = OpenSearchCatalogStore::connect("http://localhost:9200", OpenSearchConfig::default()).await?;
/// store.put_product(&Product::new("p-1", "Widget", "A small widget", 9.99)).await?;
/// ```
pub struct OpenSearchCatalogStore {
    client: OpenSearch,
    config: OpenSearchConfig,
    endpoint: String,
    password: Option<String>,
    closed: AtomicBool,
}

/// Render `url` without its username and password, for logs and error messages.
///
/// An unparsable URL is replaced entirely, since it may still hold credentials.
pub fn redact_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => redacted(&parsed),
        Err(_) => "<invalid url>".to_string(),
    }
}

fn redacted(url: &Url) -> String {
    let mut shown = url.clone();
    // Both setters only fail on URLs that cannot carry credentials.
    let _ = shown.set_username("");
    let _ = shown.set_password(None);
    shown.to_string()
}

impl OpenSearchCatalogStore {
    /// Create a new store for the specified URL without contacting the backend.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `config` - Index and transport settings
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchCatalogStore)` - A new store instance
    /// * `Err(CatalogError)` - If the URL or transport setup is invalid
    pub fn new(url: &str, config: OpenSearchConfig) -> Result<Self, CatalogError> {
        let parsed_url = Url::parse(url).map_err(|e| CatalogError::connection(e.to_string()))?;
        let endpoint = redacted(&parsed_url);
        let password = parsed_url
            .password()
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let transport = builder
            .build()
            .map_err(|e| CatalogError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %endpoint,
            index = %config.index.name,
            refresh_on_write = config.refresh_on_write,
            "Created OpenSearch client"
        );

        Ok(Self {
            client,
            config,
            endpoint,
            password,
            closed: AtomicBool::new(false),
        })
    }

    /// Create a new store and verify the backend answers.
    ///
    /// Retrying is left to the caller.
    pub async fn connect(url: &str, config: OpenSearchConfig) -> Result<Self, CatalogError> {
        let store = Self::new(url, config)?;

        let response = store
            .client
            .info()
            .send()
            .await
            .map_err(|e| {
                CatalogError::connection(format!(
                    "failed to reach {}: {}",
                    store.endpoint,
                    store.scrub(e.to_string())
                ))
            })?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::connection(format!(
                "backend returned status {}: {}",
                status, body
            )));
        }

        info!(url = %store.endpoint, "OpenSearch connection verified");
        Ok(store)
    }

    /// The index this store reads and writes.
    pub fn index_name(&self) -> &str {
        &self.config.index.name
    }

    /// Create the index with the product mapping if it does not exist yet.
    ///
    /// An existing index is left untouched.
    #[instrument(skip(self), fields(index = %self.config.index.name))]
    pub async fn ensure_index_exists(&self) -> Result<(), CatalogError> {
        self.ensure_open()?;
        let index = self.index_name();

        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| CatalogError::transport(e.to_string()))?;

        match classify_status(response.status_code().as_u16()) {
            ResponseClass::Success => {
                debug!("Index already exists");
                return Ok(());
            }
            ResponseClass::NotFound => {}
            ResponseClass::Failure => return Err(Self::failure("index_exists", index, response).await),
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(get_index_settings())
            .send()
            .await
            .map_err(|e| CatalogError::transport(e.to_string()))?;

        if classify_status(response.status_code().as_u16()) != ResponseClass::Success {
            return Err(Self::failure("index_create", index, response).await);
        }

        info!("Created index");
        Ok(())
    }

    /// Mask the password in transport error text, which may echo the request URL.
    fn scrub(&self, message: String) -> String {
        match &self.password {
            Some(password) => message.replace(password.as_str(), "***"),
            None => message,
        }
    }

    fn ensure_open(&self) -> Result<(), CatalogError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(CatalogError::Closed);
        }
        Ok(())
    }

    /// Convert a page into the backend's signed `from`/`size` parameters.
    fn window(page: PageRequest) -> Result<(i64, i64), CatalogError> {
        let from = i64::try_from(page.skip)
            .map_err(|_| CatalogError::validation(format!("skip {} is too large", page.skip)))?;
        let size = i64::try_from(page.take)
            .map_err(|_| CatalogError::validation(format!("take {} is too large", page.take)))?;
        Ok((from, size))
    }

    /// Turn a failed response into an error carrying the backend's status and body.
    async fn failure(operation: &'static str, index: &str, response: Response) -> CatalogError {
        let status = response.status_code();
        let body = response.text().await.unwrap_or_default();
        error!(
            operation,
            index = %index,
            status = %status,
            body = %body,
            "Backend request failed"
        );
        CatalogError::backend(status.as_u16(), body)
    }

    /// Read a search response body, treating a 404 as a missing collection.
    async fn read_search(
        operation: &'static str,
        index: &str,
        response: Response,
    ) -> Result<Vec<Product>, CatalogError> {
        match classify_status(response.status_code().as_u16()) {
            ResponseClass::Success => {}
            ResponseClass::NotFound => {
                return Err(CatalogError::not_found(format!("index {}", index)));
            }
            ResponseClass::Failure => return Err(Self::failure(operation, index, response).await),
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::transport(e.to_string()))?;
        let page = decode_search_response(&body)?;

        debug!(
            operation,
            returned = page.products.len(),
            total = ?page.total,
            "Search completed"
        );
        Ok(page.products)
    }
}

#[async_trait]
impl CatalogStore for OpenSearchCatalogStore {
    /// Index the document under the product id, replacing any existing one.
    #[instrument(skip(self, product), fields(id = %product.id))]
    async fn put_product(&self, product: &Product) -> Result<(), CatalogError> {
        self.ensure_open()?;
        let index = self.index_name();

        let document = serde_json::to_value(ProductDocument::from(product))
            .map_err(|e| CatalogError::encode(e.to_string()))?;

        let mut request = self
            .client
            .index(IndexParts::IndexId(index, &product.id))
            .body(document);
        if self.config.refresh_on_write {
            request = request.refresh(Refresh::WaitFor);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CatalogError::transport(e.to_string()))?;

        if classify_status(response.status_code().as_u16()) != ResponseClass::Success {
            return Err(Self::failure("put_product", index, response).await);
        }

        debug!("Product indexed");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_product_by_id(&self, id: &str) -> Result<Lookup<Product>, CatalogError> {
        self.ensure_open()?;
        let index = self.index_name();

        let response = self
            .client
            .get_source(GetSourceParts::IndexId(index, id))
            .send()
            .await
            .map_err(|e| CatalogError::transport(e.to_string()))?;

        match classify_status(response.status_code().as_u16()) {
            ResponseClass::Success => {}
            ResponseClass::NotFound => {
                debug!("Product not found");
                return Ok(Lookup::NotFound);
            }
            ResponseClass::Failure => {
                return Err(Self::failure("get_product_by_id", index, response).await)
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::transport(e.to_string()))?;

        decode_source(id, &body).map(Lookup::Found)
    }

    #[instrument(skip(self))]
    async fn list_products(&self, page: PageRequest) -> Result<Vec<Product>, CatalogError> {
        self.ensure_open()?;
        let index = self.index_name();
        let (from, size) = Self::window(page)?;

        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .from(from)
            .size(size)
            .body(build_list_query())
            .send()
            .await
            .map_err(|e| CatalogError::transport(e.to_string()))?;

        Self::read_search("list_products", index, response).await
    }

    #[instrument(skip(self, ids), fields(requested = ids.len()))]
    async fn list_products_with_ids(&self, ids: &[String]) -> Result<Vec<Product>, CatalogError> {
        self.ensure_open()?;
        let index = self.index_name();

        let response = self
            .client
            .mget(MgetParts::Index(index))
            .body(build_multi_get_body(ids))
            .send()
            .await
            .map_err(|e| CatalogError::transport(e.to_string()))?;

        match classify_status(response.status_code().as_u16()) {
            ResponseClass::Success => {}
            ResponseClass::NotFound => {
                return Err(CatalogError::not_found(format!("index {}", index)));
            }
            ResponseClass::Failure => {
                return Err(Self::failure("list_products_with_ids", index, response).await)
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::transport(e.to_string()))?;
        let products = decode_multi_get_response(&body)?;

        debug!(found = products.len(), "Multi-get completed");
        Ok(products)
    }

    #[instrument(skip(self, request), fields(query = %request.query))]
    async fn search_products(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<Product>, CatalogError> {
        self.ensure_open()?;
        let index = self.index_name();
        let (from, size) = Self::window(request.page)?;

        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .from(from)
            .size(size)
            .body(build_search_query(&request.query))
            .send()
            .await
            .map_err(|e| CatalogError::transport(e.to_string()))?;

        Self::read_search("search_products", index, response).await
    }

    async fn health_check(&self) -> Result<bool, CatalogError> {
        self.ensure_open()?;

        let response = self
            .client
            .info()
            .send()
            .await
            .map_err(|e| CatalogError::transport(e.to_string()))?;

        Ok(response.status_code().is_success())
    }

    fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            info!(index = %self.config.index.name, "Closed OpenSearch client");
        }
    }
}
