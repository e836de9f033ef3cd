//! Decoding of search and multi-get response bodies.
//!
//! Malformed bodies are reported as `CatalogError::Decode`; they never turn
//! into an empty result.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::errors::CatalogError;
use crate::opensearch::document::ProductDocument;
use catalog_shared::Product;

/// Products decoded from one search response.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    /// Total number of matching documents, when the backend reports it.
    pub total: Option<u64>,
    /// Hits in the order the backend ranked them.
    pub products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    #[serde(default)]
    total: Option<TotalHits>,
    hits: Vec<Hit>,
}

/// `hits.total` is an object on 7.x+ and OpenSearch, a bare number before that.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TotalHits {
    Object { value: u64 },
    Count(u64),
}

impl TotalHits {
    fn value(&self) -> u64 {
        match self {
            Self::Object { value } => *value,
            Self::Count(value) => *value,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_source")]
    source: ProductDocument,
}

#[derive(Debug, Deserialize)]
struct MultiGetResponse {
    docs: Vec<MultiGetDoc>,
}

#[derive(Debug, Deserialize)]
struct MultiGetDoc {
    #[serde(rename = "_id")]
    id: String,
    // Entries that failed individually carry `error` instead of `found`.
    #[serde(default)]
    found: bool,
    #[serde(rename = "_source", default)]
    source: Option<ProductDocument>,
    #[serde(default)]
    error: Option<Value>,
}

/// Decode a search response into ranked products.
pub fn decode_search_response(body: &str) -> Result<SearchPage, CatalogError> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| CatalogError::decode(format!("Invalid search response: {}", e)))?;

    let total = response.hits.total.as_ref().map(TotalHits::value);
    let products = response
        .hits
        .hits
        .into_iter()
        .map(|hit| hit.source.into_product(hit.id))
        .collect();

    Ok(SearchPage { total, products })
}

/// Decode a multi-get response, keeping only documents the backend found.
///
/// Entries that failed individually are logged and skipped.
pub fn decode_multi_get_response(body: &str) -> Result<Vec<Product>, CatalogError> {
    let response: MultiGetResponse = serde_json::from_str(body)
        .map_err(|e| CatalogError::decode(format!("Invalid multi-get response: {}", e)))?;

    let mut products = Vec::with_capacity(response.docs.len());
    for doc in response.docs {
        if let Some(error) = &doc.error {
            warn!(id = %doc.id, error = %error, "Multi-get entry failed, skipping");
            continue;
        }
        if !doc.found {
            continue;
        }
        let source = doc.source.ok_or_else(|| {
            CatalogError::decode(format!("Document {} found without _source", doc.id))
        })?;
        products.push(source.into_product(doc.id));
    }

    Ok(products)
}

/// Decode the `_source` body of a single document.
pub fn decode_source(id: &str, body: &str) -> Result<Product, CatalogError> {
    let document: ProductDocument = serde_json::from_str(body)
        .map_err(|e| CatalogError::decode(format!("Invalid document {}: {}", id, e)))?;
    Ok(document.into_product(id))
}
