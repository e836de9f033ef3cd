//! OpenSearch index configuration and mappings.
//!
//! This module defines the index name and mappings for the product index.

use serde_json::{json, Value};

/// The default name of the product index.
pub const INDEX_NAME: &str = "catalog";

/// Which index the store reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Index (or alias) name.
    pub name: String,
}

impl IndexConfig {
    /// Create a config for the given index name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(INDEX_NAME)
    }
}

/// Get the index settings and mappings for the product index.
///
/// `name` and `description` are analyzed text for `multi_match`; `price` is a
/// double, matching the stored `{name, description, price}` layout.
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "properties": {
                "name": {
                    "type": "text",
                    "fields": {
                        "raw": {
                            "type": "keyword"
                        }
                    }
                },
                "description": {
                    "type": "text"
                },
                "price": {
                    "type": "double"
                }
            }
        }
    })
}
