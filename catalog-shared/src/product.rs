//! The product entity stored in the catalog.

use serde::{Deserialize, Serialize};

/// A product record.
///
/// `id` is the only identity: two products with the same `id` are the same
/// logical record, and writing one replaces every field of the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier, used as the document key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Unit price. Expected to be finite and non-negative.
    pub price: f64,
}

impl Product {
    /// Create a new product.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
        }
    }
}
