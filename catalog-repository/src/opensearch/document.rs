//! Stored document shape for products.
//!
//! The index holds `{name, description, price}` bodies keyed by the product
//! id. Field names and types are the persisted layout and must not change.

use serde::{Deserialize, Serialize};

use catalog_shared::Product;

/// The body of a product document in the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDocument {
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl ProductDocument {
    /// Attach the storage key to build the domain product.
    pub fn into_product(self, id: impl Into<String>) -> Product {
        Product {
            id: id.into(),
            name: self.name,
            description: self.description,
            price: self.price,
        }
    }
}

impl From<&Product> for ProductDocument {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
        }
    }
}
