//! # Catalog Shared
//!
//! Types shared between the catalog repository and its callers.

mod product;

pub use product::Product;
