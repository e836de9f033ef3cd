//! Error types for the catalog repository.

mod catalog_error;
mod classifier;

pub use catalog_error::CatalogError;
pub use classifier::{classify_status, ResponseClass};
