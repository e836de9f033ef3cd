//! Interface definitions for the catalog store.
//!
//! This module defines the abstract `CatalogStore` trait that allows
//! for dependency injection and swappable backend implementations.

mod catalog_store;

pub use catalog_store::CatalogStore;
