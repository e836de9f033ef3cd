//! # Catalog
//!
//! Operator entry point for the product catalog.
//!
//! This crate loads configuration, connects to the search backend and wires
//! up the `CatalogRepository` that the command line drives.

pub mod config;
pub mod logging;

pub use config::{Dependencies, Settings};

use catalog_repository::CatalogError;
use thiserror::Error;

/// Errors that can occur during startup or while running a command.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Catalog error.
    #[error("Catalog error: {0}")]
    CatalogError(#[from] CatalogError),

    /// Output serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Startup was interrupted before the backend became reachable.
    #[error("Startup cancelled")]
    Cancelled,
}

impl ServiceError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
