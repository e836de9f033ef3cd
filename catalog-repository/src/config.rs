//! Configuration types for the CatalogRepository.

/// Result window the backend accepts by default (`index.max_result_window`).
pub const DEFAULT_MAX_RESULT_WINDOW: u64 = 10_000;

/// Configuration for the CatalogRepository.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Maximum number of ids allowed in a single bulk lookup.
    /// Set to None to disable the limit (not recommended for production).
    pub max_batch_size: Option<usize>,
    /// Maximum value of `skip + take` for listing and search.
    /// Set to None to leave the check to the backend.
    pub max_result_window: Option<u64>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            max_batch_size: Some(1000),
            max_result_window: Some(DEFAULT_MAX_RESULT_WINDOW),
        }
    }
}

impl CatalogConfig {
    /// Create a config with no limits (use with caution).
    pub fn unlimited() -> Self {
        Self {
            max_batch_size: None,
            max_result_window: None,
        }
    }

    /// Create a config with a custom batch size limit.
    pub fn with_max_batch_size(max_batch_size: usize) -> Self {
        Self {
            max_batch_size: Some(max_batch_size),
            ..Self::default()
        }
    }

    /// Set a custom result window limit.
    pub fn max_result_window(mut self, max_result_window: u64) -> Self {
        self.max_result_window = Some(max_result_window);
        self
    }
}
