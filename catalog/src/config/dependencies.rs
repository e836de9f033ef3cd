//! Dependency initialization and wiring for the catalog binary.

use std::sync::Arc;

use catalog_repository::opensearch::redact_url;
use catalog_repository::{CancellationToken, CatalogRepository, OpenSearchCatalogStore};
use tracing::info;

use crate::config::{retry_until, Settings};
use crate::ServiceError;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The backend store, for administrative calls outside the repository contract.
    pub store: Arc<OpenSearchCatalogStore>,
    /// The repository commands run against.
    pub repository: CatalogRepository,
}

impl Dependencies {
    /// Connect to the search backend, retrying until it answers.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(ServiceError)` - If the attempt cap is reached or `shutdown` fires
    pub async fn new(settings: &Settings, shutdown: &CancellationToken) -> Result<Self, ServiceError> {
        info!(
            database_url = %redact_url(&settings.database_url),
            index = %settings.index,
            "Initializing dependencies"
        );

        let url = settings.database_url.as_str();
        let store = retry_until(
            settings.connect_retry_interval,
            settings.connect_max_attempts,
            shutdown,
            move |_| OpenSearchCatalogStore::connect(url, settings.store_config()),
        )
        .await?;

        let store = Arc::new(store);
        let repository = CatalogRepository::new(store.clone());

        Ok(Self { store, repository })
    }
}
