//! Request and response types for catalog operations.

use crate::errors::CatalogError;

/// Offset/limit window into a backend-ordered result set.
///
/// Order is whatever the backend produces and is not guaranteed stable across
/// calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageRequest {
    /// Number of results to skip.
    pub skip: u64,
    /// Maximum number of results to return.
    pub take: u64,
}

impl PageRequest {
    /// Create a new page request.
    pub fn new(skip: u64, take: u64) -> Self {
        Self { skip, take }
    }

    /// Whether this page can only ever be empty.
    pub fn is_empty(&self) -> bool {
        self.take == 0
    }

    /// The exclusive upper bound of the window, `skip + take`.
    pub fn end(&self) -> u64 {
        self.skip.saturating_add(self.take)
    }
}

/// Full-text search over product name and description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Query text matched against `name` and `description`.
    pub query: String,
    /// Result window.
    pub page: PageRequest,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(query: impl Into<String>, skip: u64, take: u64) -> Self {
        Self {
            query: query.into(),
            page: PageRequest::new(skip, take),
        }
    }
}

/// Order of the products returned by a bulk lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulkOrder {
    /// The order in which the backend enumerates the documents.
    #[default]
    Backend,
    /// The order of the requested ids.
    Requested,
}

/// Bulk point lookup by id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdsRequest {
    /// Product ids to fetch. Missing ids are dropped from the result.
    pub ids: Vec<String>,
    /// Ordering of the returned products.
    pub order: BulkOrder,
}

impl IdsRequest {
    /// Create a request returning products in backend order.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            order: BulkOrder::Backend,
        }
    }

    /// Set the ordering of the returned products.
    pub fn with_order(mut self, order: BulkOrder) -> Self {
        self.order = order;
        self
    }
}

/// Outcome of a single-document lookup.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Lookup<T> {
    /// The document exists.
    Found(T),
    /// The backend reported the document absent.
    NotFound,
}

impl<T> Lookup<T> {
    /// Whether the document was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Convert into an `Option`, discarding the absence marker.
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound => None,
        }
    }

    /// Convert absence into `CatalogError::NotFound` naming `what`.
    pub fn into_result(self, what: impl Into<String>) -> Result<T, CatalogError> {
        match self {
            Self::Found(value) => Ok(value),
            Self::NotFound => Err(CatalogError::not_found(what)),
        }
    }

    /// Map the found value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Self::Found(value) => Lookup::Found(f(value)),
            Self::NotFound => Lookup::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request() {
        assert!(PageRequest::new(5, 0).is_empty());
        assert!(!PageRequest::new(0, 1).is_empty());
        assert_eq!(PageRequest::new(10, 20).end(), 30);
        assert_eq!(PageRequest::new(u64::MAX, 20).end(), u64::MAX);
    }

    #[test]
    fn test_ids_request_builder() {
        let request = IdsRequest::new(["a", "b"]).with_order(BulkOrder::Requested);

        assert_eq!(request.ids, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(request.order, BulkOrder::Requested);
        assert_eq!(IdsRequest::new(Vec::<String>::new()).order, BulkOrder::Backend);
    }

    #[test]
    fn test_lookup_into_result() {
        let found: Lookup<u32> = Lookup::Found(7);
        assert_eq!(found.clone().into_result("x"), Ok(7));
        assert_eq!(found.map(|v| v * 2).found(), Some(14));

        let missing: Lookup<u32> = Lookup::NotFound;
        assert!(!missing.is_found());
        assert_eq!(
            missing.into_result("product p-1"),
            Err(CatalogError::not_found("product p-1"))
        );
    }
}
