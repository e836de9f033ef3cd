//! Catalog error types.
//!
//! This module defines the error types that can occur during catalog operations.

use thiserror::Error;

/// Errors that can occur during catalog repository operations.
///
/// `NotFound` is the expected, recoverable outcome. Every other variant except
/// the validation and control-flow ones is an opaque repository failure that
/// carries the backend's context for diagnostics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// The backend reported that the requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request was rejected before reaching the backend.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Too many ids in a single bulk lookup.
    #[error("Batch size {provided} exceeds maximum {max}")]
    BatchSizeExceeded { provided: usize, max: usize },

    /// Failed to set up or verify the backend connection.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The request could not be sent or its response could not be read.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("Backend returned status {status}: {message}")]
    Backend { status: u16, message: String },

    /// Failed to serialize a request body.
    #[error("Encode error: {0}")]
    Encode(String),

    /// Failed to parse a response body.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The call context was cancelled before the call completed.
    #[error("Operation cancelled")]
    Cancelled,

    /// The call context deadline passed before the call completed.
    #[error("Deadline exceeded")]
    DeadlineExceeded,

    /// The repository has been closed.
    #[error("Repository is closed")]
    Closed,
}

impl CatalogError {
    /// Create a not found error.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a batch size exceeded error.
    pub fn batch_size_exceeded(provided: usize, max: usize) -> Self {
        Self::BatchSizeExceeded { provided, max }
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a backend status error.
    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        Self::Backend {
            status,
            message: message.into(),
        }
    }

    /// Create an encode error.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Whether this error reports absence rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether the call was abandoned through its call context.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }
}
