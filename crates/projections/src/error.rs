//! Projection error types.

use thiserror::Error;

/// Errors that can occur while building the order listing.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// The platform could not be queried.
    #[error(transparent)]
    Gateway(#[from] commerce::GatewayError),
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;
