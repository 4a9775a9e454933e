//! Domain error types.

use commerce::GatewayError;
use common::{Gid, UserError, user_error_messages};
use thiserror::Error;

/// A request rejected before any platform call was made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("orderId and action are required")]
    MissingOrderOrAction,

    #[error("Invalid action")]
    InvalidAction { action: String },

    /// Neither the request nor the configuration provides an email.
    #[error("Missing Klaviyo profile email")]
    MissingEmail,

    #[error("variantId is required for add")]
    MissingVariant,

    #[error("items[] is required")]
    MissingItems,

    #[error("Missing id")]
    MissingId,
}

/// Outcome of an ownership check other than success.
#[derive(Debug, Error)]
pub enum OwnershipError {
    #[error("Order not found")]
    NotFound { order_id: Gid },

    /// The order exists but does not carry the caller's identity tag.
    #[error("Forbidden: not your order")]
    Forbidden { order_id: Gid },

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Ownership(#[from] OwnershipError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The platform accepted the request but rejected the operation.
    #[error("{operation} rejected: {}", user_error_messages(.errors))]
    Rejected {
        operation: &'static str,
        errors: Vec<UserError>,
    },

    /// A mutation reported success but returned no resource.
    #[error("{operation} returned no {resource}")]
    MissingResource {
        operation: &'static str,
        resource: &'static str,
    },
}

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_client_facing() {
        assert_eq!(
            ValidationError::MissingOrderOrAction.to_string(),
            "orderId and action are required"
        );
        assert_eq!(
            ValidationError::InvalidAction {
                action: "refund".to_string()
            }
            .to_string(),
            "Invalid action"
        );
        assert_eq!(
            ValidationError::MissingVariant.to_string(),
            "variantId is required for add"
        );
    }

    #[test]
    fn rejected_lists_user_errors() {
        let err = DomainError::Rejected {
            operation: "tagsAdd",
            errors: vec![UserError::new(Some(&["id"]), "Resource does not exist.")],
        };
        assert_eq!(err.to_string(), "tagsAdd rejected: id: Resource does not exist.");
    }
}
