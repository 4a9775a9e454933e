//! Orchestration error types.

use commerce::GatewayError;
use common::{UserError, user_error_messages};
use domain::{DomainError, OwnershipError};
use thiserror::Error;

use crate::state::EditState;

/// Errors that abort an order edit before it is committed.
#[derive(Debug, Error)]
pub enum EditError {
    #[error(transparent)]
    Ownership(#[from] OwnershipError),

    #[error("orderEditBegin rejected: {}", user_error_messages(.errors))]
    EditBeginFailed { errors: Vec<UserError> },

    /// Begin succeeded without returning a calculated order.
    #[error("Failed to start edit session")]
    EditSessionUnavailable,

    #[error("No line items found for modification")]
    NoTargetLineItem,

    #[error("orderEditAddLineItemDiscount rejected: {}", user_error_messages(.errors))]
    DiscountFailed { errors: Vec<UserError> },

    #[error("orderEditSetQuantity rejected: {}", user_error_messages(.errors))]
    RemoveFailed { errors: Vec<UserError> },

    #[error("orderEditAddVariant rejected: {}", user_error_messages(.errors))]
    AddFailed { errors: Vec<UserError> },

    #[error("orderEditCommit rejected: {}", user_error_messages(.errors))]
    CommitFailed { errors: Vec<UserError> },

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Invalid edit state transition: {from} -> {to}")]
    InvalidTransition { from: EditState, to: EditState },
}

impl EditError {
    /// The platform's user errors, for failures the platform reported as such.
    pub fn user_errors(&self) -> Option<&[UserError]> {
        match self {
            EditError::EditBeginFailed { errors }
            | EditError::DiscountFailed { errors }
            | EditError::RemoveFailed { errors }
            | EditError::AddFailed { errors }
            | EditError::CommitFailed { errors } => Some(errors),
            _ => None,
        }
    }
}

/// Errors that abort an order placement.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("Order placement failed at {step}: {source}")]
    Step {
        step: &'static str,
        #[source]
        source: DomainError,
    },
}

impl PlacementError {
    pub fn step(&self) -> &'static str {
        match self {
            PlacementError::Step { step, .. } => *step,
        }
    }

    /// The underlying domain error.
    pub fn domain(&self) -> &DomainError {
        match self {
            PlacementError::Step { source, .. } => source,
        }
    }

    pub fn user_errors(&self) -> Option<&[UserError]> {
        match self.domain() {
            DomainError::Rejected { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

/// Errors from the marketing events API.
#[derive(Debug, Error)]
pub enum MarketingError {
    #[error("Klaviyo transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx answer; `body` is the raw response text.
    #[error("Klaviyo error {status}: {body}")]
    Api { status: u16, body: String },
}

/// Convenience type alias for edit results.
pub type Result<T> = std::result::Result<T, EditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_only_for_platform_rejections() {
        let errors = vec![UserError::new(None, "The line item has already been removed.")];
        let err = EditError::RemoveFailed {
            errors: errors.clone(),
        };
        assert_eq!(err.user_errors(), Some(errors.as_slice()));
        assert!(EditError::NoTargetLineItem.user_errors().is_none());
        assert!(EditError::EditSessionUnavailable.user_errors().is_none());
    }

    #[test]
    fn messages() {
        assert_eq!(
            EditError::NoTargetLineItem.to_string(),
            "No line items found for modification"
        );
        assert_eq!(
            EditError::EditSessionUnavailable.to_string(),
            "Failed to start edit session"
        );
        let err = MarketingError::Api {
            status: 400,
            body: r#"{"errors":[]}"#.to_string(),
        };
        assert_eq!(err.to_string(), r#"Klaviyo error 400: {"errors":[]}"#);
    }
}
