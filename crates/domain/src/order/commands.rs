//! Order commands and the raw requests they are validated from.

use commerce::{LineItemInput, OrderCreateInput};
use common::Gid;
use serde::Deserialize;

use crate::error::ValidationError;

use super::{ActionKind, DEFAULT_DISCOUNT_PERCENT, EditAction, add_quantity};

/// Raw body of an order modification request.
///
/// Every field is optional so that missing fields surface as
/// [`ValidationError`]s rather than body rejections.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyRequest {
    pub order_id: Option<String>,
    pub action: Option<String>,
    pub email: Option<String>,
    pub line_item_id: Option<String>,
    pub variant_id: Option<String>,
    pub quantity: Option<i64>,
    pub discount_percent: Option<f64>,
}

impl ModifyRequest {
    /// Validates the request without touching the network.
    ///
    /// `fallback_email` is the configured default notification email.
    pub fn validate(self, fallback_email: Option<&str>) -> Result<ModifyCommand, ValidationError> {
        let (Some(order_id), Some(action)) = (non_blank(self.order_id), non_blank(self.action))
        else {
            return Err(ValidationError::MissingOrderOrAction);
        };
        let kind: ActionKind = action.parse()?;
        let email = resolve_email(self.email, fallback_email)?;

        let action = match kind {
            ActionKind::Discount => EditAction::Discount {
                percent: self.discount_percent.unwrap_or(DEFAULT_DISCOUNT_PERCENT),
            },
            ActionKind::Remove => EditAction::Remove,
            ActionKind::Add => EditAction::Add {
                variant_id: non_blank(self.variant_id)
                    .map(Gid::new)
                    .ok_or(ValidationError::MissingVariant)?,
                quantity: add_quantity(self.quantity),
            },
        };

        Ok(ModifyCommand {
            order_id: Gid::new(order_id),
            action,
            line_item_id: non_blank(self.line_item_id).map(Gid::new),
            email,
        })
    }
}

/// A validated order modification.
#[derive(Debug, Clone, PartialEq)]
pub struct ModifyCommand {
    pub order_id: Gid,
    pub action: EditAction,
    /// Target line item as supplied, in either id namespace.
    pub line_item_id: Option<Gid>,
    /// Profile email for the marketing notification.
    pub email: String,
}

/// One requested line of a new order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderItem {
    pub variant_id: String,
    pub quantity: Option<i64>,
}

/// Raw body of an order placement request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlaceOrderRequest {
    pub items: Option<Vec<PlaceOrderItem>>,
    pub email: Option<String>,
}

impl PlaceOrderRequest {
    pub fn validate(
        self,
        fallback_email: Option<&str>,
    ) -> Result<PlaceOrderCommand, ValidationError> {
        let items = self
            .items
            .filter(|items| !items.is_empty())
            .ok_or(ValidationError::MissingItems)?;
        let email = resolve_email(self.email, fallback_email)?;

        Ok(PlaceOrderCommand {
            line_items: items
                .into_iter()
                .map(|item| LineItemInput {
                    variant_id: Gid::new(item.variant_id),
                    quantity: item.quantity.unwrap_or(1),
                })
                .collect(),
            email,
        })
    }
}

/// A validated order placement.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceOrderCommand {
    pub line_items: Vec<LineItemInput>,
    pub email: String,
}

impl PlaceOrderCommand {
    /// The platform input; placed orders are always test orders.
    pub fn to_input(&self) -> OrderCreateInput {
        OrderCreateInput::test_order(self.line_items.clone(), self.email.clone())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn resolve_email(
    requested: Option<String>,
    fallback: Option<&str>,
) -> Result<String, ValidationError> {
    non_blank(requested)
        .or_else(|| non_blank(fallback.map(str::to_string)))
        .ok_or(ValidationError::MissingEmail)
}
