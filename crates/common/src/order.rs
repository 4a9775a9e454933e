//! Orders, line items and edit-session (calculated order) snapshots.

use serde::{Deserialize, Serialize};

use crate::connection::Connection;
use crate::money::{MoneyBag, MoneyV2};
use crate::types::Gid;

/// A committed order.
///
/// Only `id` is always present; the remaining fields are populated according
/// to which fields a query selected, and absent fields are omitted again when
/// the order is serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Gid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_financial_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price_set: Option<MoneyBag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_discounts_set: Option<MoneyBag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_total_price_set: Option<MoneyBag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Connection<LineItem>>,
}

impl Order {
    /// Returns true if the tag set contains `tag` (exact match).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags
            .as_deref()
            .is_some_and(|tags| tags.iter().any(|t| t == tag))
    }

    /// Iterates over the order's line items (empty if none were selected).
    pub fn line_items(&self) -> impl Iterator<Item = &LineItem> {
        self.line_items.iter().flat_map(|c| c.nodes())
    }

    /// Returns true if at least one line item has a positive quantity.
    pub fn has_active_line_items(&self) -> bool {
        self.line_items().any(LineItem::is_active)
    }

    /// The total to display: the current total, falling back to the original.
    pub fn display_total(&self) -> Option<&MoneyV2> {
        self.current_total_price_set
            .as_ref()
            .or(self.total_price_set.as_ref())
            .map(|bag| &bag.shop_money)
    }
}

/// One product line within a committed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: Gid,
    pub title: String,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_total_set: Option<MoneyBag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discounted_total_set: Option<MoneyBag>,
}

impl LineItem {
    /// Quantity zero means the item was logically removed by an edit.
    pub fn is_active(&self) -> bool {
        self.quantity > 0
    }
}

/// Snapshot of an order inside an edit session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedOrder {
    pub id: Gid,
    #[serde(default)]
    pub line_items: Connection<CalculatedLineItem>,
}

impl CalculatedOrder {
    /// The first calculated line item, used when a caller names no target.
    pub fn first_line_item(&self) -> Option<&CalculatedLineItem> {
        self.line_items.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedLineItem {
    pub id: Gid,
    pub title: String,
    pub quantity: i64,
}

/// A user-facing error reported by a platform mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

impl UserError {
    pub fn new(field: Option<&[&str]>, message: impl Into<String>) -> Self {
        Self {
            field: field.map(|f| f.iter().map(|s| (*s).to_string()).collect()),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(field) if !field.is_empty() => write!(f, "{}: {}", field.join("."), self.message),
            _ => write!(f, "{}", self.message),
        }
    }
}

/// Joins user error messages for log lines and error displays.
pub fn user_error_messages(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_item(id: &str, quantity: i64) -> LineItem {
        LineItem {
            id: Gid::new(id),
            title: "Snowboard".to_string(),
            quantity,
            original_total_set: None,
            discounted_total_set: None,
        }
    }

    fn order() -> Order {
        Order {
            id: Gid::new("gid://shopify/Order/1"),
            name: Some("#1001".to_string()),
            created_at: None,
            display_financial_status: None,
            tags: Some(vec!["alice".to_string(), "vip".to_string()]),
            total_price_set: Some(MoneyBag::new(MoneyV2::new("20.00", "USD"))),
            total_discounts_set: None,
            current_total_price_set: None,
            line_items: Some(Connection::from_nodes(vec![
                line_item("gid://shopify/LineItem/1", 0),
                line_item("gid://shopify/LineItem/2", 3),
            ])),
        }
    }

    #[test]
    fn tag_membership_is_exact() {
        let order = order();
        assert!(order.has_tag("alice"));
        assert!(!order.has_tag("ali"));
        assert!(!order.has_tag("ALICE"));
    }

    #[test]
    fn missing_tags_never_match() {
        let mut order = order();
        order.tags = None;
        assert!(!order.has_tag("alice"));
    }

    #[test]
    fn active_line_items() {
        let mut order = order();
        assert!(order.has_active_line_items());
        order.line_items = Some(Connection::from_nodes(vec![line_item(
            "gid://shopify/LineItem/1",
            0,
        )]));
        assert!(!order.has_active_line_items());
    }

    #[test]
    fn display_total_prefers_current() {
        let mut order = order();
        assert_eq!(order.display_total().unwrap().amount, "20.00");
        order.current_total_price_set = Some(MoneyBag::new(MoneyV2::new("18.00", "USD")));
        assert_eq!(order.display_total().unwrap().amount, "18.00");
    }

    #[test]
    fn unselected_fields_are_not_serialized() {
        let order = Order {
            id: Gid::new("gid://shopify/Order/1"),
            name: None,
            created_at: None,
            display_financial_status: None,
            tags: Some(vec![]),
            total_price_set: None,
            total_discounts_set: None,
            current_total_price_set: None,
            line_items: None,
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "gid://shopify/Order/1", "tags": [] }));
    }

    #[test]
    fn user_error_display() {
        let with_field = UserError::new(Some(&["lineItemId"]), "Line item does not exist");
        assert_eq!(with_field.to_string(), "lineItemId: Line item does not exist");

        let without_field = UserError::new(None, "Order is locked");
        assert_eq!(without_field.to_string(), "Order is locked");

        assert_eq!(
            user_error_messages(&[with_field, without_field]),
            "lineItemId: Line item does not exist; Order is locked"
        );
    }
}
