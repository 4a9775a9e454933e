//! Marketing events emitted for order lifecycle changes.

use common::Gid;
use domain::{ActionKind, EditAction, ModifyCommand};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// The metrics the backend reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "Order Created")]
    OrderCreated,
    #[serde(rename = "Order Modified")]
    OrderModified,
}

impl Metric {
    pub fn name(&self) -> &'static str {
        match self {
            Metric::OrderCreated => "Order Created",
            Metric::OrderModified => "Order Modified",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A named metric event tied to a profile email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingEvent {
    pub metric: Metric,
    /// Flat scalar properties; absent values are `null`.
    pub properties: Map<String, Value>,
    pub profile_email: String,
    /// Idempotency token. The sink generates a random one when absent.
    pub unique_id: Option<String>,
}

impl MarketingEvent {
    /// Event for a newly placed order, deduplicated per order.
    pub fn order_created(order_id: &Gid, identity_tag: &str, profile_email: &str) -> Self {
        let mut properties = Map::new();
        properties.insert("shopifyOrderId".into(), json!(order_id));
        properties.insert("username".into(), json!(identity_tag));

        Self {
            metric: Metric::OrderCreated,
            properties,
            profile_email: profile_email.to_string(),
            unique_id: Some(order_id.to_string()),
        }
    }

    /// Event for a committed edit.
    ///
    /// `resolved_target` is the calculated line item the edit acted on; the
    /// supplied id wins when the caller named one.
    pub fn order_modified(
        cmd: &ModifyCommand,
        identity_tag: &str,
        resolved_target: Option<&Gid>,
        timestamp_millis: i64,
    ) -> Self {
        let kind = cmd.action.kind();
        let (discount_percent, variant_id, quantity) = match &cmd.action {
            EditAction::Discount { percent } => (json!(percent), Value::Null, Value::Null),
            EditAction::Remove => (Value::Null, Value::Null, Value::Null),
            EditAction::Add {
                variant_id,
                quantity,
            } => (Value::Null, json!(variant_id), json!(quantity)),
        };
        let line_item_id = if kind.needs_target() {
            cmd.line_item_id
                .as_ref()
                .or(resolved_target)
                .map_or(Value::Null, |id| json!(id))
        } else {
            Value::Null
        };

        let mut properties = Map::new();
        properties.insert("shopifyOrderId".into(), json!(cmd.order_id));
        properties.insert("username".into(), json!(identity_tag));
        properties.insert("action".into(), json!(kind.as_str()));
        properties.insert("discountPercent".into(), discount_percent);
        properties.insert("lineItemId".into(), line_item_id);
        properties.insert("variantId".into(), variant_id);
        properties.insert("quantity".into(), quantity);

        Self {
            metric: Metric::OrderModified,
            properties,
            profile_email: cmd.email.clone(),
            unique_id: Some(modification_unique_id(
                &cmd.order_id,
                kind,
                timestamp_millis,
            )),
        }
    }
}

/// `{orderId}-{action}-{timestamp}`: one token per orchestrated call.
///
/// The timestamp has millisecond resolution, so two edits of the same order
/// with the same action inside one millisecond share an id and the events
/// API keeps only the first of them.
pub fn modification_unique_id(order_id: &Gid, action: ActionKind, timestamp_millis: i64) -> String {
    format!("{order_id}-{action}-{timestamp_millis}")
}
