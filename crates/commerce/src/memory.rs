use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use common::{
    CalculatedLineItem, CalculatedOrder, Connection, Gid, LineItem, MoneyBag, MoneyV2, Order,
    Product, ProductVariant, UserError,
};
use serde_json::{Value, json};
use tokio::sync::RwLock;

use crate::documents::operation_name;
use crate::gateway::CommerceGateway;
use crate::{GatewayError, Result};

const CURRENCY: &str = "USD";
const EDIT_SESSION_LINE_ITEMS: usize = 50;
const ORDER_LINE_ITEMS: usize = 20;
const PRODUCT_VARIANTS: usize = 20;
const FIRST_ORDER_NAME: u64 = 1001;

/// Mutation operation name to payload root field.
const MUTATION_ROOTS: &[(&str, &str)] = &[
    ("OrderEditBegin", "orderEditBegin"),
    ("OrderEditAddLineItemDiscount", "orderEditAddLineItemDiscount"),
    ("OrderEditSetQuantity", "orderEditSetQuantity"),
    ("OrderEditAddVariant", "orderEditAddVariant"),
    ("OrderEditCommit", "orderEditCommit"),
    ("CreateOrder", "orderCreate"),
    ("AddTag", "tagsAdd"),
    ("MarkPaid", "orderMarkAsPaid"),
];

#[derive(Debug, Clone)]
struct StoredLineItem {
    number: u64,
    title: String,
    quantity: i64,
    unit_price_cents: i64,
    discount_percent: Option<f64>,
}

impl StoredLineItem {
    fn original_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }

    fn discounted_total_cents(&self) -> i64 {
        let original = self.original_total_cents();
        match self.discount_percent {
            Some(percent) => original - (original as f64 * percent / 100.0).round() as i64,
            None => original,
        }
    }

    fn to_line_item(&self) -> LineItem {
        LineItem {
            id: gid("LineItem", self.number),
            title: self.title.clone(),
            quantity: self.quantity,
            original_total_set: Some(money_bag(self.original_total_cents())),
            discounted_total_set: Some(money_bag(self.discounted_total_cents())),
        }
    }

    fn to_calculated(&self) -> CalculatedLineItem {
        CalculatedLineItem {
            id: gid("CalculatedLineItem", self.number),
            title: self.title.clone(),
            quantity: self.quantity,
        }
    }
}

#[derive(Debug, Clone)]
struct StoredOrder {
    number: u64,
    name: String,
    created_at: String,
    tags: Vec<String>,
    financial_status: String,
    original_total_cents: i64,
    line_items: Vec<StoredLineItem>,
}

impl StoredOrder {
    fn to_order(&self) -> Order {
        let current: i64 = self
            .line_items
            .iter()
            .map(StoredLineItem::discounted_total_cents)
            .sum();
        let undiscounted: i64 = self
            .line_items
            .iter()
            .map(StoredLineItem::original_total_cents)
            .sum();

        Order {
            id: gid("Order", self.number),
            name: Some(self.name.clone()),
            created_at: Some(self.created_at.clone()),
            display_financial_status: Some(self.financial_status.clone()),
            tags: Some(self.tags.clone()),
            total_price_set: Some(money_bag(self.original_total_cents)),
            total_discounts_set: Some(money_bag(undiscounted - current)),
            current_total_price_set: Some(money_bag(current)),
            line_items: Some(Connection::from_nodes(
                self.line_items
                    .iter()
                    .take(ORDER_LINE_ITEMS)
                    .map(StoredLineItem::to_line_item),
            )),
        }
    }
}

#[derive(Debug)]
struct EditSession {
    order_number: u64,
    line_items: Vec<StoredLineItem>,
}

#[derive(Debug, Clone)]
struct StoredVariant {
    number: u64,
    title: String,
    price_cents: i64,
}

#[derive(Debug, Clone)]
struct StoredProduct {
    number: u64,
    title: String,
    variants: Vec<StoredVariant>,
}

#[derive(Debug, Clone)]
enum InjectedFailure {
    Status(u16),
    UserError(String),
}

#[derive(Debug, Default)]
struct PlatformState {
    next_id: u64,
    orders_created: u64,
    orders: BTreeMap<u64, StoredOrder>,
    sessions: HashMap<u64, EditSession>,
    products: Vec<StoredProduct>,
    failures: HashMap<String, InjectedFailure>,
    operations: Vec<String>,
}

impl PlatformState {
    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Returns `(line title, unit price)` for a variant.
    fn variant(&self, number: u64) -> Option<(String, i64)> {
        self.products.iter().find_map(|product| {
            product
                .variants
                .iter()
                .find(|v| v.number == number)
                .map(|v| (format!("{} - {}", product.title, v.title), v.price_cents))
        })
    }

    fn insert_order(&mut self, tags: Vec<String>, lines: Vec<(String, i64, i64)>) -> u64 {
        let number = self.allocate();
        let line_items: Vec<StoredLineItem> = lines
            .into_iter()
            .map(|(title, quantity, unit_price_cents)| StoredLineItem {
                number: self.allocate(),
                title,
                quantity,
                unit_price_cents,
                discount_percent: None,
            })
            .collect();
        let name = format!("#{}", FIRST_ORDER_NAME + self.orders_created);
        self.orders_created += 1;

        self.orders.insert(
            number,
            StoredOrder {
                number,
                name,
                created_at: chrono::Utc::now().to_rfc3339(),
                tags,
                financial_status: "PENDING".to_string(),
                original_total_cents: line_items
                    .iter()
                    .map(StoredLineItem::original_total_cents)
                    .sum(),
                line_items,
            },
        );
        number
    }

    fn session_number(&self, variables: &Value) -> Option<u64> {
        number_of(&variables["id"], "CalculatedOrder").filter(|n| self.sessions.contains_key(n))
    }
}

/// Stateful in-memory double of the commerce platform.
///
/// Dispatches on the document's operation name and answers with the same
/// payload shapes as the admin API, including user errors for invalid edits.
/// Every operation is recorded, and failures can be injected per operation.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommerce {
    state: Arc<RwLock<PlatformState>>,
}

impl InMemoryCommerce {
    /// Creates an empty platform with no products or orders.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product with `(variant title, price in cents)` variants and
    /// returns the variant ids.
    pub async fn add_product(&self, title: &str, variants: &[(&str, i64)]) -> Vec<Gid> {
        let mut state = self.state.write().await;
        let product_number = state.allocate();
        let mut stored = Vec::with_capacity(variants.len());
        for (variant_title, price_cents) in variants {
            stored.push(StoredVariant {
                number: state.allocate(),
                title: (*variant_title).to_string(),
                price_cents: *price_cents,
            });
        }
        let ids = stored.iter().map(|v| gid("ProductVariant", v.number)).collect();
        state.products.push(StoredProduct {
            number: product_number,
            title: title.to_string(),
            variants: stored,
        });
        ids
    }

    /// Inserts an order directly, bypassing `orderCreate`.
    ///
    /// `lines` are `(title, quantity, unit price in cents)`.
    pub async fn seed_order(&self, tags: &[&str], lines: &[(&str, i64, i64)]) -> Gid {
        let mut state = self.state.write().await;
        let number = state.insert_order(
            tags.iter().map(|t| (*t).to_string()).collect(),
            lines
                .iter()
                .map(|(title, quantity, price)| ((*title).to_string(), *quantity, *price))
                .collect(),
        );
        gid("Order", number)
    }

    /// Returns the full current state of an order.
    pub async fn order(&self, id: &Gid) -> Option<Order> {
        let state = self.state.read().await;
        let number = number_of(&json!(id), "Order")?;
        state.orders.get(&number).map(StoredOrder::to_order)
    }

    /// Returns the committed line item ids of an order, in order.
    pub async fn line_item_ids(&self, id: &Gid) -> Vec<Gid> {
        self.order(id)
            .await
            .map(|order| order.line_items().map(|li| li.id.clone()).collect())
            .unwrap_or_default()
    }

    /// Returns the operation names received so far, oldest first.
    pub async fn operations(&self) -> Vec<String> {
        self.state.read().await.operations.clone()
    }

    /// Returns the number of edit sessions begun but never committed.
    pub async fn open_session_count(&self) -> usize {
        self.state.read().await.sessions.len()
    }

    /// Makes `operation` answer with a non-2xx HTTP status.
    pub async fn fail_with_status(&self, operation: &str, status: u16) {
        self.state
            .write()
            .await
            .failures
            .insert(operation.to_string(), InjectedFailure::Status(status));
    }

    /// Makes the mutation `operation` answer with a single user error.
    pub async fn fail_with_user_error(&self, operation: &str, message: &str) {
        self.state.write().await.failures.insert(
            operation.to_string(),
            InjectedFailure::UserError(message.to_string()),
        );
    }

    pub async fn clear_failures(&self) {
        self.state.write().await.failures.clear();
    }
}

#[async_trait]
impl CommerceGateway for InMemoryCommerce {
    async fn execute(&self, document: &str, variables: Value) -> Result<Value> {
        let Some(operation) = operation_name(document) else {
            return Err(graph_error("Operations must be named"));
        };

        let mut guard = self.state.write().await;
        let state = &mut *guard;
        state.operations.push(operation.to_string());

        match state.failures.get(operation).cloned() {
            Some(InjectedFailure::Status(status)) => {
                return Err(GatewayError::Http {
                    status,
                    body: format!(r#"{{"errors":"injected failure for {operation}"}}"#),
                });
            }
            Some(InjectedFailure::UserError(message)) => {
                let root = mutation_root(operation)
                    .ok_or_else(|| graph_error(&format!("{operation} is not a mutation")))?;
                return Ok(user_error(root, None, &message));
            }
            None => {}
        }

        let data = match operation {
            "OrderTags" | "OrderDetail" => order_lookup(state, &variables),
            "MyOrders" => orders(state, &variables),
            "Products" => products(state, &variables),
            "OrderEditBegin" => order_edit_begin(state, &variables),
            "OrderEditAddLineItemDiscount" => add_line_item_discount(state, &variables),
            "OrderEditSetQuantity" => set_quantity(state, &variables),
            "OrderEditAddVariant" => add_variant(state, &variables),
            "OrderEditCommit" => commit(state, &variables),
            "CreateOrder" => create_order(state, &variables),
            "AddTag" => add_tags(state, &variables),
            "MarkPaid" => mark_paid(state, &variables),
            other => return Err(graph_error(&format!("Unknown operation {other}"))),
        };
        Ok(data)
    }
}

fn order_lookup(state: &PlatformState, variables: &Value) -> Value {
    let order = number_of(&variables["id"], "Order")
        .and_then(|n| state.orders.get(&n))
        .map(StoredOrder::to_order);
    json!({ "order": order })
}

fn orders(state: &PlatformState, variables: &Value) -> Value {
    let first = variables["first"].as_u64().unwrap_or(50) as usize;
    let tag = variables["q"]
        .as_str()
        .and_then(|q| q.trim().strip_prefix("tag:"));

    let nodes: Vec<Order> = state
        .orders
        .values()
        .rev()
        .filter(|o| tag.is_none_or(|tag| o.tags.iter().any(|t| t == tag)))
        .take(first)
        .map(StoredOrder::to_order)
        .collect();
    json!({ "orders": Connection::from_nodes(nodes) })
}

fn products(state: &PlatformState, variables: &Value) -> Value {
    let first = variables["first"].as_u64().unwrap_or(10) as usize;
    let nodes: Vec<Product> = state
        .products
        .iter()
        .take(first)
        .map(|p| Product {
            id: gid("Product", p.number),
            title: p.title.clone(),
            variants: Connection::from_nodes(p.variants.iter().take(PRODUCT_VARIANTS).map(
                |v| ProductVariant {
                    id: gid("ProductVariant", v.number),
                    title: v.title.clone(),
                    price: MoneyV2::from_cents(v.price_cents, CURRENCY).amount,
                },
            )),
        })
        .collect();
    json!({ "products": Connection::from_nodes(nodes) })
}

fn order_edit_begin(state: &mut PlatformState, variables: &Value) -> Value {
    const ROOT: &str = "orderEditBegin";
    let Some(order_number) =
        number_of(&variables["id"], "Order").filter(|n| state.orders.contains_key(n))
    else {
        return user_error(ROOT, Some(&["id"]), "The order does not exist.");
    };

    let line_items = state.orders[&order_number].line_items.clone();
    let session_number = state.allocate();
    let calculated = CalculatedOrder {
        id: gid("CalculatedOrder", session_number),
        line_items: Connection::from_nodes(
            line_items
                .iter()
                .take(EDIT_SESSION_LINE_ITEMS)
                .map(StoredLineItem::to_calculated),
        ),
    };
    state.sessions.insert(
        session_number,
        EditSession {
            order_number,
            line_items,
        },
    );
    payload(ROOT, json!({ "calculatedOrder": calculated, "userErrors": [] }))
}

fn find_line_item<'a>(
    session: &'a mut EditSession,
    line_item_id: &Value,
) -> Option<&'a mut StoredLineItem> {
    let number = number_of(line_item_id, "CalculatedLineItem")?;
    session.line_items.iter_mut().find(|li| li.number == number)
}

fn add_line_item_discount(state: &mut PlatformState, variables: &Value) -> Value {
    const ROOT: &str = "orderEditAddLineItemDiscount";
    let Some(session) = state
        .session_number(variables)
        .and_then(|n| state.sessions.get_mut(&n))
    else {
        return user_error(ROOT, Some(&["id"]), "The calculated order does not exist.");
    };
    let Some(line_item) = find_line_item(session, &variables["lineItemId"]) else {
        return user_error(ROOT, Some(&["lineItemId"]), "The line item does not exist.");
    };

    let percent = variables["discount"]["percentValue"]
        .as_f64()
        .unwrap_or_default();
    if percent <= 0.0 || percent > 100.0 {
        return user_error(
            ROOT,
            Some(&["discount", "percentValue"]),
            "Percent value must be greater than 0 and at most 100.",
        );
    }
    if line_item.quantity == 0 {
        return user_error(
            ROOT,
            Some(&["lineItemId"]),
            "A discount cannot be applied to a removed line item.",
        );
    }

    line_item.discount_percent = Some(percent);
    payload(
        ROOT,
        json!({ "calculatedOrder": { "id": variables["id"] }, "userErrors": [] }),
    )
}

fn set_quantity(state: &mut PlatformState, variables: &Value) -> Value {
    const ROOT: &str = "orderEditSetQuantity";
    let Some(session) = state
        .session_number(variables)
        .and_then(|n| state.sessions.get_mut(&n))
    else {
        return user_error(ROOT, Some(&["id"]), "The calculated order does not exist.");
    };
    let Some(line_item) = find_line_item(session, &variables["lineItemId"]) else {
        return user_error(ROOT, Some(&["lineItemId"]), "The line item does not exist.");
    };

    let quantity = variables["quantity"].as_i64().unwrap_or(-1);
    if quantity < 0 {
        return user_error(
            ROOT,
            Some(&["quantity"]),
            "Quantity must be greater than or equal to 0.",
        );
    }
    if quantity == 0 && line_item.quantity == 0 {
        return user_error(
            ROOT,
            Some(&["lineItemId"]),
            "The line item has already been removed.",
        );
    }

    line_item.quantity = quantity;
    payload(
        ROOT,
        json!({ "calculatedOrder": { "id": variables["id"] }, "userErrors": [] }),
    )
}

fn add_variant(state: &mut PlatformState, variables: &Value) -> Value {
    const ROOT: &str = "orderEditAddVariant";
    let Some(session_number) = state.session_number(variables) else {
        return user_error(ROOT, Some(&["id"]), "The calculated order does not exist.");
    };
    let Some((title, unit_price_cents)) =
        number_of(&variables["variantId"], "ProductVariant").and_then(|n| state.variant(n))
    else {
        return user_error(ROOT, Some(&["variantId"]), "The variant does not exist.");
    };
    let quantity = variables["quantity"].as_i64().unwrap_or_default();
    if quantity <= 0 {
        return user_error(ROOT, Some(&["quantity"]), "Quantity must be greater than 0.");
    }

    let number = state.allocate();
    if let Some(session) = state.sessions.get_mut(&session_number) {
        session.line_items.push(StoredLineItem {
            number,
            title,
            quantity,
            unit_price_cents,
            discount_percent: None,
        });
    }
    payload(
        ROOT,
        json!({ "calculatedOrder": { "id": variables["id"] }, "userErrors": [] }),
    )
}

fn commit(state: &mut PlatformState, variables: &Value) -> Value {
    const ROOT: &str = "orderEditCommit";
    let Some(session) = state
        .session_number(variables)
        .and_then(|n| state.sessions.remove(&n))
    else {
        return user_error(ROOT, Some(&["id"]), "The calculated order does not exist.");
    };
    let Some(order) = state.orders.get_mut(&session.order_number) else {
        return user_error(ROOT, Some(&["id"]), "The order does not exist.");
    };

    order.line_items = session.line_items;
    payload(
        ROOT,
        json!({
            "order": { "id": gid("Order", order.number), "name": order.name },
            "userErrors": [],
        }),
    )
}

fn create_order(state: &mut PlatformState, variables: &Value) -> Value {
    const ROOT: &str = "orderCreate";
    let Some(requested) = variables["order"]["lineItems"]
        .as_array()
        .filter(|lines| !lines.is_empty())
    else {
        return user_error(
            ROOT,
            Some(&["order", "lineItems"]),
            "Line items can't be blank.",
        );
    };

    let mut lines = Vec::with_capacity(requested.len());
    for line in requested {
        let Some((title, unit_price_cents)) =
            number_of(&line["variantId"], "ProductVariant").and_then(|n| state.variant(n))
        else {
            return user_error(
                ROOT,
                Some(&["order", "lineItems", "variantId"]),
                "The variant does not exist.",
            );
        };
        let quantity = line["quantity"].as_i64().unwrap_or_default();
        if quantity <= 0 {
            return user_error(
                ROOT,
                Some(&["order", "lineItems", "quantity"]),
                "Quantity must be greater than 0.",
            );
        }
        lines.push((title, quantity, unit_price_cents));
    }

    let number = state.insert_order(Vec::new(), lines);
    let name = state.orders[&number].name.clone();
    payload(
        ROOT,
        json!({
            "order": { "id": gid("Order", number), "name": name },
            "userErrors": [],
        }),
    )
}

fn add_tags(state: &mut PlatformState, variables: &Value) -> Value {
    const ROOT: &str = "tagsAdd";
    let Some(order) =
        number_of(&variables["id"], "Order").and_then(|n| state.orders.get_mut(&n))
    else {
        return user_error(ROOT, Some(&["id"]), "Resource does not exist.");
    };

    for tag in variables["tags"].as_array().into_iter().flatten() {
        if let Some(tag) = tag.as_str()
            && !order.tags.iter().any(|t| t == tag)
        {
            order.tags.push(tag.to_string());
        }
    }
    payload(
        ROOT,
        json!({ "node": { "id": variables["id"] }, "userErrors": [] }),
    )
}

fn mark_paid(state: &mut PlatformState, variables: &Value) -> Value {
    const ROOT: &str = "orderMarkAsPaid";
    let Some(order) = number_of(&variables["input"]["id"], "Order")
        .and_then(|n| state.orders.get_mut(&n))
    else {
        return user_error(ROOT, Some(&["input", "id"]), "Order does not exist.");
    };

    order.financial_status = "PAID".to_string();
    payload(
        ROOT,
        json!({
            "order": {
                "id": gid("Order", order.number),
                "displayFinancialStatus": order.financial_status,
            },
            "userErrors": [],
        }),
    )
}

fn gid(resource: &str, number: u64) -> Gid {
    Gid::new(format!("gid://shopify/{resource}/{number}"))
}

/// Parses the numeric tail of a gid, requiring the given resource type.
fn number_of(value: &Value, resource: &str) -> Option<u64> {
    let id = Gid::new(value.as_str()?);
    if id.resource_type()? != resource {
        return None;
    }
    id.tail().parse().ok()
}

fn money_bag(cents: i64) -> MoneyBag {
    MoneyBag::new(MoneyV2::from_cents(cents, CURRENCY))
}

fn mutation_root(operation: &str) -> Option<&'static str> {
    MUTATION_ROOTS
        .iter()
        .find(|(name, _)| *name == operation)
        .map(|(_, root)| *root)
}

fn payload(root: &str, body: Value) -> Value {
    let mut data = serde_json::Map::new();
    data.insert(root.to_string(), body);
    Value::Object(data)
}

fn user_error(root: &str, field: Option<&[&str]>, message: &str) -> Value {
    payload(
        root,
        json!({
            "calculatedOrder": null,
            "order": null,
            "node": null,
            "userErrors": [UserError::new(field, message)],
        }),
    )
}

fn graph_error(message: &str) -> GatewayError {
    GatewayError::Graph {
        errors: vec![json!({ "message": message })],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::AdminOperations;

    async fn platform_with_order() -> (InMemoryCommerce, Gid) {
        let platform = InMemoryCommerce::new();
        let order_id = platform
            .seed_order(&["alice"], &[("Board", 2, 2500), ("Wax", 1, 800)])
            .await;
        (platform, order_id)
    }

    #[tokio::test]
    async fn order_lookup_returns_tags() {
        let (platform, order_id) = platform_with_order().await;
        let lookup = platform.order_tags(&order_id).await.unwrap();
        let order = lookup.order.unwrap();
        assert_eq!(order.id, order_id);
        assert!(order.has_tag("alice"));
    }

    #[tokio::test]
    async fn unknown_order_is_null() {
        let platform = InMemoryCommerce::new();
        let lookup = platform
            .order_tags(&Gid::new("gid://shopify/Order/999"))
            .await
            .unwrap();
        assert!(lookup.order.is_none());
    }

    #[tokio::test]
    async fn edit_session_round_trip() {
        let (platform, order_id) = platform_with_order().await;

        let begin = platform.order_edit_begin(&order_id).await.unwrap();
        assert!(begin.user_errors.is_empty());
        let calculated = begin.calculated_order.unwrap();
        assert_eq!(calculated.line_items.len(), 2);
        assert_eq!(platform.open_session_count().await, 1);

        let target = calculated.first_line_item().unwrap().id.clone();
        let result = platform
            .order_edit_set_quantity(&calculated.id, &target, 0)
            .await
            .unwrap();
        assert!(result.user_errors.is_empty());

        let commit = platform
            .order_edit_commit(&calculated.id, false)
            .await
            .unwrap();
        assert!(commit.user_errors.is_empty());
        assert_eq!(commit.order.unwrap().name, "#1001");
        assert_eq!(platform.open_session_count().await, 0);

        let order = platform.order(&order_id).await.unwrap();
        assert_eq!(order.line_items().next().unwrap().quantity, 0);
    }

    #[tokio::test]
    async fn committed_line_item_ids_are_rejected_inside_a_session() {
        let (platform, order_id) = platform_with_order().await;
        let committed_id = platform.line_item_ids(&order_id).await[0].clone();

        let calculated = platform
            .order_edit_begin(&order_id)
            .await
            .unwrap()
            .calculated_order
            .unwrap();
        let result = platform
            .order_edit_set_quantity(&calculated.id, &committed_id, 0)
            .await
            .unwrap();
        assert_eq!(result.user_errors[0].message, "The line item does not exist.");
    }

    #[tokio::test]
    async fn removing_twice_reports_conflict() {
        let (platform, order_id) = platform_with_order().await;

        for _ in 0..2 {
            let calculated = platform
                .order_edit_begin(&order_id)
                .await
                .unwrap()
                .calculated_order
                .unwrap();
            let target = calculated.first_line_item().unwrap().id.clone();
            let result = platform
                .order_edit_set_quantity(&calculated.id, &target, 0)
                .await
                .unwrap();
            if result.user_errors.is_empty() {
                platform
                    .order_edit_commit(&calculated.id, false)
                    .await
                    .unwrap();
            } else {
                assert_eq!(
                    result.user_errors[0].message,
                    "The line item has already been removed."
                );
                return;
            }
        }
        panic!("second removal should have been rejected");
    }

    #[tokio::test]
    async fn discount_reduces_current_total() {
        let (platform, order_id) = platform_with_order().await;
        let calculated = platform
            .order_edit_begin(&order_id)
            .await
            .unwrap()
            .calculated_order
            .unwrap();
        let target = calculated.first_line_item().unwrap().id.clone();
        platform
            .order_edit_add_line_item_discount(&calculated.id, &target, 10.0, "10% off")
            .await
            .unwrap();
        platform
            .order_edit_commit(&calculated.id, false)
            .await
            .unwrap();

        let order = platform.order(&order_id).await.unwrap();
        let first = order.line_items().next().unwrap();
        assert_eq!(first.original_total_set.as_ref().unwrap().shop_money.amount, "50.00");
        assert_eq!(first.discounted_total_set.as_ref().unwrap().shop_money.amount, "45.00");
        assert_eq!(order.display_total().unwrap().amount, "53.00");
    }

    #[tokio::test]
    async fn create_tag_and_mark_paid() {
        let platform = InMemoryCommerce::new();
        let variants = platform.add_product("Board", &[("Default", 2500)]).await;

        let created = platform
            .order_create(&crate::operations::OrderCreateInput::test_order(
                vec![crate::operations::LineItemInput {
                    variant_id: variants[0].clone(),
                    quantity: 1,
                }],
                "buyer@example.com",
            ))
            .await
            .unwrap();
        let order = created.order.unwrap();

        let tagged = platform
            .tags_add(&order.id, &["alice".to_string()])
            .await
            .unwrap();
        assert!(tagged.user_errors.is_empty());

        let paid = platform.order_mark_as_paid(&order.id).await.unwrap();
        assert_eq!(paid.order.unwrap().display_financial_status, "PAID");

        let page = platform.orders("tag:alice", 25).await.unwrap();
        assert_eq!(page.orders.len(), 1);
        let page = platform.orders("tag:bob", 25).await.unwrap();
        assert!(page.orders.is_empty());
    }

    #[tokio::test]
    async fn injected_failures() {
        let (platform, order_id) = platform_with_order().await;

        platform.fail_with_status("OrderTags", 502).await;
        let err = platform.order_tags(&order_id).await.unwrap_err();
        assert!(matches!(err, GatewayError::Http { status: 502, .. }));

        platform.fail_with_user_error("OrderEditBegin", "Order is locked").await;
        let begin = platform.order_edit_begin(&order_id).await.unwrap();
        assert!(begin.calculated_order.is_none());
        assert_eq!(begin.user_errors[0].message, "Order is locked");

        platform.clear_failures().await;
        assert!(platform.order_tags(&order_id).await.is_ok());
        assert_eq!(
            platform.operations().await,
            vec!["OrderTags", "OrderEditBegin", "OrderTags"]
        );
    }

    #[tokio::test]
    async fn unknown_operation_is_a_graph_error() {
        let platform = InMemoryCommerce::new();
        let err = platform
            .execute("query Shop { shop { name } }", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Graph { .. }));
    }
}
