//! Typed admin operations and their payloads.

use async_trait::async_trait;
use common::{CalculatedOrder, Connection, Gid, Order, Product, UserError};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::Result;
use crate::documents;
use crate::gateway::{CommerceGateway, CommerceGatewayExt};

/// Root of a single-order query; `order` is null for unknown ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLookup {
    pub order: Option<Order>,
}

/// Root of the order listing query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdersPage {
    pub orders: Connection<Order>,
}

/// Root of the product listing query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductsPage {
    pub products: Connection<Product>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEditBeginPayload {
    pub calculated_order: Option<CalculatedOrder>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

/// Payload shared by the three edit mutations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationPayload {
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

/// Id and display name of a committed or created order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderRef {
    pub id: Gid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEditCommitPayload {
    pub order: Option<OrderRef>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatePayload {
    pub order: Option<OrderRef>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaggedNode {
    pub id: Gid,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagsAddPayload {
    pub node: Option<TaggedNode>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaidOrder {
    pub id: Gid,
    pub display_financial_status: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderMarkAsPaidPayload {
    pub order: Option<PaidOrder>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

/// One requested line of a new order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    pub variant_id: Gid,
    pub quantity: i64,
}

/// Input for `orderCreate`. Orders are always created as test orders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreateInput {
    pub line_items: Vec<LineItemInput>,
    pub email: String,
    pub test: bool,
}

impl OrderCreateInput {
    pub fn test_order(line_items: Vec<LineItemInput>, email: impl Into<String>) -> Self {
        Self {
            line_items,
            email: email.into(),
            test: true,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderEditBeginData {
    order_edit_begin: OrderEditBeginPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddLineItemDiscountData {
    order_edit_add_line_item_discount: MutationPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetQuantityData {
    order_edit_set_quantity: MutationPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddVariantData {
    order_edit_add_variant: MutationPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderEditCommitData {
    order_edit_commit: OrderEditCommitPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderCreateData {
    order_create: OrderCreatePayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TagsAddData {
    tags_add: TagsAddPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderMarkAsPaidData {
    order_mark_as_paid: OrderMarkAsPaidPayload,
}

/// Every admin operation the backend issues, available on any gateway.
#[async_trait]
pub trait AdminOperations: CommerceGateway {
    /// Fetches an order's id and tag set.
    async fn order_tags(&self, id: &Gid) -> Result<OrderLookup> {
        self.request(documents::ORDER_TAGS, json!({ "id": id })).await
    }

    /// Fetches an order with totals and its first 20 line items.
    async fn order_detail(&self, id: &Gid) -> Result<OrderLookup> {
        self.request(documents::ORDER_DETAIL, json!({ "id": id })).await
    }

    /// Fetches up to `first` orders matching `query`, newest first.
    async fn orders(&self, query: &str, first: u32) -> Result<OrdersPage> {
        self.request(
            documents::ORDERS_BY_QUERY,
            json!({ "first": first, "q": query }),
        )
        .await
    }

    async fn products(&self, first: u32) -> Result<ProductsPage> {
        self.request(documents::PRODUCTS, json!({ "first": first })).await
    }

    /// Opens an edit session (calculated order) for `order_id`.
    async fn order_edit_begin(&self, order_id: &Gid) -> Result<OrderEditBeginPayload> {
        let data: OrderEditBeginData = self
            .request(documents::ORDER_EDIT_BEGIN, json!({ "id": order_id }))
            .await?;
        Ok(data.order_edit_begin)
    }

    async fn order_edit_add_line_item_discount(
        &self,
        calculated_order_id: &Gid,
        line_item_id: &Gid,
        percent: f64,
        description: &str,
    ) -> Result<MutationPayload> {
        let data: AddLineItemDiscountData = self
            .request(
                documents::ORDER_EDIT_ADD_LINE_ITEM_DISCOUNT,
                json!({
                    "id": calculated_order_id,
                    "lineItemId": line_item_id,
                    "discount": {
                        "percentValue": percent,
                        "description": description,
                    },
                }),
            )
            .await?;
        Ok(data.order_edit_add_line_item_discount)
    }

    async fn order_edit_set_quantity(
        &self,
        calculated_order_id: &Gid,
        line_item_id: &Gid,
        quantity: i64,
    ) -> Result<MutationPayload> {
        let data: SetQuantityData = self
            .request(
                documents::ORDER_EDIT_SET_QUANTITY,
                json!({
                    "id": calculated_order_id,
                    "lineItemId": line_item_id,
                    "quantity": quantity,
                }),
            )
            .await?;
        Ok(data.order_edit_set_quantity)
    }

    async fn order_edit_add_variant(
        &self,
        calculated_order_id: &Gid,
        variant_id: &Gid,
        quantity: i64,
    ) -> Result<MutationPayload> {
        let data: AddVariantData = self
            .request(
                documents::ORDER_EDIT_ADD_VARIANT,
                json!({
                    "id": calculated_order_id,
                    "variantId": variant_id,
                    "quantity": quantity,
                }),
            )
            .await?;
        Ok(data.order_edit_add_variant)
    }

    /// Commits an edit session back into the order.
    async fn order_edit_commit(
        &self,
        calculated_order_id: &Gid,
        notify_customer: bool,
    ) -> Result<OrderEditCommitPayload> {
        let data: OrderEditCommitData = self
            .request(
                documents::ORDER_EDIT_COMMIT,
                json!({ "id": calculated_order_id, "notifyCustomer": notify_customer }),
            )
            .await?;
        Ok(data.order_edit_commit)
    }

    async fn order_create(&self, input: &OrderCreateInput) -> Result<OrderCreatePayload> {
        let data: OrderCreateData = self
            .request(documents::ORDER_CREATE, json!({ "order": input }))
            .await?;
        Ok(data.order_create)
    }

    async fn tags_add(&self, id: &Gid, tags: &[String]) -> Result<TagsAddPayload> {
        let data: TagsAddData = self
            .request(documents::TAGS_ADD, json!({ "id": id, "tags": tags }))
            .await?;
        Ok(data.tags_add)
    }

    async fn order_mark_as_paid(&self, id: &Gid) -> Result<OrderMarkAsPaidPayload> {
        let data: OrderMarkAsPaidData = self
            .request(documents::ORDER_MARK_AS_PAID, json!({ "input": { "id": id } }))
            .await?;
        Ok(data.order_mark_as_paid)
    }
}

impl<G: CommerceGateway + ?Sized> AdminOperations for G {}
