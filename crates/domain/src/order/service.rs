//! Order service providing a simplified API for order operations.

use commerce::{AdminOperations, CommerceGateway, OrderRef, PaidOrder, ProductsPage};
use common::{Gid, Order, UserError};

use crate::error::{DomainError, OwnershipError, Result};
use crate::ownership::ensure_owned;

use super::PlaceOrderCommand;

/// Products returned by the catalog listing.
pub const PRODUCT_PAGE_SIZE: u32 = 10;

/// Service for reading and placing orders.
///
/// Wraps a commerce gateway and turns platform user errors into
/// [`DomainError::Rejected`].
#[derive(Debug, Clone)]
pub struct OrderService<G> {
    gateway: G,
}

impl<G: CommerceGateway> OrderService<G> {
    /// Creates a new order service over the given gateway.
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Returns a reference to the underlying gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Fetches an owned order with totals and line items.
    #[tracing::instrument(skip(self))]
    pub async fn order_detail(&self, order_id: &Gid, identity_tag: &str) -> Result<Order> {
        ensure_owned(&self.gateway, order_id, identity_tag).await?;

        self.gateway
            .order_detail(order_id)
            .await?
            .order
            .ok_or_else(|| {
                OwnershipError::NotFound {
                    order_id: order_id.clone(),
                }
                .into()
            })
    }

    /// Lists the first catalog products with their variants.
    #[tracing::instrument(skip(self))]
    pub async fn products(&self) -> Result<ProductsPage> {
        Ok(self.gateway.products(PRODUCT_PAGE_SIZE).await?)
    }

    /// Creates a test order for the command's line items and email.
    #[tracing::instrument(skip(self, cmd), fields(lines = cmd.line_items.len()))]
    pub async fn create_order(&self, cmd: &PlaceOrderCommand) -> Result<OrderRef> {
        let payload = self.gateway.order_create(&cmd.to_input()).await?;
        reject_on_user_errors("orderCreate", payload.user_errors)?;
        payload.order.ok_or(DomainError::MissingResource {
            operation: "orderCreate",
            resource: "order",
        })
    }

    /// Adds the identity tag that makes an order visible to its owner.
    #[tracing::instrument(skip(self))]
    pub async fn tag_order(&self, order_id: &Gid, identity_tag: &str) -> Result<()> {
        let payload = self
            .gateway
            .tags_add(order_id, &[identity_tag.to_string()])
            .await?;
        reject_on_user_errors("tagsAdd", payload.user_errors)
    }

    #[tracing::instrument(skip(self))]
    pub async fn mark_paid(&self, order_id: &Gid) -> Result<PaidOrder> {
        let payload = self.gateway.order_mark_as_paid(order_id).await?;
        reject_on_user_errors("orderMarkAsPaid", payload.user_errors)?;
        payload.order.ok_or(DomainError::MissingResource {
            operation: "orderMarkAsPaid",
            resource: "order",
        })
    }
}

fn reject_on_user_errors(operation: &'static str, errors: Vec<UserError>) -> Result<()> {
    if errors.is_empty() {
        return Ok(());
    }
    tracing::warn!(
        operation,
        errors = %common::user_error_messages(&errors),
        "platform rejected operation"
    );
    Err(DomainError::Rejected { operation, errors })
}
