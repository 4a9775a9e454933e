//! Order placement workflow: create, tag, mark paid, notify.

use commerce::CommerceGateway;
use domain::{OrderService, PlaceOrderCommand};

use crate::error::PlacementError;
use crate::events::MarketingEvent;
use crate::outcome::{PlacementOutcome, deliver};
use crate::services::MarketingSink;

pub const STEP_CREATE: &str = "create_order";
pub const STEP_TAG: &str = "tag_order";
pub const STEP_MARK_PAID: &str = "mark_paid";

/// Places test orders owned by one identity tag.
pub struct OrderPlacement<G, M>
where
    G: CommerceGateway,
    M: MarketingSink,
{
    orders: OrderService<G>,
    sink: M,
    identity_tag: String,
}

impl<G, M> OrderPlacement<G, M>
where
    G: CommerceGateway,
    M: MarketingSink,
{
    pub fn new(gateway: G, sink: M, identity_tag: impl Into<String>) -> Self {
        Self {
            orders: OrderService::new(gateway),
            sink,
            identity_tag: identity_tag.into(),
        }
    }

    /// Creates the order, tags it with the identity tag and marks it paid,
    /// then sends a best-effort `Order Created` event.
    #[tracing::instrument(skip(self, cmd), fields(lines = cmd.line_items.len()))]
    pub async fn place(&self, cmd: PlaceOrderCommand) -> Result<PlacementOutcome, PlacementError> {
        tracing::info!(step = STEP_CREATE, "order placement step");
        let created = self
            .orders
            .create_order(&cmd)
            .await
            .map_err(|source| PlacementError::Step {
                step: STEP_CREATE,
                source,
            })?;

        tracing::info!(step = STEP_TAG, order_id = %created.id, "order placement step");
        self.orders
            .tag_order(&created.id, &self.identity_tag)
            .await
            .map_err(|source| PlacementError::Step {
                step: STEP_TAG,
                source,
            })?;

        tracing::info!(step = STEP_MARK_PAID, order_id = %created.id, "order placement step");
        let paid = self
            .orders
            .mark_paid(&created.id)
            .await
            .map_err(|source| PlacementError::Step {
                step: STEP_MARK_PAID,
                source,
            })?;

        metrics::counter!("orders_placed_total").increment(1);

        let event = MarketingEvent::order_created(&created.id, &self.identity_tag, &cmd.email);
        let notification = deliver(&self.sink, &event).await;
        tracing::info!(
            order_id = %created.id,
            name = %created.name,
            notification_failed = notification.is_failed(),
            "order placed"
        );

        Ok(PlacementOutcome {
            order_id: created.id,
            name: created.name,
            financial_status: paid.display_financial_status,
            notification,
        })
    }
}
