//! The order listing projection.

use commerce::{AdminOperations, CommerceGateway};
use common::{Connection, Order};

use crate::error::Result;
use crate::filter::ListingFilter;

/// Orders fetched per listing request, newest first.
pub const LISTING_PAGE_SIZE: u32 = 25;

/// Builds the identity's order listing from the platform.
///
/// The platform is queried by tag on every call; nothing is cached, so the
/// listing always reflects committed edits.
#[derive(Debug, Clone)]
pub struct OrderListingProjector<G> {
    gateway: G,
    filter: ListingFilter,
}

impl<G: CommerceGateway> OrderListingProjector<G> {
    pub fn new(gateway: G) -> Self {
        Self::with_filter(gateway, ListingFilter::default())
    }

    pub fn with_filter(gateway: G, filter: ListingFilter) -> Self {
        Self { gateway, filter }
    }

    pub fn filter(&self) -> &ListingFilter {
        &self.filter
    }

    /// Returns the visible orders tagged with `identity_tag`, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, identity_tag: &str) -> Result<Connection<Order>> {
        let query = format!("tag:{identity_tag}");
        let page = self.gateway.orders(&query, LISTING_PAGE_SIZE).await?;

        let mut orders = page.orders;
        let fetched = orders.len();
        let hidden = self.filter.apply(&mut orders);

        metrics::counter!("order_listing_hidden_total").increment(hidden as u64);
        tracing::debug!(fetched, hidden, "order listing projected");

        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commerce::InMemoryCommerce;

    #[tokio::test]
    async fn queries_by_tag_with_page_size() {
        let platform = InMemoryCommerce::new();
        for _ in 0..30 {
            platform.seed_order(&["alice"], &[("Board", 1, 1000)]).await;
        }

        let projector =
            OrderListingProjector::with_filter(platform.clone(), ListingFilter::new(Vec::<String>::new()));
        let orders = projector.list("alice").await.unwrap();

        assert_eq!(orders.len(), LISTING_PAGE_SIZE as usize);
        assert_eq!(platform.operations().await, vec!["MyOrders"]);
    }
}
