//! Shared application state.

use commerce::CommerceGateway;
use domain::OrderService;
use orchestration::{MarketingSink, OrderEditOrchestrator, OrderPlacement};
use projections::{ListingFilter, OrderListingProjector};

use crate::config::Config;

/// Shared application state accessible from all handlers.
///
/// Every request acts as the single configured identity tag.
pub struct AppState<G, M>
where
    G: CommerceGateway,
    M: MarketingSink,
{
    pub identity_tag: String,
    /// Notification email used when a request does not supply one.
    pub profile_email: Option<String>,
    pub orders: OrderService<G>,
    pub listing: OrderListingProjector<G>,
    pub editor: OrderEditOrchestrator<G, M>,
    pub placement: OrderPlacement<G, M>,
}

impl<G, M> AppState<G, M>
where
    G: CommerceGateway + Clone,
    M: MarketingSink + Clone,
{
    pub fn new(gateway: G, sink: M, identity_tag: impl Into<String>) -> Self {
        let identity_tag = identity_tag.into();
        Self {
            orders: OrderService::new(gateway.clone()),
            listing: OrderListingProjector::new(gateway.clone()),
            editor: OrderEditOrchestrator::new(gateway.clone(), sink.clone(), identity_tag.clone()),
            placement: OrderPlacement::new(gateway, sink, identity_tag.clone()),
            identity_tag,
            profile_email: None,
        }
    }

    /// Builds the state for a loaded configuration.
    pub fn from_config(gateway: G, sink: M, config: &Config) -> Self {
        Self::new(gateway, sink, config.identity_tag.clone())
            .with_profile_email(config.profile_email.clone())
            .with_listing_filter(config.listing_filter())
    }

    pub fn with_profile_email(mut self, email: Option<String>) -> Self {
        self.profile_email = email;
        self
    }

    pub fn with_listing_filter(mut self, filter: ListingFilter) -> Self {
        self.listing = OrderListingProjector::with_filter(self.orders.gateway().clone(), filter);
        self
    }
}
