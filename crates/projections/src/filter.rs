//! Visibility rules for the order listing.

use std::collections::HashSet;

use common::{Connection, Order};

/// Display names hidden from the listing unless configured otherwise.
pub const DEFAULT_HIDDEN_ORDER_NAMES: &[&str] = &[
    "#1087", "#1067", "#1036", "#1016", "#1015", "#1006", "#1004", "#1003",
];

/// Decides which fetched orders the listing shows.
///
/// An order is visible when it has at least one line item with a positive
/// quantity, its current (else original) total is positive, and its display
/// name is not on the denylist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingFilter {
    hidden_names: HashSet<String>,
}

impl ListingFilter {
    pub fn new<I, S>(hidden_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hidden_names: hidden_names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_hidden_name(&self, name: &str) -> bool {
        self.hidden_names.contains(name)
    }

    pub fn is_visible(&self, order: &Order) -> bool {
        let has_total = order.display_total().is_some_and(|total| total.is_positive());
        let hidden = order
            .name
            .as_deref()
            .is_some_and(|name| self.is_hidden_name(name));

        order.has_active_line_items() && has_total && !hidden
    }

    /// Drops invisible orders in place, keeping order. Returns how many were dropped.
    pub fn apply(&self, orders: &mut Connection<Order>) -> usize {
        let before = orders.len();
        orders.retain(|order| self.is_visible(order));
        before - orders.len()
    }
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self::new(DEFAULT_HIDDEN_ORDER_NAMES.iter().copied())
    }
}
