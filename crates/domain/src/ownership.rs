//! Tag-based order ownership.

use commerce::{AdminOperations, CommerceGateway};
use common::{Gid, Order};

use crate::error::OwnershipError;

/// Verifies that `order_id` exists and carries `identity_tag`.
///
/// Returns the order (id and tags only) on success. Read-only; callers must
/// run this before any mutating step.
#[tracing::instrument(skip(gateway))]
pub async fn ensure_owned<G>(
    gateway: &G,
    order_id: &Gid,
    identity_tag: &str,
) -> Result<Order, OwnershipError>
where
    G: CommerceGateway + ?Sized,
{
    let lookup = gateway.order_tags(order_id).await?;

    let Some(order) = lookup.order else {
        tracing::warn!(%order_id, "order not found");
        metrics::counter!("order_ownership_rejections_total", "reason" => "not_found")
            .increment(1);
        return Err(OwnershipError::NotFound {
            order_id: order_id.clone(),
        });
    };

    if !order.has_tag(identity_tag) {
        tracing::warn!(%order_id, "order does not carry the caller's tag");
        metrics::counter!("order_ownership_rejections_total", "reason" => "forbidden")
            .increment(1);
        return Err(OwnershipError::Forbidden {
            order_id: order_id.clone(),
        });
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use commerce::InMemoryCommerce;

    #[tokio::test]
    async fn owned_order_passes() {
        let platform = InMemoryCommerce::new();
        let order_id = platform.seed_order(&["alice"], &[("Board", 1, 1000)]).await;

        let order = ensure_owned(&platform, &order_id, "alice").await.unwrap();
        assert_eq!(order.id, order_id);
    }

    #[tokio::test]
    async fn foreign_order_is_forbidden() {
        let platform = InMemoryCommerce::new();
        let order_id = platform.seed_order(&["bob"], &[("Board", 1, 1000)]).await;

        let err = ensure_owned(&platform, &order_id, "alice").await.unwrap_err();
        assert!(matches!(err, OwnershipError::Forbidden { .. }));
        assert_eq!(err.to_string(), "Forbidden: not your order");
    }

    #[tokio::test]
    async fn unknown_order_is_not_found() {
        let platform = InMemoryCommerce::new();
        let err = ensure_owned(&platform, &Gid::new("gid://shopify/Order/42"), "alice")
            .await
            .unwrap_err();
        assert!(matches!(err, OwnershipError::NotFound { .. }));
        assert_eq!(err.to_string(), "Order not found");
    }

    #[tokio::test]
    async fn gateway_failure_propagates() {
        let platform = InMemoryCommerce::new();
        let order_id = platform.seed_order(&["alice"], &[("Board", 1, 1000)]).await;
        platform.fail_with_status("OrderTags", 503).await;

        let err = ensure_owned(&platform, &order_id, "alice").await.unwrap_err();
        assert!(matches!(err, OwnershipError::Gateway(_)));
    }
}
