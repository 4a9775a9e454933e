//! Integration tests: platform orders → listing projection.

use commerce::{AdminOperations, InMemoryCommerce};
use common::Order;
use projections::{ListingFilter, OrderListingProjector};

fn names<'a>(orders: impl Iterator<Item = &'a Order>) -> Vec<String> {
    orders.filter_map(|o| o.name.clone()).collect()
}

/// Seeds past the default denylisted names so they do not interfere.
async fn platform_past_denylist() -> InMemoryCommerce {
    let platform = InMemoryCommerce::new();
    for _ in 0..87 {
        platform.seed_order(&["filler"], &[("Filler", 1, 100)]).await;
    }
    platform
}

#[tokio::test]
async fn test_only_own_tag_newest_first() {
    let platform = platform_past_denylist().await;
    let first = platform.seed_order(&["alice"], &[("Board", 1, 2500)]).await;
    platform.seed_order(&["bob"], &[("Wax", 2, 500)]).await;
    let second = platform.seed_order(&["vip", "alice"], &[("Leash", 1, 1500)]).await;

    let projector = OrderListingProjector::new(platform.clone());
    let orders = projector.list("alice").await.unwrap();

    let ids: Vec<_> = orders.nodes().map(|o| o.id.clone()).collect();
    assert_eq!(ids, vec![second, first]);
    assert!(orders.nodes().all(|o| o.has_tag("alice")));
}

#[tokio::test]
async fn test_hides_emptied_and_zero_total_orders() {
    let platform = platform_past_denylist().await;
    platform.seed_order(&["alice"], &[("Board", 1, 2500)]).await;
    platform.seed_order(&["alice"], &[("Board", 0, 2500)]).await;
    platform.seed_order(&["alice"], &[("Sticker", 1, 0)]).await;

    let orders = OrderListingProjector::new(platform)
        .list("alice")
        .await
        .unwrap();

    assert_eq!(names(orders.nodes()), vec!["#1088"]);
}

#[tokio::test]
async fn test_order_disappears_after_last_item_removed() {
    let platform = platform_past_denylist().await;
    let id = platform.seed_order(&["alice"], &[("Board", 1, 2500)]).await;
    let projector = OrderListingProjector::new(platform.clone());
    assert_eq!(projector.list("alice").await.unwrap().len(), 1);

    let begin = platform.order_edit_begin(&id).await.unwrap();
    let calculated = begin.calculated_order.unwrap();
    let line_item = calculated.first_line_item().unwrap().id.clone();
    platform
        .order_edit_set_quantity(&calculated.id, &line_item, 0)
        .await
        .unwrap();
    platform.order_edit_commit(&calculated.id, false).await.unwrap();

    assert!(projector.list("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_default_denylist_applies() {
    let platform = InMemoryCommerce::new();
    for _ in 0..4 {
        platform.seed_order(&["alice"], &[("Board", 1, 2500)]).await;
    }

    let orders = OrderListingProjector::new(platform.clone())
        .list("alice")
        .await
        .unwrap();
    assert_eq!(names(orders.nodes()), vec!["#1002", "#1001"]);

    let unfiltered = OrderListingProjector::with_filter(platform, ListingFilter::new(["#1001"]))
        .list("alice")
        .await
        .unwrap();
    assert_eq!(names(unfiltered.nodes()), vec!["#1004", "#1003", "#1002"]);
}

#[tokio::test]
async fn test_gateway_failure_propagates() {
    let platform = InMemoryCommerce::new();
    platform.fail_with_status("MyOrders", 502).await;

    let result = OrderListingProjector::new(platform).list("alice").await;
    assert!(result.is_err());
}
