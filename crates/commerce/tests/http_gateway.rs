//! Integration tests for the HTTP admin gateway against a mock endpoint.

use commerce::{AdminGateway, AdminOperations, CommerceConfig, GatewayError, Gid};
use httpmock::prelude::*;
use serde_json::json;

const TOKEN: &str = "shpat_test_token";
const GRAPHQL_PATH: &str = "/admin/api/2024-10/graphql.json";

fn gateway(server: &MockServer) -> AdminGateway {
    AdminGateway::new(&CommerceConfig::new(server.base_url(), TOKEN))
}

#[tokio::test]
async fn test_query_sends_token_and_decodes_data() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(GRAPHQL_PATH)
                .header("X-Shopify-Access-Token", TOKEN)
                .body_contains("query OrderTags")
                .body_contains("gid://shopify/Order/1");
            then.status(200).json_body(json!({
                "data": { "order": { "id": "gid://shopify/Order/1", "tags": ["alice"] } }
            }));
        })
        .await;

    let lookup = gateway(&server)
        .order_tags(&Gid::new("gid://shopify/Order/1"))
        .await
        .unwrap();

    mock.assert_async().await;
    let order = lookup.order.unwrap();
    assert!(order.has_tag("alice"));
}

#[tokio::test]
async fn test_unknown_order_decodes_as_none() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(GRAPHQL_PATH);
            then.status(200).json_body(json!({ "data": { "order": null } }));
        })
        .await;

    let lookup = gateway(&server)
        .order_tags(&Gid::new("gid://shopify/Order/404"))
        .await
        .unwrap();
    assert!(lookup.order.is_none());
}

#[tokio::test]
async fn test_non_success_status_is_http_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(GRAPHQL_PATH);
            then.status(401)
                .body(r#"{"errors":"[API] Invalid API key or access token"}"#);
        })
        .await;

    let err = gateway(&server).products(10).await.unwrap_err();
    match err {
        GatewayError::Http { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid API key"));
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_graphql_errors_are_surfaced() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(GRAPHQL_PATH);
            then.status(200).json_body(json!({
                "errors": [{ "message": "Throttled" }],
                "data": null
            }));
        })
        .await;

    let err = gateway(&server).products(10).await.unwrap_err();
    assert!(matches!(err, GatewayError::Graph { ref errors } if errors.len() == 1));
    assert!(err.to_string().contains("Throttled"));
}

#[tokio::test]
async fn test_missing_data_is_empty_payload() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(GRAPHQL_PATH);
            then.status(200).json_body(json!({ "data": null }));
        })
        .await;

    let err = gateway(&server).products(10).await.unwrap_err();
    assert!(matches!(err, GatewayError::EmptyPayload));
}

#[tokio::test]
async fn test_mutation_user_errors_are_returned_in_payload() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(GRAPHQL_PATH)
                .body_contains("mutation OrderEditSetQuantity")
                .body_contains("gid://shopify/CalculatedLineItem/7");
            then.status(200).json_body(json!({
                "data": {
                    "orderEditSetQuantity": {
                        "calculatedOrder": null,
                        "userErrors": [{
                            "field": ["lineItemId"],
                            "message": "The line item has already been removed."
                        }]
                    }
                }
            }));
        })
        .await;

    let payload = gateway(&server)
        .order_edit_set_quantity(
            &Gid::new("gid://shopify/CalculatedOrder/3"),
            &Gid::new("gid://shopify/CalculatedLineItem/7"),
            0,
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(payload.user_errors.len(), 1);
    assert_eq!(
        payload.user_errors[0].to_string(),
        "lineItemId: The line item has already been removed."
    );
}

#[tokio::test]
async fn test_undecodable_body_is_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(GRAPHQL_PATH);
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let err = gateway(&server).products(10).await.unwrap_err();
    assert!(matches!(err, GatewayError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let config = CommerceConfig::new("http://127.0.0.1:1", TOKEN);
    let err = AdminGateway::new(&config)
        .order_tags(&Gid::new("gid://shopify/Order/1"))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)));
}
