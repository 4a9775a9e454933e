//! HTTP API server for the tagged storefront.
//!
//! Provides REST endpoints for order listing, placement, verification and
//! editing on behalf of one identity tag, with structured logging (tracing)
//! and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use commerce::CommerceGateway;
use metrics_exporter_prometheus::PrometheusHandle;
use orchestration::MarketingSink;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::{Config, ConfigError};
pub use error::ApiError;
pub use state::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<G, M>(state: Arc<AppState<G, M>>, metrics_handle: PrometheusHandle) -> Router
where
    G: CommerceGateway + Clone + 'static,
    M: MarketingSink + Clone + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::observability::metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::observability::health))
        .route(
            "/orders",
            get(routes::orders::list::<G, M>).post(routes::orders::place::<G, M>),
        )
        .route("/orders/verify", get(routes::orders::verify::<G, M>))
        .route("/orders/modify", post(routes::orders::modify::<G, M>))
        .route("/products", get(routes::products::list::<G, M>))
        .route("/whoami", get(routes::identity::whoami::<G, M>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
