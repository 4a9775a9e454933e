//! Catalog endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use commerce::{CommerceGateway, ProductsPage};
use orchestration::MarketingSink;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /products: first catalog products with their variants.
#[tracing::instrument(skip(state))]
pub async fn list<G, M>(
    State(state): State<Arc<AppState<G, M>>>,
) -> Result<Json<ProductsPage>, ApiError>
where
    G: CommerceGateway + Clone + 'static,
    M: MarketingSink + Clone + 'static,
{
    Ok(Json(state.orders.products().await?))
}
