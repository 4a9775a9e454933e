//! Order listing, placement, verification and edit endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use commerce::{CommerceGateway, OrdersPage};
use common::{Gid, Order};
use domain::{ModifyRequest, PlaceOrderRequest, ValidationError};
use orchestration::{MarketingSink, ModifyOutcome, PlacementOutcome};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    pub id: Option<String>,
}

// -- Response types --

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    pub order_id: String,
    pub name: String,
    pub financial_status: String,
    pub klaviyo_event_id: Option<String>,
    pub klaviyo_status: Option<u16>,
    pub klaviyo_error: Option<String>,
}

impl From<PlacementOutcome> for PlaceOrderResponse {
    fn from(outcome: PlacementOutcome) -> Self {
        Self {
            order_id: outcome.order_id.to_string(),
            name: outcome.name,
            financial_status: outcome.financial_status,
            klaviyo_event_id: outcome.notification.event_id,
            klaviyo_status: outcome.notification.status,
            klaviyo_error: outcome.notification.error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub order: Order,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyResponse {
    pub success: bool,
    pub message: String,
    pub klaviyo_status: Option<u16>,
    pub klaviyo_event_id: Option<String>,
    pub klaviyo_error: Option<String>,
    pub order_name: Option<String>,
}

impl From<ModifyOutcome> for ModifyResponse {
    fn from(outcome: ModifyOutcome) -> Self {
        Self {
            success: true,
            message: outcome.message(),
            klaviyo_status: outcome.notification.status,
            klaviyo_event_id: outcome.notification.event_id,
            klaviyo_error: outcome.notification.error,
            order_name: outcome.order_name,
        }
    }
}

// -- Handlers --

/// GET /orders: the caller's visible orders, newest first.
#[tracing::instrument(skip(state))]
pub async fn list<G, M>(
    State(state): State<Arc<AppState<G, M>>>,
) -> Result<Json<OrdersPage>, ApiError>
where
    G: CommerceGateway + Clone + 'static,
    M: MarketingSink + Clone + 'static,
{
    let orders = state.listing.list(&state.identity_tag).await?;
    Ok(Json(OrdersPage { orders }))
}

/// POST /orders: place a paid test order tagged with the caller's identity.
#[tracing::instrument(skip(state, payload))]
pub async fn place<G, M>(
    State(state): State<Arc<AppState<G, M>>>,
    payload: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> Result<Json<PlaceOrderResponse>, ApiError>
where
    G: CommerceGateway + Clone + 'static,
    M: MarketingSink + Clone + 'static,
{
    let Json(req) = payload?;
    let cmd = req.validate(state.profile_email.as_deref())?;
    let outcome = state.placement.place(cmd).await?;
    Ok(Json(outcome.into()))
}

/// GET /orders/verify?id=: an owned order's full detail.
#[tracing::instrument(skip(state))]
pub async fn verify<G, M>(
    State(state): State<Arc<AppState<G, M>>>,
    Query(query): Query<VerifyQuery>,
) -> Result<Json<VerifyResponse>, ApiError>
where
    G: CommerceGateway + Clone + 'static,
    M: MarketingSink + Clone + 'static,
{
    let id = query
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or(ValidationError::MissingId)?;
    let order = state
        .orders
        .order_detail(&Gid::new(id), &state.identity_tag)
        .await?;
    Ok(Json(VerifyResponse { order }))
}

/// POST /orders/modify: apply one discount, remove or add edit.
#[tracing::instrument(skip(state, payload))]
pub async fn modify<G, M>(
    State(state): State<Arc<AppState<G, M>>>,
    payload: Result<Json<ModifyRequest>, JsonRejection>,
) -> Result<Json<ModifyResponse>, ApiError>
where
    G: CommerceGateway + Clone + 'static,
    M: MarketingSink + Clone + 'static,
{
    let Json(req) = payload?;
    let cmd = req.validate(state.profile_email.as_deref())?;
    let outcome = state.editor.modify(cmd).await?;
    Ok(Json(outcome.into()))
}
