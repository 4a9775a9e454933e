//! Caller identity endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use commerce::CommerceGateway;
use orchestration::MarketingSink;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoAmIResponse {
    pub identity_tag: String,
}

/// GET /whoami: the identity tag requests act as.
pub async fn whoami<G, M>(State(state): State<Arc<AppState<G, M>>>) -> Json<WhoAmIResponse>
where
    G: CommerceGateway + Clone + 'static,
    M: MarketingSink + Clone + 'static,
{
    Json(WhoAmIResponse {
        identity_tag: state.identity_tag.clone(),
    })
}
