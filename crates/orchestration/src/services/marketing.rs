//! Marketing event sink trait, Klaviyo client and in-memory implementation.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::{Value, json};
use tokio::sync::RwLock;

use crate::error::MarketingError;
use crate::events::MarketingEvent;

/// What the events API answered for an accepted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkReceipt {
    pub status: u16,
    /// `data.id` from the response body, when it carried one.
    pub event_id: Option<String>,
}

/// Trait for marketing event delivery.
///
/// Single attempt, no retries. Callers treat failures as advisory.
#[async_trait]
pub trait MarketingSink: Send + Sync {
    async fn send(&self, event: &MarketingEvent) -> Result<SinkReceipt, MarketingError>;
}

/// Connection settings for the marketing events API.
#[derive(Clone, PartialEq, Eq)]
pub struct MarketingConfig {
    pub private_api_key: String,
    /// API base URL without the `/api/events/` path.
    pub base_url: String,
    pub revision: String,
}

impl MarketingConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://a.klaviyo.com";
    pub const REVISION: &'static str = "2025-10-15";

    pub fn new(private_api_key: impl Into<String>) -> Self {
        Self {
            private_api_key: private_api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            revision: Self::REVISION.to_string(),
        }
    }

    /// Overrides the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn events_endpoint(&self) -> String {
        format!("{}/api/events/", self.base_url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for MarketingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketingConfig")
            .field("private_api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("revision", &self.revision)
            .finish()
    }
}

/// Klaviyo events API client.
#[derive(Clone)]
pub struct KlaviyoSink {
    http: reqwest::Client,
    endpoint: String,
    private_api_key: String,
    revision: String,
}

impl KlaviyoSink {
    pub fn new(config: &MarketingConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(config: &MarketingConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            endpoint: config.events_endpoint(),
            private_api_key: config.private_api_key.clone(),
            revision: config.revision.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for KlaviyoSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KlaviyoSink")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// JSON:API document for one event; metric and profile sit under `attributes`.
pub fn event_document(event: &MarketingEvent) -> Value {
    let unique_id = event
        .unique_id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    json!({
        "data": {
            "type": "event",
            "attributes": {
                "properties": event.properties,
                "unique_id": unique_id,
                "metric": {
                    "data": { "type": "metric", "attributes": { "name": event.metric.name() } }
                },
                "profile": {
                    "data": { "type": "profile", "attributes": { "email": event.profile_email } }
                }
            }
        }
    })
}

#[async_trait]
impl MarketingSink for KlaviyoSink {
    #[tracing::instrument(skip(self, event), fields(metric = %event.metric))]
    async fn send(&self, event: &MarketingEvent) -> Result<SinkReceipt, MarketingError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Klaviyo-API-Key {}", self.private_api_key))
            .header("revision", &self.revision)
            .header(ACCEPT, "application/json")
            .json(&event_document(event))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(status, "marketing events API response");

        if !(200..300).contains(&status) {
            return Err(MarketingError::Api { status, body });
        }

        // 202 Accepted carries no body.
        let event_id = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|doc| doc["data"]["id"].as_str().map(str::to_string));

        Ok(SinkReceipt { status, event_id })
    }
}

#[derive(Debug, Default)]
struct InMemorySinkState {
    events: Vec<MarketingEvent>,
    next_id: u32,
    fail_on_send: bool,
}

/// In-memory marketing sink for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMarketingSink {
    state: Arc<RwLock<InMemorySinkState>>,
}

impl InMemoryMarketingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the sink to reject every following send.
    pub async fn set_fail_on_send(&self, fail: bool) {
        self.state.write().await.fail_on_send = fail;
    }

    /// Returns the accepted events, oldest first.
    pub async fn events(&self) -> Vec<MarketingEvent> {
        self.state.read().await.events.clone()
    }

    pub async fn event_count(&self) -> usize {
        self.state.read().await.events.len()
    }
}

#[async_trait]
impl MarketingSink for InMemoryMarketingSink {
    async fn send(&self, event: &MarketingEvent) -> Result<SinkReceipt, MarketingError> {
        let mut state = self.state.write().await;

        if state.fail_on_send {
            return Err(MarketingError::Api {
                status: 503,
                body: "marketing sink unavailable".to_string(),
            });
        }

        state.next_id += 1;
        let event_id = format!("EVT-{:04}", state.next_id);
        state.events.push(event.clone());

        Ok(SinkReceipt {
            status: 202,
            event_id: Some(event_id),
        })
    }
}
