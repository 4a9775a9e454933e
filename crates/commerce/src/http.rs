//! HTTP implementation of the gateway against the admin GraphQL endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::documents::operation_name;
use crate::gateway::CommerceGateway;
use crate::{GatewayError, Result};

/// Connection settings for the commerce admin API.
#[derive(Clone, PartialEq, Eq)]
pub struct CommerceConfig {
    /// Store base URL, e.g. `https://my-store.myshopify.com`.
    pub store_url: String,
    pub access_token: String,
    pub api_version: String,
}

impl CommerceConfig {
    pub const DEFAULT_API_VERSION: &'static str = "2024-10";

    /// Creates a config using the default API version.
    pub fn new(store_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            store_url: store_url.into(),
            access_token: access_token.into(),
            api_version: Self::DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Returns the GraphQL endpoint for the configured store and version.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/admin/api/{}/graphql.json",
            self.store_url.trim_end_matches('/'),
            self.api_version
        )
    }
}

impl std::fmt::Debug for CommerceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommerceConfig")
            .field("store_url", &self.store_url)
            .field("access_token", &"<redacted>")
            .field("api_version", &self.api_version)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<Value>>,
}

/// Admin API gateway over HTTPS.
///
/// The access token is sent as `X-Shopify-Access-Token` and never logged.
#[derive(Clone)]
pub struct AdminGateway {
    http: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl AdminGateway {
    /// Creates a gateway from the shared configuration.
    pub fn new(config: &CommerceConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Creates a gateway that reuses an existing HTTP client.
    pub fn with_client(config: &CommerceConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            endpoint: config.endpoint(),
            access_token: config.access_token.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for AdminGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGateway")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CommerceGateway for AdminGateway {
    async fn execute(&self, document: &str, variables: Value) -> Result<Value> {
        let operation = operation_name(document).unwrap_or("anonymous");
        metrics::counter!("commerce_requests_total", "operation" => operation.to_string())
            .increment(1);

        let response = self
            .http
            .post(&self.endpoint)
            .header("X-Shopify-Access-Token", &self.access_token)
            .json(&json!({ "query": document, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(operation, status = status.as_u16(), "commerce response");

        if !status.is_success() {
            return Err(GatewayError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GraphqlResponse = serde_json::from_str(&body)?;
        if let Some(errors) = envelope.errors
            && !errors.is_empty()
        {
            tracing::warn!(operation, count = errors.len(), "commerce GraphQL errors");
            return Err(GatewayError::Graph { errors });
        }

        envelope
            .data
            .filter(|data| !data.is_null())
            .ok_or(GatewayError::EmptyPayload)
    }
}
