use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::Result;

/// Core trait for commerce platform access.
///
/// One call is one round trip: no retries, no caching. Implementations must
/// turn transport failures, non-2xx statuses, top-level GraphQL `errors` and
/// a missing `data` member into the matching [`crate::GatewayError`].
#[async_trait]
pub trait CommerceGateway: Send + Sync {
    /// Sends `document` with `variables` and returns the response's `data`.
    async fn execute(&self, document: &str, variables: Value) -> Result<Value>;
}

/// Extension trait providing typed requests for every gateway.
#[async_trait]
pub trait CommerceGatewayExt: CommerceGateway {
    /// Sends a document and decodes `data` into `T`.
    async fn request<T>(&self, document: &str, variables: Value) -> Result<T>
    where
        T: DeserializeOwned + Send,
    {
        let data = self.execute(document, variables).await?;
        Ok(serde_json::from_value(data)?)
    }
}

// Blanket implementation for all CommerceGateway implementations
impl<G: CommerceGateway + ?Sized> CommerceGatewayExt for G {}

