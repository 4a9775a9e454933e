use thiserror::Error;

/// Errors that can occur when talking to the commerce platform.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never produced an HTTP response.
    #[error("Commerce transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The platform answered with a non-2xx status.
    #[error("Commerce HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    /// The platform reported top-level GraphQL errors.
    #[error("Commerce GraphQL errors: {}", render_errors(.errors))]
    Graph { errors: Vec<serde_json::Value> },

    /// A 2xx response without a `data` member.
    #[error("Commerce response is missing data")]
    EmptyPayload,

    /// The payload did not match the expected shape.
    #[error("Commerce payload decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

fn render_errors(errors: &[serde_json::Value]) -> String {
    serde_json::to_string(errors).unwrap_or_else(|_| format!("{} error(s)", errors.len()))
}

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
