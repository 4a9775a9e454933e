//! External services the orchestrator depends on.

pub mod marketing;

pub use marketing::{
    InMemoryMarketingSink, KlaviyoSink, MarketingConfig, MarketingSink, SinkReceipt,
    event_document,
};
