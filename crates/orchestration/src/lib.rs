//! Order edit orchestration for the tagged storefront.
//!
//! An edit runs as a two-phase protocol:
//! 1. Check ownership, begin an edit session, resolve the target line item,
//!    apply one mutation and commit. Failures abort the request and abandon
//!    any open session.
//! 2. Send an `Order Modified` marketing event. Failures are reported as data
//!    in the outcome and never fail the request.
//!
//! Order placement follows the same shape: create, tag and mark paid, then a
//! best-effort `Order Created` event.

pub mod coordinator;
pub mod error;
pub mod events;
pub mod order_edit;
pub mod outcome;
pub mod placement;
pub mod services;
pub mod state;

pub use coordinator::{OrderEditOrchestrator, resolve_target};
pub use error::{EditError, MarketingError, PlacementError};
pub use events::{MarketingEvent, Metric, modification_unique_id};
pub use outcome::{ModifyOutcome, NotificationOutcome, PlacementOutcome, deliver};
pub use placement::OrderPlacement;
pub use services::{
    InMemoryMarketingSink, KlaviyoSink, MarketingConfig, MarketingSink, SinkReceipt,
};
pub use state::{EditProgress, EditState};
