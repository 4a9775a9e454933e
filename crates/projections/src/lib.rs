//! Order listing projection.
//!
//! The read side of the storefront: the orders an identity tag may see.
//! - [`OrderListingProjector`] fetches the newest tagged orders
//! - [`ListingFilter`] hides emptied, zero-total and denylisted orders

pub mod error;
pub mod filter;
pub mod listing;

pub use error::{ProjectionError, Result};
pub use filter::{DEFAULT_HIDDEN_ORDER_NAMES, ListingFilter};
pub use listing::{LISTING_PAGE_SIZE, OrderListingProjector};
