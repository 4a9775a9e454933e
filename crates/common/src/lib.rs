//! Shared model types for the storefront backend.
//!
//! These mirror the commerce platform's wire shapes closely enough to be
//! deserialized straight out of GraphQL payloads and serialized back to
//! HTTP clients unchanged.

pub mod connection;
pub mod money;
pub mod order;
pub mod product;
pub mod types;

pub use connection::{Connection, Edge};
pub use money::{MoneyBag, MoneyV2};
pub use order::{
    CalculatedLineItem, CalculatedOrder, LineItem, Order, UserError, user_error_messages,
};
pub use product::{Product, ProductVariant};
pub use types::{Gid, calculated_line_item_id};
