//! Order domain for the tagged storefront.
//!
//! This crate provides:
//! - Request validation into [`ModifyCommand`] and [`PlaceOrderCommand`]
//! - The closed set of edit actions, [`EditAction`]
//! - The tag-based ownership guard, [`ensure_owned`]
//! - [`OrderService`] for order detail, catalog and placement primitives

pub mod error;
pub mod order;
pub mod ownership;

pub use error::{DomainError, OwnershipError, Result, ValidationError};
pub use order::{
    ActionKind, DEFAULT_ADD_QUANTITY, DEFAULT_DISCOUNT_PERCENT, EditAction, ModifyCommand,
    ModifyRequest, OrderService, PRODUCT_PAGE_SIZE, PlaceOrderCommand, PlaceOrderItem,
    PlaceOrderRequest, add_quantity, discount_description,
};
pub use ownership::ensure_owned;
