//! Order commands, edit actions and the order service.

mod actions;
mod commands;
mod service;

pub use actions::{
    ActionKind, DEFAULT_ADD_QUANTITY, DEFAULT_DISCOUNT_PERCENT, EditAction, add_quantity,
    discount_description,
};
pub use commands::{
    ModifyCommand, ModifyRequest, PlaceOrderCommand, PlaceOrderItem, PlaceOrderRequest,
};
pub use service::{OrderService, PRODUCT_PAGE_SIZE};
