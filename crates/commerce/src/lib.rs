//! Commerce Gateway.
//!
//! A thin client over the commerce platform's single GraphQL admin endpoint:
//! - [`CommerceGateway`] sends one document plus variables and returns `data`
//! - [`CommerceGatewayExt::request`] decodes that data into a typed payload
//! - [`AdminOperations`] names every document the backend issues
//! - [`AdminGateway`] is the HTTP implementation, [`InMemoryCommerce`] a
//!   stateful double of the platform for tests and local runs

pub mod documents;
pub mod error;
pub mod gateway;
pub mod http;
pub mod memory;
pub mod operations;

pub use common::Gid;
pub use error::{GatewayError, Result};
pub use gateway::{CommerceGateway, CommerceGatewayExt};
pub use http::{AdminGateway, CommerceConfig};
pub use memory::InMemoryCommerce;
pub use operations::{
    AdminOperations, LineItemInput, MutationPayload, OrderCreateInput, OrderCreatePayload,
    OrderEditBeginPayload, OrderEditCommitPayload, OrderLookup, OrderMarkAsPaidPayload,
    OrderRef, OrdersPage, PaidOrder, ProductsPage, TaggedNode, TagsAddPayload,
};
