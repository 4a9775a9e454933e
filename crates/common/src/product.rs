//! Catalog types returned by the product listing.

use serde::{Deserialize, Serialize};

use crate::connection::Connection;
use crate::types::Gid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Gid,
    pub title: String,
    #[serde(default)]
    pub variants: Connection<ProductVariant>,
}

/// A purchasable variant; `price` is a decimal string in shop currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: Gid,
    pub title: String,
    pub price: String,
}
