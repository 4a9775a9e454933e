pub mod identity;
pub mod observability;
pub mod orders;
pub mod products;
