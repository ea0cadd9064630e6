//! Cartwheel
//!
//! Cartwheel is the cart engine behind a small shopping app: line items keyed by product,
//! quantity bookkeeping, and totals rounded with an explicit, configurable rule.

pub mod cart;
pub mod items;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod summary;
