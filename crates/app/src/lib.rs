//! Cart synchronisation, user records and the product catalog.
//!
//! The remote document store is the source of truth for every cart. A
//! [`session::Session`] keeps a local copy only as a cache of the last
//! remote result.

pub mod catalog;
pub mod config;
pub mod context;
pub mod domain;
pub mod observability;
pub mod session;
pub mod store;

#[cfg(test)]
mod test;
