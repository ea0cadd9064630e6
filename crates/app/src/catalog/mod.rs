//! Product catalog

mod errors;
mod service;

pub use errors::CatalogError;
pub use service::*;
