//! Cartwheel Domain Concerns

pub mod carts;
pub mod users;
