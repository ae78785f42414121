//! Carts

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;
pub mod token;

pub use errors::CartsServiceError;
pub use service::*;
pub use token::AnonymousCart;
