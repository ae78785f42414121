//! Payments

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;
pub mod signature;

pub use errors::PaymentsServiceError;
pub use service::*;
pub use signature::GatewaySigner;
