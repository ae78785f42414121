//! Orders and settlement.

pub mod errors;
mod ids;
pub mod models;
pub(crate) mod repository;
mod reserve;
pub mod service;
mod settlement;

pub use errors::SettlementError;
pub use service::*;
