//! Settlement errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettlementError {
    /// Nothing selected at commit time; no order is created.
    #[error("no items selected for settlement")]
    EmptyCart,

    /// Stock ran out for the named sku; the whole commit was rolled back.
    #[error("insufficient stock for {name}")]
    InsufficientStock { name: String },

    /// The cart referenced a sku that no longer exists in the catalog.
    #[error("unknown sku {0} in cart")]
    UnknownSku(i64),

    /// Bounded reservation retries were exhausted under contention; the
    /// client may retry.
    #[error("stock reservation contention")]
    Contention,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for SettlementError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
