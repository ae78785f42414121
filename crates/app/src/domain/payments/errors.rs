//! Payments Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentsServiceError {
    #[error("callback signature did not verify")]
    InvalidSignature,

    #[error("no payable order {order_id}")]
    OrderNotFound { order_id: String },

    #[error("callback amount does not match order {order_id}")]
    AmountMismatch { order_id: String },

    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
}
