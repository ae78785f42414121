//! Payment Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::payments::PaymentsServiceError;

pub(crate) fn into_status_error(error: PaymentsServiceError) -> StatusError {
    match error {
        PaymentsServiceError::InvalidSignature => {
            StatusError::bad_request().brief("Invalid signature")
        }
        PaymentsServiceError::OrderNotFound { .. } => {
            StatusError::not_found().brief("No payable order")
        }
        PaymentsServiceError::AmountMismatch { .. } => {
            StatusError::bad_request().brief("Amount mismatch")
        }
        PaymentsServiceError::Sql(source) => {
            error!("payment processing failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
