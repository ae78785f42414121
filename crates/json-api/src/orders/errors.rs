//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::orders::SettlementError;

pub(crate) fn into_status_error(error: SettlementError) -> StatusError {
    match error {
        SettlementError::EmptyCart => {
            StatusError::bad_request().brief("No selected cart entries to settle")
        }
        SettlementError::UnknownSku(_) => StatusError::bad_request().brief("Unknown sku in cart"),
        SettlementError::InsufficientStock { name } => {
            StatusError::conflict().brief(format!("Insufficient stock for {name}"))
        }
        SettlementError::Contention => {
            StatusError::service_unavailable().brief("Stock is contended, retry shortly")
        }
        SettlementError::Sql(source) => {
            error!("settlement failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
