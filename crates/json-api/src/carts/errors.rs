//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::{carts::CartsServiceError, catalog::CatalogServiceError};

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::Sql(source) => {
            error!("cart storage unavailable: {source}");

            StatusError::service_unavailable()
        }
    }
}

/// Catalog failures surfaced through cart handlers.
pub(crate) fn catalog_into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::Sql(source) => {
            error!("catalog unavailable: {source}");

            StatusError::service_unavailable()
        }
    }
}
