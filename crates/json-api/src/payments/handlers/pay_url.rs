//! Payment URL Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, payments::errors::into_status_error, state::State};

/// Payment URL Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PayUrlResponse {
    /// Signed gateway checkout URL.
    pub pay_url: String,
}

/// Payment URL Handler
///
/// Only the order's owner can request its payment URL, and only while the
/// order is a prepaid one still awaiting payment.
#[endpoint(
    tags("payments"),
    summary = "Get the gateway payment URL for an order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment URL"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::NOT_FOUND, description = "No payable order"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order_id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<PayUrlResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_id_or_401()?;

    let pay_url = state
        .app
        .payments
        .payment_url(user, &order_id.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(PayUrlResponse { pay_url }))
}
