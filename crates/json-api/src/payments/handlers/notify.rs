//! Payment Notify Handler
//!
//! The callback endpoint the gateway invokes after the shopper pays. It is
//! unauthenticated by design; the shared-secret signature is the proof of
//! origin and is verified before anything else.

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bazaar_app::domain::payments::models::GatewayCallback;

use crate::{extensions::*, payments::errors::into_status_error, state::State};

/// Payment Confirmed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentConfirmedResponse {
    /// Gateway-side transaction id.
    pub trade_id: String,
}

/// Payment Notify Handler
///
/// Safe to redeliver: a `trade_id` already on record is acknowledged
/// without transitioning the order a second time.
#[endpoint(
    tags("payments"),
    summary = "Gateway payment confirmation callback",
    responses(
        (status_code = StatusCode::OK, description = "Payment recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid signature or amount"),
        (status_code = StatusCode::NOT_FOUND, description = "No payable order"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order_id: QueryParam<String>,
    trade_id: QueryParam<String>,
    amount: QueryParam<u64>,
    sign: QueryParam<String>,
    depot: &mut Depot,
) -> Result<Json<PaymentConfirmedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let trade_id = state
        .app
        .payments
        .confirm(GatewayCallback {
            order_id: order_id.into_inner(),
            trade_id: trade_id.into_inner(),
            amount: amount.into_inner(),
            sign: sign.into_inner(),
        })
        .await
        .map_err(into_status_error)?;

    Ok(Json(PaymentConfirmedResponse { trade_id }))
}
