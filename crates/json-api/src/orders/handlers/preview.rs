//! Settlement Preview Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use bazaar_app::domain::orders::models::PreviewLine;

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Settlement Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SettlementLineResponse {
    pub sku_id: i64,
    pub name: String,
    /// Unit price in minor units (cents).
    pub price: u64,
    pub default_image_url: String,
    pub quantity: u32,
}

impl From<PreviewLine> for SettlementLineResponse {
    fn from(line: PreviewLine) -> Self {
        Self {
            sku_id: line.sku_id,
            name: line.name,
            price: line.price,
            default_image_url: line.default_image_url,
            quantity: line.quantity,
        }
    }
}

/// Settlement Preview Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SettlementPreviewResponse {
    pub lines: Vec<SettlementLineResponse>,
    pub total_count: u32,
    pub total_amount: u64,
    pub freight: u64,
    /// `total_amount + freight`.
    pub total_pay: u64,
}

/// Settlement Preview Handler
///
/// Read-only projection of the selected cart subset; stock is only checked
/// at commit.
#[endpoint(
    tags("orders"),
    summary = "Preview settlement of the selected cart entries",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Settlement preview"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<SettlementPreviewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_id_or_401()?;

    let preview = state
        .app
        .orders
        .settle_preview(user)
        .await
        .map_err(into_status_error)?;

    let lines: Vec<SettlementLineResponse> =
        preview.lines.into_iter().map(Into::into).collect();

    let total_count = lines.iter().map(|line| line.quantity).sum();
    let total_amount: u64 = lines
        .iter()
        .map(|line| line.price * u64::from(line.quantity))
        .sum();

    Ok(Json(SettlementPreviewResponse {
        lines,
        total_count,
        total_amount,
        freight: preview.freight,
        total_pay: total_amount + preview.freight,
    }))
}
