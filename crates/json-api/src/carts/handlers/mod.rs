//! Cart Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod update;

use std::sync::Arc;

use salvo::prelude::StatusError;

use bazaar_app::domain::carts::models::CartEntry;

use crate::state::State;

/// Reject entries the catalog has never heard of before they reach either
/// cart representation.
pub(crate) async fn ensure_sku_exists(state: &Arc<State>, sku_id: i64) -> Result<(), StatusError> {
    let skus = state
        .app
        .catalog
        .get_skus(&[sku_id])
        .await
        .map_err(super::errors::catalog_into_status_error)?;

    if skus.is_empty() {
        return Err(StatusError::bad_request().brief("Unknown sku"));
    }

    Ok(())
}

pub(crate) fn validated_entry(
    sku_id: i64,
    quantity: u32,
    selected: bool,
) -> Result<CartEntry, StatusError> {
    if quantity == 0 {
        return Err(StatusError::bad_request().brief("Quantity must be at least 1"));
    }

    Ok(CartEntry {
        sku_id,
        quantity,
        selected,
    })
}
