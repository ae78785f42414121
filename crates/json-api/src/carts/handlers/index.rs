//! Cart Index Handler

use std::{collections::HashMap, sync::Arc};

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use bazaar_app::domain::carts::models::{CartEntry, CartLine};

use crate::{
    carts::{
        cookie::read_cart,
        errors::{catalog_into_status_error, into_status_error},
    },
    extensions::*,
    state::State,
};

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    pub sku_id: i64,
    pub name: String,
    /// Unit price in minor units (cents).
    pub price: u64,
    pub default_image_url: String,
    pub quantity: u32,
    pub selected: bool,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            sku_id: line.sku_id,
            name: line.name,
            price: line.price,
            default_image_url: line.default_image_url,
            quantity: line.quantity,
            selected: line.selected,
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub lines: Vec<CartLineResponse>,
    pub total_count: u32,
    /// Sum of `price * quantity` across all lines, in minor units.
    pub total_amount: u64,
}

impl CartResponse {
    fn from_lines(lines: Vec<CartLineResponse>) -> Self {
        let total_count = lines.iter().map(|line| line.quantity).sum();
        let total_amount = lines
            .iter()
            .map(|line| line.price * u64::from(line.quantity))
            .sum();

        Self {
            lines,
            total_count,
            total_amount,
        }
    }
}

/// Cart Index Handler
///
/// Lists the cart joined against live catalog data. Cookie entries whose sku
/// has disappeared from the catalog are dropped from the response.
#[endpoint(
    tags("cart"),
    summary = "List the cart",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    if let Some(user) = depot.user_id() {
        let lines = state
            .app
            .carts
            .list_cart(user)
            .await
            .map_err(into_status_error)?;

        return Ok(Json(CartResponse::from_lines(
            lines.into_iter().map(Into::into).collect(),
        )));
    }

    let cart = read_cart(req);

    if cart.is_empty() {
        return Ok(Json(CartResponse::from_lines(vec![])));
    }

    let sku_ids: Vec<i64> = cart.sku_ids().collect();
    let skus = state
        .app
        .catalog
        .get_skus(&sku_ids)
        .await
        .map_err(catalog_into_status_error)?;

    let entries: HashMap<i64, CartEntry> =
        cart.entries().map(|entry| (entry.sku_id, entry)).collect();

    let lines = skus
        .into_iter()
        .filter_map(|sku| {
            entries.get(&sku.id).map(|entry| CartLineResponse {
                sku_id: sku.id,
                name: sku.name,
                price: sku.price,
                default_image_url: sku.default_image_url,
                quantity: entry.quantity,
                selected: entry.selected,
            })
        })
        .collect();

    Ok(Json(CartResponse::from_lines(lines)))
}
