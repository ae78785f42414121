//! Set Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    carts::{
        cookie::{read_cart, write_cart},
        errors::into_status_error,
        handlers::{create::CartItemResponse, ensure_sku_exists, validated_entry},
    },
    extensions::*,
    state::State,
};

/// Set Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetCartItemRequest {
    pub sku_id: i64,
    pub quantity: u32,
    pub selected: bool,
}

/// Set Cart Item Handler
///
/// Unconditionally overwrites quantity and selection, unlike the additive
/// POST.
#[endpoint(
    tags("cart"),
    summary = "Set a cart item's quantity and selection",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Cart storage unavailable"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SetCartItemRequest>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();
    let entry = validated_entry(request.sku_id, request.quantity, request.selected)?;

    ensure_sku_exists(state, entry.sku_id).await?;

    if let Some(user) = depot.user_id() {
        state
            .app
            .carts
            .set_item(user, entry)
            .await
            .map_err(into_status_error)?;
    } else {
        let mut cart = read_cart(req);

        cart.set(entry.sku_id, entry.quantity, entry.selected);

        write_cart(res, &cart)?;
    }

    Ok(Json(CartItemResponse {
        sku_id: entry.sku_id,
        quantity: entry.quantity,
        selected: entry.selected,
    }))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::carts::{AnonymousCart, models::CartEntry};
    use salvo::{http::header::COOKIE, test::TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{
        TEST_USER, anonymous_carts_service, carts_service, catalog_with_sku, decode_cart_cookie,
        strict_carts_mock,
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("cart").put(handler)
    }

    #[tokio::test]
    async fn test_authenticated_set_overwrites() -> TestResult {
        let mut carts = strict_carts_mock();

        carts
            .expect_set_item()
            .once()
            .withf(|user, entry| {
                *user == TEST_USER
                    && *entry
                        == CartEntry {
                            sku_id: 3,
                            quantity: 7,
                            selected: false,
                        }
            })
            .return_once(|_, _| Ok(()));

        let res = TestClient::put("http://example.com/cart")
            .json(&json!({ "sku_id": 3, "quantity": 7, "selected": false }))
            .send(&carts_service(carts, catalog_with_sku(3), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_anonymous_set_replaces_the_cookie_entry() -> TestResult {
        let mut anonymous = AnonymousCart::default();
        anonymous.add(3, 2, true);

        let res = TestClient::put("http://example.com/cart")
            .add_header(COOKIE, format!("cart={}", anonymous.encode()?), true)
            .json(&json!({ "sku_id": 3, "quantity": 7, "selected": false }))
            .send(&anonymous_carts_service(catalog_with_sku(3), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let cart = decode_cart_cookie(&res)?;
        let entry = cart.entries().find(|entry| entry.sku_id == 3);

        // Overwritten, not incremented.
        assert_eq!(
            entry,
            Some(CartEntry {
                sku_id: 3,
                quantity: 7,
                selected: false,
            })
        );

        Ok(())
    }
}
