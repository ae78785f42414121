//! Add Cart Item Handler

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
        handlers::{ensure_sku_exists, validated_entry},
    },
    extensions::*,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    pub sku_id: i64,
    pub quantity: u32,
    /// Newly added items default to selected.
    #[serde(default = "default_selected")]
    pub selected: bool,
}

fn default_selected() -> bool {
    true
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    pub sku_id: i64,
    pub quantity: u32,
    pub selected: bool,
}

/// Add Cart Item Handler
///
/// Increments the quantity for an already-present sku and overwrites its
/// selection flag.
#[endpoint(
    tags("cart"),
    summary = "Add an item to the cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Item added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Cart storage unavailable"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
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
            .add_item(user, entry)
            .await
            .map_err(into_status_error)?;
    } else {
        let mut cart = read_cart(req);

        cart.add(entry.sku_id, entry.quantity, entry.selected);

        write_cart(res, &cart)?;
    }

    res.status_code(StatusCode::CREATED);

    Ok(Json(CartItemResponse {
        sku_id: entry.sku_id,
        quantity: entry.quantity,
        selected: entry.selected,
    }))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::{
        carts::{MockCartsService, models::CartEntry},
        catalog::MockCatalogService,
    };
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{
        TEST_USER, anonymous_carts_service, carts_service, catalog_with_sku, decode_cart_cookie,
        strict_carts_mock, strict_catalog_mock,
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("cart").post(handler)
    }

    #[tokio::test]
    async fn test_authenticated_add_hits_the_database_cart() -> TestResult {
        let mut carts = strict_carts_mock();

        carts
            .expect_add_item()
            .once()
            .withf(|user, entry| {
                *user == TEST_USER
                    && *entry
                        == CartEntry {
                            sku_id: 3,
                            quantity: 2,
                            selected: true,
                        }
            })
            .return_once(|_, _| Ok(()));

        let res = TestClient::post("http://example.com/cart")
            .json(&json!({ "sku_id": 3, "quantity": 2 }))
            .send(&carts_service(carts, catalog_with_sku(3), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_anonymous_add_writes_the_cart_cookie() -> TestResult {
        let res = TestClient::post("http://example.com/cart")
            .json(&json!({ "sku_id": 3, "quantity": 2, "selected": false }))
            .send(&anonymous_carts_service(catalog_with_sku(3), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let cart = decode_cart_cookie(&res)?;
        let entry = cart.entries().find(|entry| entry.sku_id == 3);

        assert_eq!(
            entry,
            Some(CartEntry {
                sku_id: 3,
                quantity: 2,
                selected: false,
            })
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_sku_returns_400() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_skus()
            .once()
            .return_once(|_| Ok(vec![]));

        let res = TestClient::post("http://example.com/cart")
            .json(&json!({ "sku_id": 999, "quantity": 2 }))
            .send(&carts_service(strict_carts_mock(), catalog, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_zero_quantity_returns_400_before_any_lookup() -> TestResult {
        let res = TestClient::post("http://example.com/cart")
            .json(&json!({ "sku_id": 3, "quantity": 0 }))
            .send(&carts_service(
                strict_carts_mock(),
                strict_catalog_mock(),
                route(),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_cart_storage_failure_returns_503() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _| Err(sqlx::Error::PoolClosed.into()));

        let res = TestClient::post("http://example.com/cart")
            .json(&json!({ "sku_id": 3, "quantity": 2 }))
            .send(&carts_service(carts, catalog_with_sku(3), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));

        Ok(())
    }
}
