//! Remove Cart Item Handler

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
    },
    extensions::*,
    state::State,
};

/// Remove Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RemoveCartItemRequest {
    pub sku_id: i64,
}

/// Remove Cart Item Handler
///
/// Removing an absent sku is a no-op.
#[endpoint(
    tags("cart"),
    summary = "Remove an item from the cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Item removed"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Cart storage unavailable"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RemoveCartItemRequest>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    if let Some(user) = depot.user_id() {
        state
            .app
            .carts
            .remove_item(user, request.sku_id)
            .await
            .map_err(into_status_error)?;
    } else {
        let mut cart = read_cart(req);

        cart.remove(request.sku_id);

        write_cart(res, &cart)?;
    }

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::carts::AnonymousCart;
    use salvo::{http::header::COOKIE, test::TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{
        TEST_USER, anonymous_carts_service, carts_service, decode_cart_cookie, strict_carts_mock,
        strict_catalog_mock,
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("cart").delete(handler)
    }

    #[tokio::test]
    async fn test_authenticated_remove_returns_204() -> TestResult {
        let mut carts = strict_carts_mock();

        carts
            .expect_remove_item()
            .once()
            .withf(|user, sku_id| *user == TEST_USER && *sku_id == 3)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete("http://example.com/cart")
            .json(&json!({ "sku_id": 3 }))
            .send(&carts_service(carts, strict_catalog_mock(), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_anonymous_remove_rewrites_the_cookie() -> TestResult {
        let mut anonymous = AnonymousCart::default();
        anonymous.add(3, 2, true);
        anonymous.add(4, 1, true);

        let res = TestClient::delete("http://example.com/cart")
            .add_header(COOKIE, format!("cart={}", anonymous.encode()?), true)
            .json(&json!({ "sku_id": 3 }))
            .send(&anonymous_carts_service(strict_catalog_mock(), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        let cart = decode_cart_cookie(&res)?;

        assert_eq!(cart.len(), 1, "only the other entry remains");
        assert!(cart.entries().all(|entry| entry.sku_id == 4));

        Ok(())
    }

    #[tokio::test]
    async fn test_removing_an_absent_sku_is_a_no_op() -> TestResult {
        let mut carts = strict_carts_mock();

        carts
            .expect_remove_item()
            .once()
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete("http://example.com/cart")
            .json(&json!({ "sku_id": 999 }))
            .send(&carts_service(carts, strict_catalog_mock(), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }
}
