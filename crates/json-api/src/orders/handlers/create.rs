//! Create Order Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bazaar_app::domain::orders::models::{NewOrder, Order, OrderStatus, PayMethod};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Payment method wire representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum PayMethodParam {
    CashOnDelivery,
    Prepaid,
}

impl From<PayMethodParam> for PayMethod {
    fn from(param: PayMethodParam) -> Self {
        match param {
            PayMethodParam::CashOnDelivery => PayMethod::CashOnDelivery,
            PayMethodParam::Prepaid => PayMethod::Prepaid,
        }
    }
}

fn status_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::AwaitingPayment => "awaiting_payment",
        OrderStatus::AwaitingShipment => "awaiting_shipment",
        OrderStatus::Shipped => "shipped",
        OrderStatus::Finished => "finished",
        OrderStatus::Cancelled => "cancelled",
    }
}

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    pub address_id: i64,
    pub pay_method: PayMethodParam,
}

/// Order Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub order_id: String,
    pub total_count: u32,
    /// Goods total in minor units, freight excluded.
    pub total_amount: u64,
    pub freight: u64,
    pub status: String,
    #[salvo(schema(value_type = String))]
    pub created_at: Timestamp,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.order_id,
            total_count: order.total_count,
            total_amount: order.total_amount,
            freight: order.freight,
            status: status_label(order.status).to_string(),
            created_at: order.created_at,
        }
    }
}

/// Create Order Handler
///
/// Settles the selected cart entries into an order, reserving stock for
/// every line or failing the whole request.
#[endpoint(
    tags("orders"),
    summary = "Commit settlement of the selected cart entries",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty or invalid cart selection"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Stock contention"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_id_or_401()?;
    let request = json.into_inner();

    let order = state
        .app
        .orders
        .settle_commit(
            user,
            NewOrder {
                address_id: request.address_id,
                pay_method: request.pay_method.into(),
            },
        )
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", order.order_id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use bazaar_app::{auth::UserId, domain::orders::SettlementError};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{
        TEST_USER, anonymous_orders_service, orders_service, strict_orders_mock,
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("orders").post(handler)
    }

    fn make_order(user: UserId, pay_method: PayMethod) -> Order {
        Order {
            order_id: "20260823120000000000007".to_string(),
            user,
            address_id: 1,
            total_count: 3,
            total_amount: 450,
            freight: 1000,
            pay_method,
            status: OrderStatus::for_new_order(pay_method),
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn test_prepaid_order_is_created_awaiting_payment() -> TestResult {
        let mut orders = strict_orders_mock();

        orders
            .expect_settle_commit()
            .once()
            .withf(|user, new_order| {
                *user == TEST_USER
                    && *new_order
                        == NewOrder {
                            address_id: 1,
                            pay_method: PayMethod::Prepaid,
                        }
            })
            .return_once(|user, new_order| Ok(make_order(user, new_order.pay_method)));

        let mut res = TestClient::post("http://example.com/orders")
            .json(&json!({ "address_id": 1, "pay_method": "prepaid" }))
            .send(&orders_service(orders, route()))
            .await;

        let body: OrderResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/orders/20260823120000000000007"));
        assert_eq!(body.status, "awaiting_payment");
        assert_eq!(body.total_amount, 450);

        Ok(())
    }

    #[tokio::test]
    async fn test_cash_on_delivery_order_skips_payment() -> TestResult {
        let mut orders = strict_orders_mock();

        orders
            .expect_settle_commit()
            .once()
            .withf(|_, new_order| new_order.pay_method == PayMethod::CashOnDelivery)
            .return_once(|user, new_order| Ok(make_order(user, new_order.pay_method)));

        let response: OrderResponse = TestClient::post("http://example.com/orders")
            .json(&json!({ "address_id": 1, "pay_method": "cash_on_delivery" }))
            .send(&orders_service(orders, route()))
            .await
            .take_json()
            .await?;

        assert_eq!(response.status, "awaiting_shipment");

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_cart_returns_400() -> TestResult {
        let mut orders = strict_orders_mock();

        orders
            .expect_settle_commit()
            .once()
            .return_once(|_, _| Err(SettlementError::EmptyCart));

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({ "address_id": 1, "pay_method": "prepaid" }))
            .send(&orders_service(orders, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_insufficient_stock_returns_409() -> TestResult {
        let mut orders = strict_orders_mock();

        orders.expect_settle_commit().once().return_once(|_, _| {
            Err(SettlementError::InsufficientStock {
                name: "sku 1".to_string(),
            })
        });

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({ "address_id": 1, "pay_method": "prepaid" }))
            .send(&orders_service(orders, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_stock_contention_returns_503() -> TestResult {
        let mut orders = strict_orders_mock();

        orders
            .expect_settle_commit()
            .once()
            .return_once(|_, _| Err(SettlementError::Contention));

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({ "address_id": 1, "pay_method": "prepaid" }))
            .send(&orders_service(orders, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_requires_authentication() -> TestResult {
        let orders = strict_orders_mock();

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({ "address_id": 1, "pay_method": "prepaid" }))
            .send(&anonymous_orders_service(orders, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
