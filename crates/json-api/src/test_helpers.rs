//! Test helpers.

use std::{io, sync::Arc};

use salvo::{affix_state::inject, http::header::SET_COOKIE, prelude::*};
use testresult::TestResult;

use bazaar_app::{
    auth::{MockAuthService, UserId},
    context::AppContext,
    domain::{
        carts::{AnonymousCart, MockCartsService},
        catalog::{MockCatalogService, models::Sku},
        orders::MockOrdersService,
        payments::MockPaymentsService,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER: UserId = UserId::from_i64(7);

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_id(TEST_USER);
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_login().never();
    auth.expect_authenticate_bearer().never();

    auth
}

pub(crate) fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_add_item().never();
    carts.expect_set_item().never();
    carts.expect_remove_item().never();
    carts.expect_list_cart().never();
    carts.expect_merge_anonymous().never();

    carts
}

pub(crate) fn strict_catalog_mock() -> MockCatalogService {
    let mut catalog = MockCatalogService::new();

    catalog.expect_get_skus().never();

    catalog
}

pub(crate) fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_settle_preview().never();
    orders.expect_settle_commit().never();

    orders
}

pub(crate) fn strict_payments_mock() -> MockPaymentsService {
    let mut payments = MockPaymentsService::new();

    payments.expect_payment_url().never();
    payments.expect_confirm().never();

    payments
}

/// Catalog mock that knows exactly one sku.
pub(crate) fn catalog_with_sku(id: i64) -> MockCatalogService {
    let mut catalog = MockCatalogService::new();

    catalog
        .expect_get_skus()
        .once()
        .withf(move |ids| ids.contains(&id))
        .return_once(move |_| {
            Ok(vec![Sku {
                id,
                name: format!("sku {id}"),
                price: 100,
                default_image_url: String::new(),
                stock: 10,
                sales: 0,
            }])
        });

    catalog
}

fn make_state(
    auth: MockAuthService,
    carts: MockCartsService,
    catalog: MockCatalogService,
    orders: MockOrdersService,
    payments: MockPaymentsService,
) -> Arc<State> {
    Arc::new(State::new(AppContext {
        auth: Arc::new(auth),
        carts: Arc::new(carts),
        catalog: Arc::new(catalog),
        orders: Arc::new(orders),
        payments: Arc::new(payments),
    }))
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    make_state(
        auth,
        strict_carts_mock(),
        strict_catalog_mock(),
        strict_orders_mock(),
        strict_payments_mock(),
    )
}

pub(crate) fn login_service(auth: MockAuthService, carts: MockCartsService) -> Service {
    let state = make_state(
        auth,
        carts,
        strict_catalog_mock(),
        strict_orders_mock(),
        strict_payments_mock(),
    );

    Service::new(
        Router::new()
            .hoop(inject(state))
            .push(Router::with_path("session").post(crate::auth::login::handler)),
    )
}

fn mounted(state: Arc<State>, route: Router, authenticated: bool) -> Service {
    let router = Router::new().hoop(inject(state));

    let router = if authenticated {
        router.hoop(inject_user)
    } else {
        router
    };

    Service::new(router.push(route))
}

pub(crate) fn carts_service(
    carts: MockCartsService,
    catalog: MockCatalogService,
    route: Router,
) -> Service {
    let state = make_state(
        strict_auth_mock(),
        carts,
        catalog,
        strict_orders_mock(),
        strict_payments_mock(),
    );

    mounted(state, route, true)
}

pub(crate) fn anonymous_carts_service(catalog: MockCatalogService, route: Router) -> Service {
    let state = make_state(
        strict_auth_mock(),
        strict_carts_mock(),
        catalog,
        strict_orders_mock(),
        strict_payments_mock(),
    );

    mounted(state, route, false)
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    let state = make_state(
        strict_auth_mock(),
        strict_carts_mock(),
        strict_catalog_mock(),
        orders,
        strict_payments_mock(),
    );

    mounted(state, route, true)
}

pub(crate) fn anonymous_orders_service(orders: MockOrdersService, route: Router) -> Service {
    let state = make_state(
        strict_auth_mock(),
        strict_carts_mock(),
        strict_catalog_mock(),
        orders,
        strict_payments_mock(),
    );

    mounted(state, route, false)
}

pub(crate) fn payments_service(payments: MockPaymentsService, route: Router) -> Service {
    let state = make_state(
        strict_auth_mock(),
        strict_carts_mock(),
        strict_catalog_mock(),
        strict_orders_mock(),
        payments,
    );

    mounted(state, route, true)
}

pub(crate) fn anonymous_payments_service(payments: MockPaymentsService, route: Router) -> Service {
    let state = make_state(
        strict_auth_mock(),
        strict_carts_mock(),
        strict_catalog_mock(),
        strict_orders_mock(),
        payments,
    );

    mounted(state, route, false)
}

/// Pull the cart cookie back out of a response and decode it.
pub(crate) fn decode_cart_cookie(res: &salvo::Response) -> TestResult<AnonymousCart> {
    let token = res
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| {
            value
                .strip_prefix("cart=")
                .map(|rest| rest.split(';').next().unwrap_or(rest))
        })
        .ok_or_else(|| io::Error::other("no cart cookie in response"))?;

    Ok(AnonymousCart::decode(token))
}
