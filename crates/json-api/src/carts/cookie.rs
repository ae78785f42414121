//! Cart cookie codec.
//!
//! The anonymous cart travels as an opaque token in the `cart` cookie. A
//! missing or corrupted cookie reads as an empty cart; the next write
//! replaces it wholesale.

use bazaar_app::domain::carts::AnonymousCart;
use salvo::{
    http::cookie::{Cookie, time::Duration},
    prelude::*,
};

use crate::extensions::*;

pub(crate) const CART_COOKIE: &str = "cart";

const CART_COOKIE_TTL_DAYS: i64 = 365;

pub(crate) fn read_cart(req: &Request) -> AnonymousCart {
    req.cookie(CART_COOKIE)
        .map(|cookie| AnonymousCart::decode(cookie.value()))
        .unwrap_or_default()
}

pub(crate) fn write_cart(res: &mut Response, cart: &AnonymousCart) -> Result<(), StatusError> {
    let token = cart.encode().or_500("failed to encode cart cookie")?;

    let mut cookie = Cookie::new(CART_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_max_age(Duration::days(CART_COOKIE_TTL_DAYS));

    res.add_cookie(cookie);

    Ok(())
}

pub(crate) fn clear_cart(res: &mut Response) {
    let mut cookie = Cookie::new(CART_COOKIE, "");
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_max_age(Duration::ZERO);

    res.add_cookie(cookie);
}
