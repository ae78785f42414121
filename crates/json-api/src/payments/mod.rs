//! Payment resource: gateway redirect URLs and the signed callback.

pub(crate) mod errors;
pub(crate) mod handlers;

pub(crate) use handlers::*;
