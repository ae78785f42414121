//! Sessions and the optional-auth middleware.

pub(crate) mod handlers;
pub(crate) mod middleware;

pub(crate) use handlers::*;
