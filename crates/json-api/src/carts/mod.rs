//! Cart resource: cookie-backed for anonymous visitors, database-backed for
//! authenticated users. Handlers pick the representation off the depot.

pub(crate) mod cookie;
pub(crate) mod errors;
pub(crate) mod handlers;

pub(crate) use handlers::*;
