//! Depot access helpers.

use std::any::{Any, type_name};

use salvo::prelude::{Depot, StatusError};
use tracing::error;

/// Fetch injected state out of the depot, turning a miss into a 500.
///
/// A miss means the router was assembled without the expected injection;
/// that is a server bug, so the client sees nothing more specific.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>().map_err(|_missing| {
            error!("depot is missing {}", type_name::<T>());

            StatusError::internal_server_error()
        })
    }
}
