//! Result adapters for handler code.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::error;

/// Collapse an infrastructure failure into a logged 500.
///
/// `context` names the operation that failed. The error text only reaches
/// the log, never the response body.
pub(crate) trait ResultExt<T> {
    fn or_500(self, context: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            StatusError::internal_server_error()
        })
    }
}
