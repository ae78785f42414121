//! Login Handler
//!
//! The single point where the anonymous cart meets the server-side one: a
//! successful login folds the cookie cart into the user's cart and clears
//! the cookie, so a replayed request merges nothing.

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use bazaar_app::auth::AuthServiceError;

use crate::{
    carts::cookie::{clear_cart, read_cart},
    extensions::*,
    state::State,
};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Session Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    /// Bearer token for subsequent requests
    pub token: String,
}

/// Login Handler
#[endpoint(
    tags("auth"),
    summary = "Log in and merge the anonymous cart",
    responses(
        (status_code = StatusCode::CREATED, description = "Session created"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let session = state
        .app
        .auth
        .login(&request.username, &request.password)
        .await
        .map_err(|error| match error {
            AuthServiceError::InvalidCredentials | AuthServiceError::NotFound => {
                StatusError::unauthorized().brief("Invalid username or password")
            }
            AuthServiceError::Sql(source) => {
                error!("failed to log in: {source}");

                StatusError::internal_server_error()
            }
        })?;

    let anonymous = read_cart(req);

    if anonymous.is_empty() {
        res.status_code(StatusCode::CREATED);

        return Ok(Json(SessionResponse {
            token: session.token,
        }));
    }

    // The cookie survives a failed merge so the next login can retry it.
    match state.app.carts.merge_anonymous(session.user, anonymous).await {
        Ok(()) => clear_cart(res),
        Err(merge_error) => {
            error!("failed to merge anonymous cart at login: {merge_error}");
        }
    }

    res.status_code(StatusCode::CREATED);

    Ok(Json(SessionResponse {
        token: session.token,
    }))
}
