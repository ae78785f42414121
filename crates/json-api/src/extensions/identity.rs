//! Request identity extensions.
//!
//! The auth middleware resolves a bearer token to a [`UserId`] and parks it
//! in the depot; handlers read it back from here. An anonymous request
//! simply never gets one inserted.

use bazaar_app::auth::UserId;
use salvo::prelude::{Depot, StatusError};

const USER_ID_KEY: &str = "bazaar.user_id";

pub(crate) trait IdentityExt {
    fn insert_user_id(&mut self, user: UserId);

    /// The authenticated user, if the request carried a valid session.
    fn user_id(&self) -> Option<UserId>;

    fn user_id_or_401(&self) -> Result<UserId, StatusError>;
}

impl IdentityExt for Depot {
    fn insert_user_id(&mut self, user: UserId) {
        self.insert(USER_ID_KEY, user);
    }

    fn user_id(&self) -> Option<UserId> {
        self.get::<UserId>(USER_ID_KEY).ok().copied()
    }

    fn user_id_or_401(&self) -> Result<UserId, StatusError> {
        self.user_id()
            .ok_or_else(|| StatusError::unauthorized().brief("Authentication required"))
    }
}
