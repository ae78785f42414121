//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::auth::{
    AuthServiceError,
    models::{IssuedSession, UserId},
    repository::PgAuthRepository,
    token::{AppSecret, generate_session_token, password_digest, session_token_digest},
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
    secret: AppSecret,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool, secret: AppSecret) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
            secret,
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<IssuedSession, AuthServiceError> {
        // Missing user and wrong password collapse into the same error so the
        // endpoint cannot be used to probe for usernames.
        let (user, stored_digest) = self
            .repository
            .find_user_by_username(username)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if password_digest(&self.secret, username, password) != stored_digest {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let token = generate_session_token();

        self.repository
            .insert_session(&session_token_digest(&self.secret, &token), user)
            .await?;

        Ok(IssuedSession { token, user })
    }

    async fn authenticate_bearer(&self, token: &str) -> Result<UserId, AuthServiceError> {
        self.repository
            .find_session(&session_token_digest(&self.secret, token))
            .await?
            .ok_or(AuthServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Validate credentials and issue a fresh session token.
    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<IssuedSession, AuthServiceError>;

    /// Resolve a bearer token to the user it was issued for.
    async fn authenticate_bearer(&self, token: &str) -> Result<UserId, AuthServiceError>;
}
