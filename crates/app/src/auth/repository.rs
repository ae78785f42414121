//! Auth Repository

use sqlx::{PgPool, query, query_as};

use crate::auth::models::UserId;

const FIND_USER_BY_USERNAME_SQL: &str = include_str!("sql/find_user_by_username.sql");
const INSERT_SESSION_SQL: &str = include_str!("sql/insert_session.sql");
const FIND_SESSION_SQL: &str = include_str!("sql/find_session.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<(UserId, Vec<u8>)>, sqlx::Error> {
        let row: Option<(i64, Vec<u8>)> = query_as(FIND_USER_BY_USERNAME_SQL)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(id, digest)| (UserId::from_i64(id), digest)))
    }

    pub(crate) async fn insert_session(
        &self,
        token_digest: &[u8],
        user: UserId,
    ) -> Result<(), sqlx::Error> {
        query(INSERT_SESSION_SQL)
            .bind(token_digest)
            .bind(user.into_i64())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub(crate) async fn find_session(
        &self,
        token_digest: &[u8],
    ) -> Result<Option<UserId>, sqlx::Error> {
        let row: Option<(i64,)> = query_as(FIND_SESSION_SQL)
            .bind(token_digest)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(id,)| UserId::from_i64(id)))
    }
}
