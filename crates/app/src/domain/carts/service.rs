//! Carts service.
//!
//! Server-side cart for authenticated identities. The anonymous counterpart
//! lives entirely in [`crate::domain::carts::token::AnonymousCart`]; the two
//! meet exactly once, in `merge_anonymous`, which the login boundary invokes.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::models::UserId,
    database::Db,
    domain::carts::{
        errors::CartsServiceError,
        models::{CartEntry, CartLine},
        repository::PgCartEntriesRepository,
        token::AnonymousCart,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    entries: PgCartEntriesRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            entries: PgCartEntriesRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn add_item(&self, user: UserId, entry: CartEntry) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.entries.upsert_add(&mut tx, user, entry).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn set_item(&self, user: UserId, entry: CartEntry) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.entries.upsert_set(&mut tx, user, entry).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn remove_item(&self, user: UserId, sku_id: i64) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        // Removing an absent entry is a no-op, not an error.
        self.entries.delete_entry(&mut tx, user, sku_id).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn list_cart(&self, user: UserId) -> Result<Vec<CartLine>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let lines = self.entries.list_lines(&mut tx, user).await?;

        tx.commit().await?;

        Ok(lines)
    }

    async fn merge_anonymous(
        &self,
        user: UserId,
        cart: AnonymousCart,
    ) -> Result<(), CartsServiceError> {
        // An already-cleared token merges as a no-op, which keeps a repeated
        // merge call idempotent.
        if cart.is_empty() {
            return Ok(());
        }

        let mut tx = self.db.begin().await?;

        // Last-writer-wins: every anonymous entry overwrites quantity and
        // selection; entries absent from the token are untouched.
        for entry in cart.entries() {
            self.entries.upsert_set(&mut tx, user, entry).await?;
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Increment the quantity for an existing entry (overwriting its
    /// selection flag), or create the entry.
    async fn add_item(&self, user: UserId, entry: CartEntry) -> Result<(), CartsServiceError>;

    /// Unconditionally overwrite quantity and selection.
    async fn set_item(&self, user: UserId, entry: CartEntry) -> Result<(), CartsServiceError>;

    /// Remove an entry; no-op when absent.
    async fn remove_item(&self, user: UserId, sku_id: i64) -> Result<(), CartsServiceError>;

    /// All entries joined with live catalog data.
    async fn list_cart(&self, user: UserId) -> Result<Vec<CartLine>, CartsServiceError>;

    /// Fold an anonymous cart into this user's cart, last-writer-wins.
    /// Called at most once per login event by the login boundary.
    async fn merge_anonymous(
        &self,
        user: UserId,
        cart: AnonymousCart,
    ) -> Result<(), CartsServiceError>;
}
