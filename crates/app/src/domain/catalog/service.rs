//! Catalog service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::catalog::{errors::CatalogServiceError, models::Sku, repository::PgSkuRepository},
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    skus: PgSkuRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            skus: PgSkuRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn get_skus(&self, sku_ids: &[i64]) -> Result<Vec<Sku>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let skus = self.skus.list_skus(&mut tx, sku_ids).await?;

        tx.commit().await?;

        Ok(skus)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetch the skus with the given ids; unknown ids are simply absent
    /// from the result.
    async fn get_skus(&self, sku_ids: &[i64]) -> Result<Vec<Sku>, CatalogServiceError>;
}
