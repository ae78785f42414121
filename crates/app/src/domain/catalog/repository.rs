//! Sku Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{carts::repository::try_into_amount, catalog::models::Sku};

const GET_SKU_SQL: &str = include_str!("sql/get_sku.sql");
const LIST_SKUS_SQL: &str = include_str!("sql/list_skus.sql");
const RESERVE_STOCK_SQL: &str = include_str!("sql/reserve_stock.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSkuRepository;

impl PgSkuRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_sku(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sku_id: i64,
    ) -> Result<Option<Sku>, sqlx::Error> {
        query_as::<Postgres, Sku>(GET_SKU_SQL)
            .bind(sku_id)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_skus(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sku_ids: &[i64],
    ) -> Result<Vec<Sku>, sqlx::Error> {
        query_as::<Postgres, Sku>(LIST_SKUS_SQL)
            .bind(sku_ids)
            .fetch_all(&mut **tx)
            .await
    }

    /// Conditional stock decrement: only applies while `stock` still equals
    /// the value read by the caller. Zero rows affected means a concurrent
    /// settlement got there first.
    pub(crate) async fn reserve_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sku_id: i64,
        origin_stock: u64,
        quantity: u64,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(RESERVE_STOCK_SQL)
            .bind(sku_id)
            .bind(try_into_i64(origin_stock)?)
            .bind(try_into_i64(quantity)?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn try_into_i64(value: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(value).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

impl<'r> FromRow<'r, PgRow> for Sku {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            price: try_into_amount(row.try_get("price")?)?,
            default_image_url: row.try_get("default_image_url")?,
            stock: try_into_amount(row.try_get("stock")?)?,
            sales: try_into_amount(row.try_get("sales")?)?,
        })
    }
}
