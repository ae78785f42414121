//! Cart Entries Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    auth::models::UserId,
    domain::carts::models::{CartEntry, CartLine},
};

const UPSERT_ADD_SQL: &str = include_str!("sql/upsert_add_entry.sql");
const UPSERT_SET_SQL: &str = include_str!("sql/upsert_set_entry.sql");
const DELETE_ENTRY_SQL: &str = include_str!("sql/delete_entry.sql");
const DELETE_ENTRIES_SQL: &str = include_str!("sql/delete_entries.sql");
const GET_SELECTED_SQL: &str = include_str!("sql/get_selected.sql");
const LIST_LINES_SQL: &str = include_str!("sql/list_lines.sql");
const LIST_SELECTED_LINES_SQL: &str = include_str!("sql/list_selected_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartEntriesRepository;

impl PgCartEntriesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn upsert_add(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
        entry: CartEntry,
    ) -> Result<(), sqlx::Error> {
        query(UPSERT_ADD_SQL)
            .bind(user.into_i64())
            .bind(entry.sku_id)
            .bind(i64::from(entry.quantity))
            .bind(entry.selected)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn upsert_set(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
        entry: CartEntry,
    ) -> Result<(), sqlx::Error> {
        query(UPSERT_SET_SQL)
            .bind(user.into_i64())
            .bind(entry.sku_id)
            .bind(i64::from(entry.quantity))
            .bind(entry.selected)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn delete_entry(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
        sku_id: i64,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ENTRY_SQL)
            .bind(user.into_i64())
            .bind(sku_id)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_entries(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
        sku_ids: &[i64],
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ENTRIES_SQL)
            .bind(user.into_i64())
            .bind(sku_ids)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Selected subset as a `sku_id -> quantity` list.
    pub(crate) async fn get_selected(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<Vec<(i64, u32)>, sqlx::Error> {
        let rows: Vec<(i64, i64)> = query_as(GET_SELECTED_SQL)
            .bind(user.into_i64())
            .fetch_all(&mut **tx)
            .await?;

        rows.into_iter()
            .map(|(sku_id, quantity)| Ok((sku_id, try_into_quantity(quantity)?)))
            .collect()
    }

    pub(crate) async fn list_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<Vec<CartLine>, sqlx::Error> {
        query_as::<Postgres, CartLine>(LIST_LINES_SQL)
            .bind(user.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_selected_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<Vec<CartLine>, sqlx::Error> {
        query_as::<Postgres, CartLine>(LIST_SELECTED_LINES_SQL)
            .bind(user.into_i64())
            .fetch_all(&mut **tx)
            .await
    }
}

pub(crate) fn try_into_quantity(quantity: i64) -> Result<u32, sqlx::Error> {
    u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
        index: "quantity".to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn try_into_amount(amount: i64) -> Result<u64, sqlx::Error> {
    u64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: "amount".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for CartLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            sku_id: row.try_get("sku_id")?,
            name: row.try_get("name")?,
            price: try_into_amount(row.try_get("price")?)?,
            default_image_url: row.try_get("default_image_url")?,
            quantity: try_into_quantity(row.try_get("quantity")?)?,
            selected: row.try_get("selected")?,
        })
    }
}
