//! Orders Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{Postgres, Transaction, query, query_as};

use crate::{
    auth::models::UserId,
    domain::orders::models::{Order, OrderStatus, PayMethod},
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_LINE_SQL: &str = include_str!("sql/create_order_line.sql");
const UPDATE_ORDER_TOTALS_SQL: &str = include_str!("sql/update_order_totals.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert the order header with zeroed totals, returning its creation
    /// timestamp.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_id: &str,
        user: UserId,
        address_id: i64,
        freight: u64,
        pay_method: PayMethod,
        status: OrderStatus,
    ) -> Result<Timestamp, sqlx::Error> {
        let (created_at,): (SqlxTimestamp,) = query_as(CREATE_ORDER_SQL)
            .bind(order_id)
            .bind(user.into_i64())
            .bind(address_id)
            .bind(try_into_i64(freight)?)
            .bind(pay_method.as_i16())
            .bind(status.as_i16())
            .fetch_one(&mut **tx)
            .await?;

        Ok(created_at.to_jiff())
    }

    pub(crate) async fn create_order_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_id: &str,
        sku_id: i64,
        quantity: u32,
        unit_price: u64,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ORDER_LINE_SQL)
            .bind(order_id)
            .bind(sku_id)
            .bind(i64::from(quantity))
            .bind(try_into_i64(unit_price)?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn update_order_totals(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &Order,
    ) -> Result<(), sqlx::Error> {
        query(UPDATE_ORDER_TOTALS_SQL)
            .bind(&order.order_id)
            .bind(i64::from(order.total_count))
            .bind(try_into_i64(order.total_amount)?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

fn try_into_i64(value: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(value).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}
