//! Payments Repository

use sqlx::{Postgres, Transaction, query, query_as};
use uuid::Uuid;

use crate::{
    auth::models::UserId,
    domain::{
        carts::repository::try_into_amount,
        orders::models::{OrderStatus, PayMethod},
    },
};

const FIND_RECEIPT_SQL: &str = include_str!("sql/find_receipt.sql");
const GET_PAYABLE_ORDER_SQL: &str = include_str!("sql/get_payable_order.sql");
const GET_UNPAID_ORDER_SQL: &str = include_str!("sql/get_unpaid_order.sql");
const INSERT_RECEIPT_SQL: &str = include_str!("sql/insert_receipt.sql");
const MARK_AWAITING_SHIPMENT_SQL: &str = include_str!("sql/mark_awaiting_shipment.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPaymentsRepository;

impl PgPaymentsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Total amount of the user's prepaid order that is still awaiting
    /// payment, if any.
    pub(crate) async fn get_payable_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_id: &str,
        user: UserId,
    ) -> Result<Option<u64>, sqlx::Error> {
        let row: Option<(i64,)> = query_as(GET_PAYABLE_ORDER_SQL)
            .bind(order_id)
            .bind(user.into_i64())
            .bind(PayMethod::Prepaid.as_i16())
            .bind(OrderStatus::AwaitingPayment.as_i16())
            .fetch_optional(&mut **tx)
            .await?;

        row.map(|(total_amount,)| try_into_amount(total_amount))
            .transpose()
    }

    /// Total amount of an unpaid prepaid order regardless of owner. Gateway
    /// callbacks are authenticated by signature, not by session.
    pub(crate) async fn get_unpaid_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_id: &str,
    ) -> Result<Option<u64>, sqlx::Error> {
        let row: Option<(i64,)> = query_as(GET_UNPAID_ORDER_SQL)
            .bind(order_id)
            .bind(PayMethod::Prepaid.as_i16())
            .bind(OrderStatus::AwaitingPayment.as_i16())
            .fetch_optional(&mut **tx)
            .await?;

        row.map(|(total_amount,)| try_into_amount(total_amount))
            .transpose()
    }

    /// Order the given trade was already recorded against, if any.
    pub(crate) async fn find_receipt(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        trade_id: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = query_as(FIND_RECEIPT_SQL)
            .bind(trade_id)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(row.map(|(order_id,)| order_id))
    }

    /// Record the gateway receipt. The unique constraint on `trade_id`
    /// absorbs redelivered callbacks; returns the number of rows inserted.
    pub(crate) async fn insert_receipt(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_id: &str,
        trade_id: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = query(INSERT_RECEIPT_SQL)
            .bind(Uuid::now_v7())
            .bind(order_id)
            .bind(trade_id)
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }

    pub(crate) async fn mark_awaiting_shipment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_id: &str,
    ) -> Result<(), sqlx::Error> {
        query(MARK_AWAITING_SHIPMENT_SQL)
            .bind(order_id)
            .bind(OrderStatus::AwaitingShipment.as_i16())
            .bind(OrderStatus::AwaitingPayment.as_i16())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}
