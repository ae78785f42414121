//! The settlement commit loop: one reservation plus one order line per
//! selected cart entry, with totals accumulated along the way.
//!
//! The loop is generic over the store so its atomicity is testable without
//! a database: the caller owns the surrounding transaction, and any error
//! returned from here rolls back every line and stock decrement written
//! before the failing entry.

use async_trait::async_trait;

use crate::domain::orders::reserve::{
    ReserveError, RetryPolicy, StockSource, reserve_with_retry,
};

/// Everything the commit loop writes through: the stock counters plus the
/// order lines capturing each reservation.
#[async_trait]
pub(crate) trait SettlementStore: StockSource {
    async fn insert_line(
        &mut self,
        order_id: &str,
        sku_id: i64,
        quantity: u32,
        unit_price: u64,
    ) -> Result<(), Self::Error>;
}

/// Totals across the reserved lines, excluding freight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct SettlementTotals {
    pub total_count: u32,
    pub total_amount: u64,
}

/// Reserve stock and write one order line per selected entry.
///
/// Stops at the first failure. Nothing is undone here; the caller rolls
/// back the transaction the store wraps.
pub(crate) async fn reserve_order_lines<S>(
    store: &mut S,
    order_id: &str,
    selected: &[(i64, u32)],
    policy: RetryPolicy,
) -> Result<SettlementTotals, ReserveError<S::Error>>
where
    S: SettlementStore + Send,
{
    let mut totals = SettlementTotals::default();

    for &(sku_id, quantity) in selected {
        let line = reserve_with_retry(store, sku_id, quantity, policy).await?;

        store
            .insert_line(order_id, sku_id, quantity, line.unit_price)
            .await
            .map_err(ReserveError::Source)?;

        totals.total_count += quantity;
        totals.total_amount += line.unit_price * u64::from(quantity);
    }

    Ok(totals)
}
