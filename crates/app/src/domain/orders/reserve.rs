//! Conditional stock reservation with bounded retry.
//!
//! The stock counter is the only contended shared resource in settlement.
//! It is mutated exclusively through a compare-and-swap-style conditional
//! update: read `(stock, sales)`, then apply a decrement that only succeeds
//! while `stock` still equals the value just read. A failed swap means a
//! concurrent settlement won the race, so the read-verify-swap cycle is
//! retried with exponential backoff up to a bounded attempt count.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use thiserror::Error;

/// Stock view of one sku at the moment of the read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SkuSnapshot {
    pub name: String,
    /// Price in minor units, captured for the order line.
    pub price: u64,
    pub stock: u64,
}

/// Seam between the retry loop and the store holding the stock counters,
/// so the no-oversell property is testable without a database.
#[async_trait]
pub(crate) trait StockSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Current snapshot, or `None` for an unknown sku.
    async fn load(&mut self, sku_id: i64) -> Result<Option<SkuSnapshot>, Self::Error>;

    /// Decrement stock and increment sales only if `stock` still equals
    /// `origin_stock`. Returns `false` when a concurrent reservation won.
    async fn reserve(
        &mut self,
        sku_id: i64,
        origin_stock: u64,
        quantity: u64,
    ) -> Result<bool, Self::Error>;
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct RetryPolicy {
    pub max_attempts: u32,
    pub base_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 16,
            base_backoff: Duration::from_millis(2),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ReserveError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    #[error("unknown sku {0}")]
    UnknownSku(i64),

    #[error("insufficient stock for {name}")]
    Insufficient { name: String },

    #[error("reservation still contended after {attempts} attempts")]
    Contended { attempts: u32 },

    #[error(transparent)]
    Source(E),
}

/// Outcome of one successful reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReservedLine {
    pub unit_price: u64,
    pub quantity: u32,
}

/// Reserve `quantity` units of one sku, retrying lost races.
pub(crate) async fn reserve_with_retry<S>(
    source: &mut S,
    sku_id: i64,
    quantity: u32,
    policy: RetryPolicy,
) -> Result<ReservedLine, ReserveError<S::Error>>
where
    S: StockSource + Send,
{
    for attempt in 0..policy.max_attempts {
        if attempt > 0 {
            backoff(policy.base_backoff, attempt).await;
        }

        let snapshot = source
            .load(sku_id)
            .await
            .map_err(ReserveError::Source)?
            .ok_or(ReserveError::UnknownSku(sku_id))?;

        if snapshot.stock < u64::from(quantity) {
            return Err(ReserveError::Insufficient {
                name: snapshot.name,
            });
        }

        if source
            .reserve(sku_id, snapshot.stock, u64::from(quantity))
            .await
            .map_err(ReserveError::Source)?
        {
            return Ok(ReservedLine {
                unit_price: snapshot.price,
                quantity,
            });
        }

        // Zero rows affected: another settlement changed the stock between
        // our read and our swap. Re-read and try again.
    }

    Err(ReserveError::Contended {
        attempts: policy.max_attempts,
    })
}

async fn backoff(base: Duration, attempt: u32) {
    let cap = base.saturating_mul(1_u32 << attempt.min(6));
    let cap_ms = u64::try_from(cap.as_millis()).unwrap_or(u64::MAX);

    // Full jitter; the RNG handle is scoped so it is dropped before the await.
    let wait_ms = { rand::thread_rng().gen_range(0..=cap_ms) };

    tokio::time::sleep(Duration::from_millis(wait_ms)).await;
}
