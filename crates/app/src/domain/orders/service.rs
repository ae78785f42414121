//! Settlement service.

use async_trait::async_trait;
use jiff::Zoned;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{error, warn};

use crate::{
    auth::models::UserId,
    database::Db,
    domain::{
        carts::repository::PgCartEntriesRepository,
        catalog::repository::PgSkuRepository,
        orders::{
            errors::SettlementError,
            ids::allocate_order_id,
            models::{FREIGHT_CENTS, NewOrder, Order, OrderStatus, PreviewLine, SettlementPreview},
            repository::PgOrdersRepository,
            reserve::{ReserveError, RetryPolicy, SkuSnapshot, StockSource},
            settlement::{SettlementStore, reserve_order_lines},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    entries: PgCartEntriesRepository,
    skus: PgSkuRepository,
    orders: PgOrdersRepository,
    policy: RetryPolicy,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            entries: PgCartEntriesRepository::new(),
            skus: PgSkuRepository::new(),
            orders: PgOrdersRepository::new(),
            policy: RetryPolicy::default(),
        }
    }
}

/// Settlement store backed by the open transaction.
struct TxSettlementStore<'t> {
    tx: &'t mut Transaction<'static, Postgres>,
    skus: PgSkuRepository,
    orders: PgOrdersRepository,
}

#[async_trait]
impl StockSource for TxSettlementStore<'_> {
    type Error = sqlx::Error;

    async fn load(&mut self, sku_id: i64) -> Result<Option<SkuSnapshot>, sqlx::Error> {
        Ok(self.skus.get_sku(self.tx, sku_id).await?.map(|sku| {
            SkuSnapshot {
                name: sku.name,
                price: sku.price,
                stock: sku.stock,
            }
        }))
    }

    async fn reserve(
        &mut self,
        sku_id: i64,
        origin_stock: u64,
        quantity: u64,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = self
            .skus
            .reserve_stock(self.tx, sku_id, origin_stock, quantity)
            .await?;

        Ok(rows_affected > 0)
    }
}

#[async_trait]
impl SettlementStore for TxSettlementStore<'_> {
    async fn insert_line(
        &mut self,
        order_id: &str,
        sku_id: i64,
        quantity: u32,
        unit_price: u64,
    ) -> Result<(), sqlx::Error> {
        self.orders
            .create_order_line(self.tx, order_id, sku_id, quantity, unit_price)
            .await
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn settle_preview(&self, user: UserId) -> Result<SettlementPreview, SettlementError> {
        let mut tx = self.db.begin().await?;

        let lines = self.entries.list_selected_lines(&mut tx, user).await?;

        tx.commit().await?;

        Ok(SettlementPreview {
            freight: FREIGHT_CENTS,
            lines: lines
                .into_iter()
                .map(|line| PreviewLine {
                    sku_id: line.sku_id,
                    name: line.name,
                    price: line.price,
                    default_image_url: line.default_image_url,
                    quantity: line.quantity,
                })
                .collect(),
        })
    }

    async fn settle_commit(
        &self,
        user: UserId,
        new_order: NewOrder,
    ) -> Result<Order, SettlementError> {
        let mut tx = self.db.begin().await?;

        let selected = self.entries.get_selected(&mut tx, user).await?;

        if selected.is_empty() {
            return Err(SettlementError::EmptyCart);
        }

        let order_id = allocate_order_id(&Zoned::now(), user);
        let status = OrderStatus::for_new_order(new_order.pay_method);

        let created_at = self
            .orders
            .create_order(
                &mut tx,
                &order_id,
                user,
                new_order.address_id,
                FREIGHT_CENTS,
                new_order.pay_method,
                status,
            )
            .await?;

        let mut order = Order {
            order_id,
            user,
            address_id: new_order.address_id,
            total_count: 0,
            total_amount: 0,
            freight: FREIGHT_CENTS,
            pay_method: new_order.pay_method,
            status,
            created_at,
        };

        // An error here drops the transaction, rolling back the header and
        // every line written so far. A partial order never lands.
        let totals = {
            let mut store = TxSettlementStore {
                tx: &mut tx,
                skus: self.skus.clone(),
                orders: self.orders.clone(),
            };

            reserve_order_lines(&mut store, &order.order_id, &selected, self.policy)
                .await
                .map_err(|e| match e {
                    ReserveError::Insufficient { name } => {
                        SettlementError::InsufficientStock { name }
                    }
                    ReserveError::UnknownSku(id) => SettlementError::UnknownSku(id),
                    ReserveError::Contended { attempts } => {
                        warn!(attempts, "stock reservation retries exhausted");

                        SettlementError::Contention
                    }
                    ReserveError::Source(source_error) => SettlementError::Sql(source_error),
                })?
        };

        order.total_count = totals.total_count;
        order.total_amount = totals.total_amount;

        self.orders.update_order_totals(&mut tx, &order).await?;

        tx.commit().await?;

        // Cart cleanup happens after the commit, outside the transactional
        // scope: the order is the authoritative record, so a failure here
        // only leaves the cart stale until its next reconciliation.
        let settled: Vec<i64> = selected.iter().map(|&(sku_id, _)| sku_id).collect();

        if let Err(cleanup_error) = self.clear_settled_entries(user, &settled).await {
            error!(
                order_id = %order.order_id,
                "failed to clear settled cart entries: {cleanup_error}"
            );
        }

        Ok(order)
    }
}

impl PgOrdersService {
    async fn clear_settled_entries(
        &self,
        user: UserId,
        sku_ids: &[i64],
    ) -> Result<(), sqlx::Error> {
        let mut tx = self.db.begin().await?;

        self.entries.delete_entries(&mut tx, user, sku_ids).await?;

        tx.commit().await
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Project the selected cart subset against the live catalog. Read-only;
    /// stock is validated only at commit.
    async fn settle_preview(&self, user: UserId) -> Result<SettlementPreview, SettlementError>;

    /// Convert the selected cart subset into a committed order with reserved
    /// stock, then clear the consumed entries.
    async fn settle_commit(
        &self,
        user: UserId,
        new_order: NewOrder,
    ) -> Result<Order, SettlementError>;
}
