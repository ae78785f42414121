//! Payment confirmation service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::models::UserId,
    database::Db,
    domain::payments::{
        errors::PaymentsServiceError, models::GatewayCallback, repository::PgPaymentsRepository,
        signature::GatewaySigner,
    },
};

#[derive(Debug, Clone)]
pub struct PgPaymentsService {
    db: Db,
    receipts: PgPaymentsRepository,
    signer: GatewaySigner,
    gateway_url: String,
}

impl PgPaymentsService {
    #[must_use]
    pub fn new(db: Db, signer: GatewaySigner, gateway_url: impl Into<String>) -> Self {
        Self {
            db,
            receipts: PgPaymentsRepository::new(),
            signer,
            gateway_url: gateway_url.into(),
        }
    }
}

#[async_trait]
impl PaymentsService for PgPaymentsService {
    async fn payment_url(
        &self,
        user: UserId,
        order_id: &str,
    ) -> Result<String, PaymentsServiceError> {
        let mut tx = self.db.begin().await?;

        let amount = self
            .receipts
            .get_payable_order(&mut tx, order_id, user)
            .await?
            .ok_or_else(|| PaymentsServiceError::OrderNotFound {
                order_id: order_id.to_owned(),
            })?;

        tx.commit().await?;

        let amount = amount.to_string();
        let sign = self
            .signer
            .sign(&[("order_id", order_id), ("amount", &amount)]);

        Ok(format!(
            "{}?order_id={order_id}&amount={amount}&sign={sign}",
            self.gateway_url
        ))
    }

    async fn confirm(&self, callback: GatewayCallback) -> Result<String, PaymentsServiceError> {
        let amount = callback.amount.to_string();

        // Verify before touching any state. An unverifiable callback must
        // not even leak whether the order exists.
        let verified = self.signer.verify(
            &[
                ("order_id", &callback.order_id),
                ("trade_id", &callback.trade_id),
                ("amount", &amount),
            ],
            &callback.sign,
        );

        if !verified {
            return Err(PaymentsServiceError::InvalidSignature);
        }

        let mut tx = self.db.begin().await?;

        // A trade already on record means this is a redelivery; acknowledge
        // it without touching the order again.
        if let Some(recorded_order) = self.receipts.find_receipt(&mut tx, &callback.trade_id).await?
        {
            if recorded_order == callback.order_id {
                return Ok(callback.trade_id);
            }

            return Err(PaymentsServiceError::OrderNotFound {
                order_id: callback.order_id,
            });
        }

        let amount_due = self
            .receipts
            .get_unpaid_order(&mut tx, &callback.order_id)
            .await?
            .ok_or_else(|| PaymentsServiceError::OrderNotFound {
                order_id: callback.order_id.clone(),
            })?;

        // The signature proves who sent the callback; this proves both
        // sides agree on what was charged.
        if callback.amount != amount_due {
            return Err(PaymentsServiceError::AmountMismatch {
                order_id: callback.order_id,
            });
        }

        let inserted = self
            .receipts
            .insert_receipt(&mut tx, &callback.order_id, &callback.trade_id)
            .await?;

        // A concurrent delivery may have inserted the receipt between the
        // lookup and here; only the insert winner transitions the order.
        if inserted > 0 {
            self.receipts
                .mark_awaiting_shipment(&mut tx, &callback.order_id)
                .await?;

            info!(order_id = %callback.order_id, "order payment confirmed");
        }

        tx.commit().await?;

        Ok(callback.trade_id)
    }
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Signed gateway redirect URL for the user's unpaid prepaid order.
    async fn payment_url(
        &self,
        user: UserId,
        order_id: &str,
    ) -> Result<String, PaymentsServiceError>;

    /// Apply a gateway callback: verify its signature, check the amount
    /// against the order, record the receipt and transition the order.
    /// Redeliveries of the same `trade_id` are acknowledged without a
    /// second transition.
    async fn confirm(&self, callback: GatewayCallback) -> Result<String, PaymentsServiceError>;
}
