//! Payment Models

/// Signed callback parameters delivered by the payment gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayCallback {
    pub order_id: String,
    pub trade_id: String,
    /// Paid amount in minor units (cents).
    pub amount: u64,
    pub sign: String,
}
