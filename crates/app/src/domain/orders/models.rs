//! Order Models

use jiff::Timestamp;

use crate::auth::models::UserId;

/// Fixed freight charge in minor units (cents).
pub const FREIGHT_CENTS: u64 = 10_00;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayMethod {
    CashOnDelivery,
    Prepaid,
}

impl PayMethod {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::CashOnDelivery => 1,
            Self::Prepaid => 2,
        }
    }
}

impl TryFrom<i16> for PayMethod {
    type Error = i16;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::CashOnDelivery),
            2 => Ok(Self::Prepaid),
            other => Err(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    AwaitingPayment,
    AwaitingShipment,
    Shipped,
    Finished,
    Cancelled,
}

impl OrderStatus {
    /// Initial status of a freshly committed order: cash on delivery skips
    /// the payment step.
    #[must_use]
    pub const fn for_new_order(pay_method: PayMethod) -> Self {
        match pay_method {
            PayMethod::CashOnDelivery => Self::AwaitingShipment,
            PayMethod::Prepaid => Self::AwaitingPayment,
        }
    }

    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::AwaitingPayment => 1,
            Self::AwaitingShipment => 2,
            Self::Shipped => 3,
            Self::Finished => 4,
            Self::Cancelled => 5,
        }
    }
}

impl TryFrom<i16> for OrderStatus {
    type Error = i16;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::AwaitingPayment),
            2 => Ok(Self::AwaitingShipment),
            3 => Ok(Self::Shipped),
            4 => Ok(Self::Finished),
            5 => Ok(Self::Cancelled),
            other => Err(other),
        }
    }
}

/// Committed order header.
#[derive(Debug, Clone)]
pub struct Order {
    pub order_id: String,
    pub user: UserId,
    pub address_id: i64,
    pub total_count: u32,
    /// Sum of line prices in minor units, excluding freight.
    pub total_amount: u64,
    pub freight: u64,
    pub pay_method: PayMethod,
    pub status: OrderStatus,
    pub created_at: Timestamp,
}

/// Settlement commit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrder {
    pub address_id: i64,
    pub pay_method: PayMethod,
}

/// Read-only settlement preview of the selected cart subset.
#[derive(Debug, Clone)]
pub struct SettlementPreview {
    pub freight: u64,
    pub lines: Vec<PreviewLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLine {
    pub sku_id: i64,
    pub name: String,
    pub price: u64,
    pub default_image_url: String,
    pub quantity: u32,
}
