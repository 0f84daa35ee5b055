//! Customer order header. Line items live in `shop_order_line_item` and
//! point back here through `order_id`.

use crate::model::entity::{
    new_entity_record, Entity, COLUMN_CREATED_AT, COLUMN_CUSTOMER_ID, COLUMN_ID, COLUMN_MEMO,
    COLUMN_METAS, COLUMN_PRICE, COLUMN_QUANTITY, COLUMN_SOFT_DELETED_AT, COLUMN_STATUS,
    COLUMN_UPDATED_AT,
};
use crate::model::record::AttributeRecord;
use crate::query::OrderFilters;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Fulfilment/payment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    AwaitingFulfillment,
    AwaitingPayment,
    AwaitingPickup,
    AwaitingShipment,
    Cancelled,
    Completed,
    Declined,
    Disputed,
    ManualVerificationRequired,
    Pending,
    Refunded,
    Shipped,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AwaitingFulfillment => "awaiting_fulfillment",
            Self::AwaitingPayment => "awaiting_payment",
            Self::AwaitingPickup => "awaiting_pickup",
            Self::AwaitingShipment => "awaiting_shipment",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
            Self::Declined => "declined",
            Self::Disputed => "disputed",
            Self::ManualVerificationRequired => "manual_verification_required",
            Self::Pending => "pending",
            Self::Refunded => "refunded",
            Self::Shipped => "shipped",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "awaiting_fulfillment" => Some(Self::AwaitingFulfillment),
            "awaiting_payment" => Some(Self::AwaitingPayment),
            "awaiting_pickup" => Some(Self::AwaitingPickup),
            "awaiting_shipment" => Some(Self::AwaitingShipment),
            "cancelled" => Some(Self::Cancelled),
            "completed" => Some(Self::Completed),
            "declined" => Some(Self::Declined),
            "disputed" => Some(Self::Disputed),
            "manual_verification_required" => Some(Self::ManualVerificationRequired),
            "pending" => Some(Self::Pending),
            "refunded" => Some(Self::Refunded),
            "shipped" => Some(Self::Shipped),
            _ => None,
        }
    }

    /// Terminal states accept no further fulfilment work.
    pub fn is_final(self) -> bool {
        matches!(
            self,
            Self::Cancelled | Self::Completed | Self::Declined | Self::Refunded
        )
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<OrderStatus> for String {
    fn from(value: OrderStatus) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    record: AttributeRecord,
}

impl Order {
    /// Creates a pending order with zero totals.
    pub fn new() -> Self {
        Self {
            record: new_entity_record(
                OrderStatus::Pending.as_str(),
                &[
                    (COLUMN_CUSTOMER_ID, ""),
                    (COLUMN_QUANTITY, "0"),
                    (COLUMN_PRICE, "0.00"),
                ],
            ),
        }
    }

    pub fn status_kind(&self) -> Option<OrderStatus> {
        OrderStatus::parse(&self.status())
    }

    pub fn set_status(&mut self, status: OrderStatus) -> &mut Self {
        self.record.set(COLUMN_STATUS, status.as_str());
        self
    }

    pub fn customer_id(&self) -> String {
        self.record.get(COLUMN_CUSTOMER_ID)
    }

    pub fn set_customer_id(&mut self, customer_id: &str) -> &mut Self {
        self.record.set(COLUMN_CUSTOMER_ID, customer_id);
        self
    }

    pub fn price(&self) -> String {
        self.record.get(COLUMN_PRICE)
    }

    pub fn price_float(&self) -> f64 {
        self.record.get_float(COLUMN_PRICE)
    }

    pub fn set_price_float(&mut self, price: f64) -> &mut Self {
        self.record.set_float(COLUMN_PRICE, price);
        self
    }

    pub fn quantity(&self) -> String {
        self.record.get(COLUMN_QUANTITY)
    }

    pub fn quantity_int(&self) -> i64 {
        self.record.get_int(COLUMN_QUANTITY)
    }

    pub fn set_quantity_int(&mut self, quantity: i64) -> &mut Self {
        self.record.set_int(COLUMN_QUANTITY, quantity);
        self
    }
}

impl Default for Order {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Order {
    type Filters = OrderFilters;

    const TABLE: &'static str = "shop_order";
    const COLUMNS: &'static [&'static str] = &[
        COLUMN_ID,
        COLUMN_STATUS,
        COLUMN_CUSTOMER_ID,
        COLUMN_QUANTITY,
        COLUMN_PRICE,
        COLUMN_MEMO,
        COLUMN_METAS,
        COLUMN_CREATED_AT,
        COLUMN_UPDATED_AT,
        COLUMN_SOFT_DELETED_AT,
    ];

    fn from_record(record: AttributeRecord) -> Self {
        Self { record }
    }

    fn record(&self) -> &AttributeRecord {
        &self.record
    }

    fn record_mut(&mut self) -> &mut AttributeRecord {
        &mut self.record
    }
}
