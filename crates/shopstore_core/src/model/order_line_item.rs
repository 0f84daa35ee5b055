//! Order line item entity.
//!
//! # Invariants
//! - `order_id`/`product_id` are advisory references; nothing checks that
//!   the targets exist.
//! - `price` is the unit price; `line_total()` multiplies by `quantity`.

use crate::model::entity::{
    new_entity_record, Entity, COLUMN_CREATED_AT, COLUMN_ID, COLUMN_MEMO, COLUMN_METAS,
    COLUMN_ORDER_ID, COLUMN_PRICE, COLUMN_PRODUCT_ID, COLUMN_QUANTITY, COLUMN_SOFT_DELETED_AT,
    COLUMN_STATUS, COLUMN_TITLE, COLUMN_UPDATED_AT,
};
use crate::model::record::AttributeRecord;
use crate::query::OrderLineItemFilters;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderLineItemStatus {
    Active,
    Inactive,
}

impl OrderLineItemStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

impl Display for OrderLineItemStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<OrderLineItemStatus> for String {
    fn from(value: OrderLineItemStatus) -> Self {
        value.as_str().to_string()
    }
}

/// One product row inside an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineItem {
    record: AttributeRecord,
}

impl OrderLineItem {
    /// Creates an active line item with quantity 1 and zero price.
    pub fn new() -> Self {
        Self {
            record: new_entity_record(
                OrderLineItemStatus::Active.as_str(),
                &[
                    (COLUMN_ORDER_ID, ""),
                    (COLUMN_PRODUCT_ID, ""),
                    (COLUMN_TITLE, ""),
                    (COLUMN_QUANTITY, "1"),
                    (COLUMN_PRICE, "0.00"),
                ],
            ),
        }
    }

    pub fn status_kind(&self) -> Option<OrderLineItemStatus> {
        OrderLineItemStatus::parse(&self.status())
    }

    pub fn set_status(&mut self, status: OrderLineItemStatus) -> &mut Self {
        self.record.set(COLUMN_STATUS, status.as_str());
        self
    }

    pub fn order_id(&self) -> String {
        self.record.get(COLUMN_ORDER_ID)
    }

    pub fn set_order_id(&mut self, order_id: &str) -> &mut Self {
        self.record.set(COLUMN_ORDER_ID, order_id);
        self
    }

    pub fn product_id(&self) -> String {
        self.record.get(COLUMN_PRODUCT_ID)
    }

    pub fn set_product_id(&mut self, product_id: &str) -> &mut Self {
        self.record.set(COLUMN_PRODUCT_ID, product_id);
        self
    }

    pub fn title(&self) -> String {
        self.record.get(COLUMN_TITLE)
    }

    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.record.set(COLUMN_TITLE, title);
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

    /// Unit price times quantity.
    pub fn line_total(&self) -> f64 {
        self.price_float() * self.quantity_int() as f64
    }
}

impl Default for OrderLineItem {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for OrderLineItem {
    type Filters = OrderLineItemFilters;

    const TABLE: &'static str = "shop_order_line_item";
    const COLUMNS: &'static [&'static str] = &[
        COLUMN_ID,
        COLUMN_STATUS,
        COLUMN_ORDER_ID,
        COLUMN_PRODUCT_ID,
        COLUMN_TITLE,
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
