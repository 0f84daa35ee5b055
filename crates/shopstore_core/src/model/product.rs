//! Product entity.
//!
//! # Invariants
//! - `price` is stored as text with two decimals, `quantity` as an integer.
//! - New products start as `draft`.

use crate::model::entity::{
    new_entity_record, Entity, COLUMN_CREATED_AT, COLUMN_DESCRIPTION, COLUMN_ID, COLUMN_MEMO,
    COLUMN_METAS, COLUMN_PRICE, COLUMN_QUANTITY, COLUMN_SHORT_DESCRIPTION,
    COLUMN_SOFT_DELETED_AT, COLUMN_STATUS, COLUMN_TITLE, COLUMN_UPDATED_AT,
};
use crate::model::record::AttributeRecord;
use crate::query::ProductFilters;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Product lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Draft,
    Active,
    Inactive,
}

impl ProductStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

impl Display for ProductStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ProductStatus> for String {
    fn from(value: ProductStatus) -> Self {
        value.as_str().to_string()
    }
}

/// Sellable product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    record: AttributeRecord,
}

impl Product {
    /// Creates a draft product with zero price and quantity.
    pub fn new() -> Self {
        Self {
            record: new_entity_record(
                ProductStatus::Draft.as_str(),
                &[
                    (COLUMN_TITLE, ""),
                    (COLUMN_DESCRIPTION, ""),
                    (COLUMN_SHORT_DESCRIPTION, ""),
                    (COLUMN_QUANTITY, "0"),
                    (COLUMN_PRICE, "0.00"),
                ],
            ),
        }
    }

    /// Typed status; `None` when persisted text is unknown.
    pub fn status_kind(&self) -> Option<ProductStatus> {
        ProductStatus::parse(&self.status())
    }

    pub fn set_status(&mut self, status: ProductStatus) -> &mut Self {
        self.record.set(COLUMN_STATUS, status.as_str());
        self
    }

    pub fn is_active(&self) -> bool {
        self.status_kind() == Some(ProductStatus::Active)
    }

    pub fn title(&self) -> String {
        self.record.get(COLUMN_TITLE)
    }

    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.record.set(COLUMN_TITLE, title);
        self
    }

    pub fn description(&self) -> String {
        self.record.get(COLUMN_DESCRIPTION)
    }

    pub fn set_description(&mut self, description: &str) -> &mut Self {
        self.record.set(COLUMN_DESCRIPTION, description);
        self
    }

    pub fn short_description(&self) -> String {
        self.record.get(COLUMN_SHORT_DESCRIPTION)
    }

    pub fn set_short_description(&mut self, short_description: &str) -> &mut Self {
        self.record.set(COLUMN_SHORT_DESCRIPTION, short_description);
        self
    }

    /// Price as stored text, e.g. `"19.99"`.
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

    /// Quantity as stored text, e.g. `"1"`.
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

    /// Free products have a zero price.
    pub fn is_free(&self) -> bool {
        self.price_float() == 0.0
    }
}

impl Default for Product {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Product {
    type Filters = ProductFilters;

    const TABLE: &'static str = "shop_product";
    const COLUMNS: &'static [&'static str] = &[
        COLUMN_ID,
        COLUMN_STATUS,
        COLUMN_TITLE,
        COLUMN_DESCRIPTION,
        COLUMN_SHORT_DESCRIPTION,
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
