//! Discount entity: a code-addressable price reduction, either a fixed
//! amount or a percentage, valid inside an optional `starts_at..ends_at`
//! window.

use crate::model::entity::{
    new_entity_record, Entity, COLUMN_AMOUNT, COLUMN_CODE, COLUMN_CREATED_AT,
    COLUMN_DESCRIPTION, COLUMN_ENDS_AT, COLUMN_ID, COLUMN_MEMO, COLUMN_METAS,
    COLUMN_SOFT_DELETED_AT, COLUMN_STARTS_AT, COLUMN_STATUS, COLUMN_TITLE, COLUMN_TYPE,
    COLUMN_UPDATED_AT,
};
use crate::model::record::AttributeRecord;
use crate::query::DiscountFilters;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountStatus {
    Draft,
    Active,
    Inactive,
}

impl DiscountStatus {
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

impl Display for DiscountStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DiscountStatus> for String {
    fn from(value: DiscountStatus) -> Self {
        value.as_str().to_string()
    }
}

/// How `amount` is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// Fixed money amount off.
    Amount,
    /// Percentage off.
    Percent,
}

impl DiscountType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Percent => "percent",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "amount" => Some(Self::Amount),
            "percent" => Some(Self::Percent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Discount {
    record: AttributeRecord,
}

impl Discount {
    /// Creates a draft, fixed-amount discount with an open validity window.
    pub fn new() -> Self {
        Self {
            record: new_entity_record(
                DiscountStatus::Draft.as_str(),
                &[
                    (COLUMN_TYPE, DiscountType::Amount.as_str()),
                    (COLUMN_TITLE, ""),
                    (COLUMN_DESCRIPTION, ""),
                    (COLUMN_CODE, ""),
                    (COLUMN_AMOUNT, "0.00"),
                    (COLUMN_STARTS_AT, ""),
                    (COLUMN_ENDS_AT, ""),
                ],
            ),
        }
    }

    pub fn status_kind(&self) -> Option<DiscountStatus> {
        DiscountStatus::parse(&self.status())
    }

    pub fn set_status(&mut self, status: DiscountStatus) -> &mut Self {
        self.record.set(COLUMN_STATUS, status.as_str());
        self
    }

    pub fn discount_type(&self) -> Option<DiscountType> {
        DiscountType::parse(&self.record.get(COLUMN_TYPE))
    }

    pub fn set_discount_type(&mut self, kind: DiscountType) -> &mut Self {
        self.record.set(COLUMN_TYPE, kind.as_str());
        self
    }

    pub fn is_percent(&self) -> bool {
        self.discount_type() == Some(DiscountType::Percent)
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

    pub fn code(&self) -> String {
        self.record.get(COLUMN_CODE)
    }

    pub fn set_code(&mut self, code: &str) -> &mut Self {
        self.record.set(COLUMN_CODE, code);
        self
    }

    pub fn amount(&self) -> f64 {
        self.record.get_float(COLUMN_AMOUNT)
    }

    pub fn set_amount(&mut self, amount: f64) -> &mut Self {
        self.record.set_float(COLUMN_AMOUNT, amount);
        self
    }

    pub fn starts_at(&self) -> String {
        self.record.get(COLUMN_STARTS_AT)
    }

    pub fn set_starts_at(&mut self, starts_at: &str) -> &mut Self {
        self.record.set(COLUMN_STARTS_AT, starts_at);
        self
    }

    pub fn ends_at(&self) -> String {
        self.record.get(COLUMN_ENDS_AT)
    }

    pub fn set_ends_at(&mut self, ends_at: &str) -> &mut Self {
        self.record.set(COLUMN_ENDS_AT, ends_at);
        self
    }

    /// Whether the discount is active and `now` falls inside its window.
    ///
    /// Empty window bounds are open. `now` uses the persisted datetime layout.
    pub fn is_applicable_at(&self, now: &str) -> bool {
        if self.status_kind() != Some(DiscountStatus::Active) {
            return false;
        }
        let starts_at = self.starts_at();
        let ends_at = self.ends_at();
        (starts_at.is_empty() || starts_at.as_str() <= now)
            && (ends_at.is_empty() || now <= ends_at.as_str())
    }
}

impl Default for Discount {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Discount {
    type Filters = DiscountFilters;

    const TABLE: &'static str = "shop_discount";
    const COLUMNS: &'static [&'static str] = &[
        COLUMN_ID,
        COLUMN_STATUS,
        COLUMN_TYPE,
        COLUMN_TITLE,
        COLUMN_DESCRIPTION,
        COLUMN_CODE,
        COLUMN_AMOUNT,
        COLUMN_STARTS_AT,
        COLUMN_ENDS_AT,
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
