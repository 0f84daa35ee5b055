//! Category entity.
//!
//! Categories form an optional tree through `parent_id`; an empty
//! `parent_id` marks a root. Cycles are not detected.

use crate::model::entity::{
    new_entity_record, Entity, COLUMN_CREATED_AT, COLUMN_DESCRIPTION, COLUMN_ID, COLUMN_MEMO,
    COLUMN_METAS, COLUMN_PARENT_ID, COLUMN_SOFT_DELETED_AT, COLUMN_STATUS, COLUMN_TITLE,
    COLUMN_UPDATED_AT,
};
use crate::model::record::AttributeRecord;
use crate::query::CategoryFilters;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryStatus {
    Draft,
    Active,
    Inactive,
}

impl CategoryStatus {
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

impl Display for CategoryStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<CategoryStatus> for String {
    fn from(value: CategoryStatus) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    record: AttributeRecord,
}

impl Category {
    /// Creates a draft root category.
    pub fn new() -> Self {
        Self {
            record: new_entity_record(
                CategoryStatus::Draft.as_str(),
                &[
                    (COLUMN_PARENT_ID, ""),
                    (COLUMN_TITLE, ""),
                    (COLUMN_DESCRIPTION, ""),
                ],
            ),
        }
    }

    pub fn status_kind(&self) -> Option<CategoryStatus> {
        CategoryStatus::parse(&self.status())
    }

    pub fn set_status(&mut self, status: CategoryStatus) -> &mut Self {
        self.record.set(COLUMN_STATUS, status.as_str());
        self
    }

    pub fn parent_id(&self) -> String {
        self.record.get(COLUMN_PARENT_ID)
    }

    pub fn set_parent_id(&mut self, parent_id: &str) -> &mut Self {
        self.record.set(COLUMN_PARENT_ID, parent_id);
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id().is_empty()
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
}

impl Default for Category {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Category {
    type Filters = CategoryFilters;

    const TABLE: &'static str = "shop_category";
    const COLUMNS: &'static [&'static str] = &[
        COLUMN_ID,
        COLUMN_STATUS,
        COLUMN_PARENT_ID,
        COLUMN_TITLE,
        COLUMN_DESCRIPTION,
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
