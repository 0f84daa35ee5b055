//! Media entity: an image/video/file attached to another entity.
//!
//! # Invariants
//! - `entity_id` is an advisory reference to any shop entity.
//! - `sequence` orders media within one owner; lower comes first.

use crate::model::entity::{
    new_entity_record, Entity, COLUMN_CREATED_AT, COLUMN_DESCRIPTION, COLUMN_ENTITY_ID, COLUMN_ID,
    COLUMN_MEMO, COLUMN_METAS, COLUMN_SEQUENCE, COLUMN_SOFT_DELETED_AT, COLUMN_STATUS,
    COLUMN_TITLE, COLUMN_TYPE, COLUMN_UPDATED_AT, COLUMN_URL,
};
use crate::model::record::AttributeRecord;
use crate::query::MediaFilters;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaStatus {
    Draft,
    Active,
    Inactive,
}

impl MediaStatus {
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

impl Display for MediaStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<MediaStatus> for String {
    fn from(value: MediaStatus) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Media {
    record: AttributeRecord,
}

impl Media {
    /// Creates a draft media entry with sequence 0.
    pub fn new() -> Self {
        Self {
            record: new_entity_record(
                MediaStatus::Draft.as_str(),
                &[
                    (COLUMN_ENTITY_ID, ""),
                    (COLUMN_TYPE, ""),
                    (COLUMN_TITLE, ""),
                    (COLUMN_DESCRIPTION, ""),
                    (COLUMN_URL, ""),
                    (COLUMN_SEQUENCE, "0"),
                ],
            ),
        }
    }

    pub fn status_kind(&self) -> Option<MediaStatus> {
        MediaStatus::parse(&self.status())
    }

    pub fn set_status(&mut self, status: MediaStatus) -> &mut Self {
        self.record.set(COLUMN_STATUS, status.as_str());
        self
    }

    pub fn entity_id(&self) -> String {
        self.record.get(COLUMN_ENTITY_ID)
    }

    pub fn set_entity_id(&mut self, entity_id: &str) -> &mut Self {
        self.record.set(COLUMN_ENTITY_ID, entity_id);
        self
    }

    /// Free-form media kind, e.g. `image/png` or `video`.
    pub fn media_type(&self) -> String {
        self.record.get(COLUMN_TYPE)
    }

    pub fn set_media_type(&mut self, media_type: &str) -> &mut Self {
        self.record.set(COLUMN_TYPE, media_type);
        self
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

    pub fn url(&self) -> String {
        self.record.get(COLUMN_URL)
    }

    pub fn set_url(&mut self, url: &str) -> &mut Self {
        self.record.set(COLUMN_URL, url);
        self
    }

    pub fn sequence(&self) -> i64 {
        self.record.get_int(COLUMN_SEQUENCE)
    }

    pub fn set_sequence(&mut self, sequence: i64) -> &mut Self {
        self.record.set_int(COLUMN_SEQUENCE, sequence);
        self
    }
}

impl Default for Media {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Media {
    type Filters = MediaFilters;

    const TABLE: &'static str = "shop_media";
    const COLUMNS: &'static [&'static str] = &[
        COLUMN_ID,
        COLUMN_STATUS,
        COLUMN_ENTITY_ID,
        COLUMN_TYPE,
        COLUMN_TITLE,
        COLUMN_DESCRIPTION,
        COLUMN_URL,
        COLUMN_SEQUENCE,
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
