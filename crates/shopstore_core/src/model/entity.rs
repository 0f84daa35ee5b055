//! Shared entity contract over `AttributeRecord`.
//!
//! # Responsibility
//! - Describe the table/column mapping every store is generic over.
//! - Provide the accessors all six entities share (identity, status,
//!   timestamps, soft-delete marker, memo, metas).
//!
//! # Invariants
//! - `COLUMNS` lists every persisted column; stores never write others.
//! - `id` is assigned once at creation and excluded from updates.

use crate::clock::NOT_DELETED_SENTINEL;
use crate::model::record::{AttributeRecord, Attributes, Metas};
use crate::query::EntityFilters;

pub const COLUMN_ID: &str = "id";
pub const COLUMN_STATUS: &str = "status";
pub const COLUMN_MEMO: &str = "memo";
pub const COLUMN_METAS: &str = "metas";
pub const COLUMN_CREATED_AT: &str = "created_at";
pub const COLUMN_UPDATED_AT: &str = "updated_at";
pub const COLUMN_SOFT_DELETED_AT: &str = "soft_deleted_at";

pub const COLUMN_AMOUNT: &str = "amount";
pub const COLUMN_CODE: &str = "code";
pub const COLUMN_CUSTOMER_ID: &str = "customer_id";
pub const COLUMN_DESCRIPTION: &str = "description";
pub const COLUMN_ENDS_AT: &str = "ends_at";
pub const COLUMN_ENTITY_ID: &str = "entity_id";
pub const COLUMN_ORDER_ID: &str = "order_id";
pub const COLUMN_PARENT_ID: &str = "parent_id";
pub const COLUMN_PRICE: &str = "price";
pub const COLUMN_PRODUCT_ID: &str = "product_id";
pub const COLUMN_QUANTITY: &str = "quantity";
pub const COLUMN_SEQUENCE: &str = "sequence";
pub const COLUMN_SHORT_DESCRIPTION: &str = "short_description";
pub const COLUMN_STARTS_AT: &str = "starts_at";
pub const COLUMN_TITLE: &str = "title";
pub const COLUMN_TYPE: &str = "type";
pub const COLUMN_URL: &str = "url";

/// Columns that are never part of an update statement.
pub const NON_UPDATABLE_COLUMNS: &[&str] = &[COLUMN_ID];

/// Typed view over an `AttributeRecord` persisted in one table.
pub trait Entity: Sized {
    /// Entity-specific query filters.
    type Filters: EntityFilters;

    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];
    /// Column used when a query does not specify `order_by`.
    const DEFAULT_ORDER_BY: &'static str = COLUMN_CREATED_AT;

    /// Wraps a record loaded from storage.
    fn from_record(record: AttributeRecord) -> Self;
    fn record(&self) -> &AttributeRecord;
    fn record_mut(&mut self) -> &mut AttributeRecord;

    fn id(&self) -> String {
        self.record().get(COLUMN_ID)
    }

    /// Raw status text; entity modules expose the typed enum.
    fn status(&self) -> String {
        self.record().get(COLUMN_STATUS)
    }

    fn memo(&self) -> String {
        self.record().get(COLUMN_MEMO)
    }

    fn set_memo(&mut self, memo: &str) {
        self.record_mut().set(COLUMN_MEMO, memo);
    }

    fn created_at(&self) -> String {
        self.record().get(COLUMN_CREATED_AT)
    }

    fn updated_at(&self) -> String {
        self.record().get(COLUMN_UPDATED_AT)
    }

    fn soft_deleted_at(&self) -> String {
        self.record().get(COLUMN_SOFT_DELETED_AT)
    }

    /// True when the soft-delete marker holds a real deletion time.
    fn is_soft_deleted(&self) -> bool {
        let marker = self.soft_deleted_at();
        !marker.is_empty() && marker != NOT_DELETED_SENTINEL
    }

    fn metas(&self) -> Metas {
        self.record().metas(COLUMN_METAS)
    }

    /// Single metas value, empty when the key is absent.
    fn meta(&self, key: &str) -> String {
        self.metas().remove(key).unwrap_or_default()
    }

    fn set_meta(&mut self, key: &str, value: &str) -> Result<(), serde_json::Error> {
        let mut single = Metas::new();
        single.insert(key.to_string(), value.to_string());
        self.upsert_metas(&single)
    }

    /// Replaces the whole metas blob.
    fn set_metas(&mut self, metas: &Metas) -> Result<(), serde_json::Error> {
        self.record_mut().set_metas(COLUMN_METAS, metas)
    }

    /// Merges `metas` into the existing blob without dropping keys.
    fn upsert_metas(&mut self, metas: &Metas) -> Result<(), serde_json::Error> {
        self.record_mut().upsert_metas(COLUMN_METAS, metas)
    }

    fn data(&self) -> &Attributes {
        self.record().data()
    }

    fn data_changed(&self) -> Attributes {
        self.record().data_changed()
    }

    fn mark_as_not_dirty(&mut self) {
        self.record_mut().mark_as_not_dirty();
    }
}

/// Builds the record for a brand-new entity: shared defaults first, then
/// the entity-specific ones. The ID is left empty for the store to assign.
pub(crate) fn new_entity_record(status: &str, defaults: &[(&str, &str)]) -> AttributeRecord {
    let mut record = AttributeRecord::new();
    record.set(COLUMN_ID, "");
    record.set(COLUMN_STATUS, status);
    record.set(COLUMN_MEMO, "");
    record.set(COLUMN_METAS, "{}");
    record.set(COLUMN_SOFT_DELETED_AT, NOT_DELETED_SENTINEL);
    for (column, value) in defaults {
        record.set(column, *value);
    }
    record
}
