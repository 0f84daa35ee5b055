//! Attribute record backing every shop entity.
//!
//! # Responsibility
//! - Hold one persisted row as column name -> text value.
//! - Track which columns changed since the last load/persist.
//!
//! # Invariants
//! - Values are stored as text; typed helpers convert at the boundary and
//!   fall back to zero values on malformed input.
//! - `hydrate` is a load, not a mutation: the dirty set ends up empty.
//! - `set` with a value equal to the stored one is a no-op and does not
//!   mark the column dirty.

use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Column name -> text value mapping.
pub type Attributes = BTreeMap<String, String>;

/// String-to-string metadata decoded from a JSON text column.
pub type Metas = BTreeMap<String, String>;

/// Dynamic row container with dirty-column tracking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeRecord {
    data: Attributes,
    dirty: BTreeSet<String>,
}

impl AttributeRecord {
    /// Creates an empty, clean record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a clean record from a storage row.
    pub fn from_row(row: Attributes) -> Self {
        let mut record = Self::new();
        record.hydrate(row);
        record
    }

    /// Returns the stored text, or an empty string when the column is absent.
    pub fn get(&self, column: &str) -> String {
        self.data.get(column).cloned().unwrap_or_default()
    }

    /// Returns whether the column holds any value (including an empty one).
    pub fn contains(&self, column: &str) -> bool {
        self.data.contains_key(column)
    }

    /// Stores `value` and marks the column dirty when it actually changes.
    pub fn set(&mut self, column: &str, value: impl Into<String>) {
        let value = value.into();
        if self.data.get(column) == Some(&value) {
            return;
        }
        self.data.insert(column.to_string(), value);
        self.dirty.insert(column.to_string());
    }

    /// Full current column set.
    pub fn data(&self) -> &Attributes {
        &self.data
    }

    /// Only the columns mutated since creation or the last clean mark.
    pub fn data_changed(&self) -> Attributes {
        self.dirty
            .iter()
            .filter_map(|column| {
                self.data
                    .get(column)
                    .map(|value| (column.clone(), value.clone()))
            })
            .collect()
    }

    /// Returns whether any column is dirty.
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Clears the dirty set. Called after a successful write.
    pub fn mark_as_not_dirty(&mut self) {
        self.dirty.clear();
    }

    /// Replaces every column from a storage row and leaves the record clean.
    pub fn hydrate(&mut self, row: Attributes) {
        self.data = row;
        self.dirty.clear();
    }

    /// Reads a column as `f64`; unparsable or empty text yields `0.0`.
    pub fn get_float(&self, column: &str) -> f64 {
        self.data
            .get(column)
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite())
            .unwrap_or(0.0)
    }

    /// Writes a float with two decimal places (money layout).
    pub fn set_float(&mut self, column: &str, value: f64) {
        self.set(column, format!("{value:.2}"));
    }

    /// Reads a column as `i64`; unparsable or empty text yields `0`.
    pub fn get_int(&self, column: &str) -> i64 {
        self.data
            .get(column)
            .and_then(|value| value.trim().parse::<i64>().ok())
            .unwrap_or(0)
    }

    pub fn set_int(&mut self, column: &str, value: i64) {
        self.set(column, value.to_string());
    }

    /// Decodes the JSON object in `column` into a string map.
    ///
    /// Non-string values are returned as their JSON text. Empty or malformed
    /// text yields an empty map, never an error.
    pub fn metas(&self, column: &str) -> Metas {
        decode_metas(&self.get(column))
            .map(|object| {
                object
                    .into_iter()
                    .map(|(key, value)| (key, meta_text(value)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Overwrites the whole metas blob with `metas`.
    ///
    /// Keys missing from `metas` are dropped.
    pub fn set_metas(&mut self, column: &str, metas: &Metas) -> Result<(), serde_json::Error> {
        let encoded = serde_json::to_string(metas)?;
        self.set(column, encoded);
        Ok(())
    }

    /// Merges `metas` over the current blob; existing keys not mentioned
    /// are kept with their original JSON values.
    ///
    /// # Errors
    /// Fails without touching the column when the stored text is not a JSON
    /// object.
    pub fn upsert_metas(&mut self, column: &str, metas: &Metas) -> Result<(), serde_json::Error> {
        let mut merged = decode_metas(&self.get(column))?;
        for (key, value) in metas {
            merged.insert(key.clone(), Value::String(value.clone()));
        }
        let encoded = serde_json::to_string(&merged)?;
        self.set(column, encoded);
        Ok(())
    }
}

fn decode_metas(raw: &str) -> Result<Map<String, Value>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Map::new());
    }
    serde_json::from_str(raw)
}

fn meta_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{AttributeRecord, Attributes, Metas};

    fn row(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn metas(pairs: &[(&str, &str)]) -> Metas {
        row(pairs)
    }

    #[test]
    fn hydrate_leaves_record_clean() {
        let mut record = AttributeRecord::new();
        record.set("title", "draft");
        record.hydrate(row(&[("id", "p1"), ("title", "Loaded")]));

        assert!(!record.is_dirty());
        assert!(record.data_changed().is_empty());
        assert_eq!(record.get("title"), "Loaded");
    }

    #[test]
    fn set_after_hydrate_marks_only_that_column() {
        let mut record = AttributeRecord::from_row(row(&[("id", "p1"), ("title", "Old")]));
        record.set("title", "New");

        assert_eq!(record.data_changed(), row(&[("title", "New")]));
        assert_eq!(record.data().len(), 2);
    }

    #[test]
    fn set_with_equal_value_is_not_a_change() {
        let mut record = AttributeRecord::from_row(row(&[("title", "Same")]));
        record.set("title", "Same");
        assert!(!record.is_dirty());

        record.set("memo", "");
        assert_eq!(record.data_changed(), row(&[("memo", "")]));
    }

    #[test]
    fn mark_as_not_dirty_clears_dirty_set() {
        let mut record = AttributeRecord::new();
        record.set("status", "active");
        record.mark_as_not_dirty();

        assert!(record.data_changed().is_empty());
        assert_eq!(record.get("status"), "active");
    }

    #[test]
    fn missing_column_reads_as_empty() {
        let record = AttributeRecord::new();
        assert_eq!(record.get("nope"), "");
        assert!(!record.contains("nope"));
    }

    #[test]
    fn typed_helpers_tolerate_malformed_text() {
        let record = AttributeRecord::from_row(row(&[
            ("price", "abc"),
            ("quantity", "1.5"),
            ("amount", " 12.50 "),
        ]));

        assert_eq!(record.get_float("price"), 0.0);
        assert_eq!(record.get_int("quantity"), 0);
        assert_eq!(record.get_float("amount"), 12.5);
        assert_eq!(record.get_int("missing"), 0);
    }

    #[test]
    fn set_float_keeps_two_decimals() {
        let mut record = AttributeRecord::new();
        record.set_float("price", 19.99);
        assert_eq!(record.get("price"), "19.99");

        record.set_float("price", 20.0);
        assert_eq!(record.get("price"), "20.00");
    }

    #[test]
    fn metas_default_to_empty_map() {
        let mut record = AttributeRecord::new();
        assert!(record.metas("metas").is_empty());

        record.set("metas", "not json");
        assert!(record.metas("metas").is_empty());
    }

    #[test]
    fn upsert_merges_and_set_overwrites() {
        let mut record = AttributeRecord::new();
        record.upsert_metas("metas", &metas(&[("a", "1")])).unwrap();
        record.upsert_metas("metas", &metas(&[("b", "2")])).unwrap();
        assert_eq!(record.metas("metas"), metas(&[("a", "1"), ("b", "2")]));

        record.set_metas("metas", &metas(&[("b", "2")])).unwrap();
        assert_eq!(record.metas("metas"), metas(&[("b", "2")]));
    }

    #[test]
    fn upsert_keeps_non_string_values() {
        let mut record = AttributeRecord::new();
        record.set("metas", r#"{"color":"green","stock":5}"#);

        record.upsert_metas("metas", &metas(&[("size", "xxl")])).unwrap();

        assert_eq!(
            record.metas("metas"),
            metas(&[("color", "green"), ("size", "xxl"), ("stock", "5")])
        );
        assert!(record.get("metas").contains(r#""stock":5"#));
    }

    #[test]
    fn upsert_refuses_to_overwrite_malformed_blob() {
        let mut record = AttributeRecord::from_row(row(&[("metas", "not json")]));

        assert!(record.upsert_metas("metas", &metas(&[("a", "1")])).is_err());
        assert_eq!(record.get("metas"), "not json");
        assert!(!record.is_dirty());
    }
}
