//! SQL executor abstraction.
//!
//! Stores never talk to `rusqlite` directly: they hand a statement plus bind
//! values to a `SqlExecutor` and get back affected-row counts or rows as
//! column-name -> text maps.

use super::DbResult;
use rusqlite::types::ValueRef;
use rusqlite::{params_from_iter, Connection};
use std::collections::BTreeMap;

/// Bind value accepted by executors.
pub type SqlValue = rusqlite::types::Value;

/// One selected row keyed by column name, every cell rendered as text.
pub type SqlRow = BTreeMap<String, String>;

/// Statement execution capability used by entity stores.
///
/// Implementations run exactly one statement per call and never retry.
pub trait SqlExecutor {
    /// Runs a write statement and returns the number of affected rows.
    fn execute(&self, sql: &str, params: &[SqlValue]) -> DbResult<usize>;

    /// Runs a read statement and returns every row as a text map.
    ///
    /// `NULL` cells are returned as empty strings.
    fn select_rows(&self, sql: &str, params: &[SqlValue]) -> DbResult<Vec<SqlRow>>;
}

impl SqlExecutor for Connection {
    fn execute(&self, sql: &str, params: &[SqlValue]) -> DbResult<usize> {
        let changed = Connection::execute(self, sql, params_from_iter(params.iter()))?;
        Ok(changed)
    }

    fn select_rows(&self, sql: &str, params: &[SqlValue]) -> DbResult<Vec<SqlRow>> {
        let mut stmt = self.prepare(sql)?;
        let column_names: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            let mut mapped = SqlRow::new();
            for (index, name) in column_names.iter().enumerate() {
                mapped.insert(name.clone(), cell_to_text(row.get_ref(index)?));
            }
            result.push(mapped);
        }

        Ok(result)
    }
}

fn cell_to_text(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(number) => number.to_string(),
        ValueRef::Real(number) => number.to_string(),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SqlExecutor, SqlValue};
    use rusqlite::Connection;

    #[test]
    fn select_rows_renders_every_cell_as_text() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (a TEXT, b INTEGER, c REAL, d TEXT);")
            .unwrap();
        SqlExecutor::execute(
            &conn,
            "INSERT INTO t (a, b, c, d) VALUES (?, ?, ?, NULL);",
            &[
                SqlValue::Text("x".to_string()),
                SqlValue::Integer(7),
                SqlValue::Real(2.5),
            ],
        )
        .unwrap();

        let rows = conn.select_rows("SELECT a, b, c, d FROM t;", &[]).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["a"], "x");
        assert_eq!(rows[0]["b"], "7");
        assert_eq!(rows[0]["c"], "2.5");
        assert_eq!(rows[0]["d"], "");
    }

    #[test]
    fn execute_reports_affected_rows() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (a TEXT); INSERT INTO t VALUES ('1'), ('2');")
            .unwrap();

        let changed = SqlExecutor::execute(&conn, "DELETE FROM t;", &[]).unwrap();
        assert_eq!(changed, 2);
    }
}
