//! Lowering of query specifications into parameterized SQL.
//!
//! # Invariants
//! - Column and table names come only from `Entity` constants; caller text
//!   reaches SQL exclusively through bind values.
//! - Predicates are AND-combined in the order they were added.
//! - Count-only statements carry no ordering or pagination.

use super::{known_column, Query, QueryResult, SORT_ASC};
use crate::clock::NOT_DELETED_SENTINEL;
use crate::db::SqlValue;
use crate::model::entity::{
    Entity, COLUMN_CREATED_AT, COLUMN_ID, COLUMN_SOFT_DELETED_AT, COLUMN_STATUS,
};
use crate::query::EntityFilters;

/// Column alias of the row-count projection.
pub const COUNT_COLUMN: &str = "count";

/// SQL text plus positional bind values.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// AND-combined `WHERE` clauses with their bind values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicates {
    clauses: Vec<String>,
    params: Vec<SqlValue>,
}

impl Predicates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn equals(&mut self, column: &'static str, value: &str) {
        self.clauses.push(format!("{column} = ?"));
        self.params.push(text(value));
    }

    /// Set membership; an empty set matches nothing.
    pub fn is_in(&mut self, column: &'static str, values: &[String]) {
        if values.is_empty() {
            self.clauses.push("1 = 0".to_string());
            return;
        }
        let placeholders = vec!["?"; values.len()].join(", ");
        self.clauses.push(format!("{column} IN ({placeholders})"));
        self.params.extend(values.iter().map(|value| text(value)));
    }

    /// Inclusive range: `BETWEEN` when both bounds exist, otherwise `>=`/`<=`.
    pub fn range(&mut self, column: &'static str, gte: Option<&str>, lte: Option<&str>) {
        match (gte, lte) {
            (Some(low), Some(high)) => {
                self.clauses.push(format!("{column} BETWEEN ? AND ?"));
                self.params.push(text(low));
                self.params.push(text(high));
            }
            (Some(low), None) => {
                self.clauses.push(format!("{column} >= ?"));
                self.params.push(text(low));
            }
            (None, Some(high)) => {
                self.clauses.push(format!("{column} <= ?"));
                self.params.push(text(high));
            }
            (None, None) => {}
        }
    }

    /// Substring match with `LIKE` wildcards in `needle` escaped.
    pub fn contains(&mut self, column: &'static str, needle: &str) {
        self.clauses.push(format!("{column} LIKE ? ESCAPE '\\'"));
        self.params.push(text(&format!("%{}%", escape_like(needle))));
    }

    fn append_to(self, statement: &mut Statement) {
        if !self.clauses.is_empty() {
            statement.sql.push_str(" WHERE ");
            statement.sql.push_str(&self.clauses.join(" AND "));
        }
        statement.params.extend(self.params);
    }
}

/// Validates `query` and lowers it to a `SELECT` against `E::TABLE`.
///
/// In count-only mode the projection becomes `COUNT(*) AS count` and the
/// ordering/pagination fields are ignored.
pub fn select_statement<E: Entity>(query: &Query<E>) -> QueryResult<Statement> {
    query.validate()?;

    let projection = if query.count_only() {
        format!("COUNT(*) AS {COUNT_COLUMN}")
    } else if query.columns().is_empty() {
        E::COLUMNS.join(", ")
    } else {
        query
            .columns()
            .iter()
            .map(|column| known_column::<E>("columns", column))
            .collect::<QueryResult<Vec<_>>>()?
            .join(", ")
    };

    let mut statement = Statement {
        sql: format!("SELECT {projection} FROM {}", E::TABLE),
        params: Vec::new(),
    };

    let mut predicates = Predicates::new();
    if query.has_id() {
        predicates.equals(COLUMN_ID, query.id());
    }
    if query.has_id_in() {
        predicates.is_in(COLUMN_ID, query.id_in());
    }
    if query.has_status() {
        predicates.equals(COLUMN_STATUS, query.status());
    }
    if query.has_status_in() {
        predicates.is_in(COLUMN_STATUS, query.status_in());
    }
    predicates.range(
        COLUMN_CREATED_AT,
        query.has_created_at_gte().then(|| query.created_at_gte()),
        query.has_created_at_lte().then(|| query.created_at_lte()),
    );
    query.filters().apply(&mut predicates);
    if !query.with_soft_deleted() {
        predicates.equals(COLUMN_SOFT_DELETED_AT, NOT_DELETED_SENTINEL);
    }
    predicates.append_to(&mut statement);

    if query.count_only() {
        return Ok(statement);
    }

    let order_by = if query.has_order_by() {
        known_column::<E>("order_by", query.order_by())?
    } else {
        E::DEFAULT_ORDER_BY
    };
    let direction = if query.sort_direction().eq_ignore_ascii_case(SORT_ASC) {
        "ASC"
    } else {
        "DESC"
    };
    statement
        .sql
        .push_str(&format!(" ORDER BY {order_by} {direction}"));
    if order_by != COLUMN_ID {
        statement.sql.push_str(", id ASC");
    }

    if query.has_limit() {
        statement.sql.push_str(" LIMIT ?");
        statement.params.push(SqlValue::Integer(query.limit()));
        if query.offset() > 0 {
            statement.sql.push_str(" OFFSET ?");
            statement.params.push(SqlValue::Integer(query.offset()));
        }
    } else if query.offset() > 0 {
        statement.sql.push_str(" LIMIT -1 OFFSET ?");
        statement.params.push(SqlValue::Integer(query.offset()));
    }

    Ok(statement)
}

fn text(value: &str) -> SqlValue {
    SqlValue::Text(value.to_string())
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
