//! Generic entity store over the SQL executor.
//!
//! # Responsibility
//! - Provide create/find/list/count/update/soft-delete/delete for any
//!   `Entity`, differing only by table and column set.
//! - Keep SQL text generation inside the store/query boundary.
//!
//! # Invariants
//! - Precondition and validation errors are returned before any statement
//!   reaches the executor.
//! - Each operation issues at most one statement; storage errors propagate
//!   unchanged and nothing is retried.
//! - `id` never appears in an update and a dirty `id` is rejected; an
//!   empty update diff issues no SQL.
//! - Dirty sets are cleared only after a successful write.

use crate::clock::{Clock, IdGenerator, NOT_DELETED_SENTINEL};
use crate::db::{DbError, SqlExecutor, SqlRow, SqlValue};
use crate::model::entity::{
    Entity, COLUMN_CREATED_AT, COLUMN_ID, COLUMN_SOFT_DELETED_AT, COLUMN_UPDATED_AT,
    NON_UPDATABLE_COLUMNS,
};
use crate::model::record::AttributeRecord;
use crate::query::{select_statement, Query, QueryError, COUNT_COLUMN};
use crate::repo::observer::{StatementEvent, StatementKind, StatementOutcome, StoreObserver};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for entity store operations.
#[derive(Debug)]
pub enum StoreError {
    /// A required entity ID was empty.
    EmptyId,
    /// The entity's `id` was changed after it was loaded or created.
    IdChanged,
    /// `list` was called with a count-only specification; use `count`.
    CountOnlyList,
    /// The query specification failed validation.
    Query(QueryError),
    /// The executor failed to run the statement.
    Db(DbError),
    /// Storage returned data the store cannot interpret.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "entity id cannot be empty"),
            Self::IdChanged => write!(f, "entity id cannot change after creation"),
            Self::CountOnlyList => write!(f, "count-only queries must be run through count"),
            Self::Query(err) => write!(f, "invalid query: {err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid stored data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Query(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::EmptyId | Self::IdChanged | Self::CountOnlyList | Self::InvalidData(_) => None,
        }
    }
}

impl From<QueryError> for StoreError {
    fn from(value: QueryError) -> Self {
        Self::Query(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// CRUD contract shared by every entity family.
pub trait Repository<E: Entity> {
    /// Inserts a new entity, assigning an ID when it has none.
    fn create(&self, entity: &mut E) -> StoreResult<()>;
    /// Loads one non-deleted entity; `Ok(None)` when no row matches.
    fn find_by_id(&self, id: &str) -> StoreResult<Option<E>>;
    fn list(&self, query: &Query<E>) -> StoreResult<Vec<E>>;
    fn count(&self, query: &Query<E>) -> StoreResult<i64>;
    /// Persists dirty columns; a clean entity is a successful no-op.
    /// A changed `id` is rejected before any SQL runs.
    fn update(&self, entity: &mut E) -> StoreResult<()>;
    fn soft_delete(&self, entity: &mut E) -> StoreResult<()>;
    /// Soft-deletes by ID; a missing row is a successful no-op.
    fn soft_delete_by_id(&self, id: &str) -> StoreResult<()>;
    fn delete(&self, entity: &E) -> StoreResult<()>;
    fn delete_by_id(&self, id: &str) -> StoreResult<()>;
}

/// Store for one entity type, borrowing its collaborators.
pub struct Store<'a, E: Entity> {
    executor: &'a dyn SqlExecutor,
    clock: &'a dyn Clock,
    ids: &'a dyn IdGenerator,
    observer: &'a dyn StoreObserver,
    _entity: PhantomData<fn() -> E>,
}

impl<'a, E: Entity> Store<'a, E> {
    pub fn new(
        executor: &'a dyn SqlExecutor,
        clock: &'a dyn Clock,
        ids: &'a dyn IdGenerator,
        observer: &'a dyn StoreObserver,
    ) -> Self {
        Self {
            executor,
            clock,
            ids,
            observer,
            _entity: PhantomData,
        }
    }

    /// Table this store reads and writes.
    pub fn table(&self) -> &'static str {
        E::TABLE
    }

    fn write(&self, kind: StatementKind, sql: &str, params: &[SqlValue]) -> StoreResult<usize> {
        let started_at = Instant::now();
        let result = self.executor.execute(sql, params);
        self.report(kind, sql, params.len(), started_at, result.as_ref().map(|rows| *rows));
        Ok(result?)
    }

    fn read(&self, kind: StatementKind, sql: &str, params: &[SqlValue]) -> StoreResult<Vec<SqlRow>> {
        let started_at = Instant::now();
        let result = self.executor.select_rows(sql, params);
        self.report(kind, sql, params.len(), started_at, result.as_ref().map(Vec::len));
        Ok(result?)
    }

    fn report(
        &self,
        kind: StatementKind,
        sql: &str,
        param_count: usize,
        started_at: Instant,
        result: Result<usize, &DbError>,
    ) {
        let outcome = match result {
            Ok(rows) => StatementOutcome::Rows(rows),
            Err(err) => StatementOutcome::Failed(err),
        };
        self.observer.on_statement(&StatementEvent {
            kind,
            table: E::TABLE,
            sql,
            param_count,
            duration: started_at.elapsed(),
            outcome,
        });
    }
}

impl<E: Entity> Repository<E> for Store<'_, E> {
    fn create(&self, entity: &mut E) -> StoreResult<()> {
        let now = self.clock.now_utc();
        let record = entity.record_mut();
        if record.get(COLUMN_ID).is_empty() {
            record.set(COLUMN_ID, self.ids.new_id());
        }
        record.set(COLUMN_CREATED_AT, now.as_str());
        record.set(COLUMN_UPDATED_AT, now.as_str());
        record.set(COLUMN_SOFT_DELETED_AT, NOT_DELETED_SENTINEL);

        let data = entity.data();
        let columns: Vec<&'static str> = E::COLUMNS
            .iter()
            .copied()
            .filter(|column| data.contains_key(*column))
            .collect();
        let params: Vec<SqlValue> = columns
            .iter()
            .map(|column| SqlValue::Text(data[*column].clone()))
            .collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({});",
            E::TABLE,
            columns.join(", "),
            vec!["?"; columns.len()].join(", ")
        );

        self.write(StatementKind::Insert, &sql, &params)?;
        entity.mark_as_not_dirty();
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> StoreResult<Option<E>> {
        if id.is_empty() {
            return Err(StoreError::EmptyId);
        }

        let query = Query::<E>::new().set_id(id).set_limit(1);
        Ok(self.list(&query)?.into_iter().next())
    }

    fn list(&self, query: &Query<E>) -> StoreResult<Vec<E>> {
        if query.count_only() {
            return Err(StoreError::CountOnlyList);
        }

        let statement = select_statement(query)?;
        let rows = self.read(StatementKind::Select, &statement.sql, &statement.params)?;
        Ok(rows
            .into_iter()
            .map(|row| E::from_record(AttributeRecord::from_row(row)))
            .collect())
    }

    fn count(&self, query: &Query<E>) -> StoreResult<i64> {
        let count_query = query.clone().set_count_only(true);
        let statement = select_statement(&count_query)?;
        let rows = self.read(StatementKind::Count, &statement.sql, &statement.params)?;

        let raw = rows
            .first()
            .and_then(|row| row.get(COUNT_COLUMN))
            .ok_or_else(|| StoreError::InvalidData(format!("{} count returned no rows", E::TABLE)))?;
        raw.parse::<i64>().map_err(|_| {
            StoreError::InvalidData(format!("{} count returned `{raw}`", E::TABLE))
        })
    }

    fn update(&self, entity: &mut E) -> StoreResult<()> {
        let id = entity.id();
        if id.is_empty() {
            return Err(StoreError::EmptyId);
        }

        let mut changed = entity.data_changed();
        if changed.contains_key(COLUMN_ID) {
            return Err(StoreError::IdChanged);
        }
        changed.retain(|column, _| {
            E::COLUMNS.contains(&column.as_str()) && !NON_UPDATABLE_COLUMNS.contains(&column.as_str())
        });
        if changed.is_empty() {
            return Ok(());
        }

        let now = self.clock.now_utc();
        entity.record_mut().set(COLUMN_UPDATED_AT, now.as_str());
        changed.insert(COLUMN_UPDATED_AT.to_string(), now);

        let columns: Vec<&'static str> = E::COLUMNS
            .iter()
            .copied()
            .filter(|column| changed.contains_key(*column))
            .collect();
        let mut params: Vec<SqlValue> = columns
            .iter()
            .map(|column| SqlValue::Text(changed[*column].clone()))
            .collect();
        params.push(SqlValue::Text(id));
        let assignments = columns
            .iter()
            .map(|column| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE {} SET {assignments} WHERE {COLUMN_ID} = ?;", E::TABLE);

        self.write(StatementKind::Update, &sql, &params)?;
        entity.mark_as_not_dirty();
        Ok(())
    }

    fn soft_delete(&self, entity: &mut E) -> StoreResult<()> {
        let now = self.clock.now_utc();
        entity.record_mut().set(COLUMN_SOFT_DELETED_AT, now);
        self.update(entity)
    }

    fn soft_delete_by_id(&self, id: &str) -> StoreResult<()> {
        match self.find_by_id(id)? {
            Some(mut entity) => self.soft_delete(&mut entity),
            None => Ok(()),
        }
    }

    fn delete(&self, entity: &E) -> StoreResult<()> {
        self.delete_by_id(&entity.id())
    }

    fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        if id.is_empty() {
            return Err(StoreError::EmptyId);
        }

        let sql = format!("DELETE FROM {} WHERE {COLUMN_ID} = ?;", E::TABLE);
        self.write(StatementKind::Delete, &sql, &[SqlValue::Text(id.to_string())])?;
        Ok(())
    }
}
