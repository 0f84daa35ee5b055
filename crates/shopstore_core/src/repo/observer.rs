//! Statement observers injected into stores.
//!
//! Stores report every statement they hand to the executor; what happens
//! with the report (logging, counting, nothing) is the observer's choice.

use crate::db::DbError;
use log::{debug, error, trace};
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Kind of statement a store issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Insert,
    Select,
    Count,
    Update,
    Delete,
}

impl StatementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Select => "select",
            Self::Count => "count",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl Display for StatementKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one executed statement.
#[derive(Debug, Clone, Copy)]
pub enum StatementOutcome<'a> {
    /// Affected rows for writes, returned rows for reads.
    Rows(usize),
    Failed(&'a DbError),
}

/// One statement report.
#[derive(Debug, Clone, Copy)]
pub struct StatementEvent<'a> {
    pub kind: StatementKind,
    pub table: &'a str,
    pub sql: &'a str,
    pub param_count: usize,
    pub duration: Duration,
    pub outcome: StatementOutcome<'a>,
}

/// Receives a report after every statement a store runs.
pub trait StoreObserver {
    fn on_statement(&self, event: &StatementEvent<'_>);
}

/// Writes statement reports through the `log` facade.
///
/// Successful statements log at `debug`, failures at `error`, SQL text at
/// `trace`. Bind values are never logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl StoreObserver for LogObserver {
    fn on_statement(&self, event: &StatementEvent<'_>) {
        trace!(
            "event=store_sql module=store op={} table={} sql={}",
            event.kind,
            event.table,
            event.sql
        );
        match event.outcome {
            StatementOutcome::Rows(rows) => debug!(
                "event=store_statement module=store status=ok op={} table={} rows={} params={} duration_ms={}",
                event.kind,
                event.table,
                rows,
                event.param_count,
                event.duration.as_millis()
            ),
            StatementOutcome::Failed(err) => error!(
                "event=store_statement module=store status=error op={} table={} params={} duration_ms={} error={}",
                event.kind,
                event.table,
                event.param_count,
                event.duration.as_millis(),
                err
            ),
        }
    }
}

/// Discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StoreObserver for NoopObserver {
    fn on_statement(&self, _event: &StatementEvent<'_>) {}
}
