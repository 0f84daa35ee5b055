//! Time and identity collaborators injected into stores.
//!
//! # Invariants
//! - Timestamps are UTC and formatted as `DATETIME_FORMAT`, so text
//!   comparison orders them chronologically.
//! - Generated IDs are never reused.

use chrono::{NaiveDateTime, Utc};
use std::cell::Cell;
use uuid::Uuid;

/// Text layout of every persisted timestamp.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Soft-delete marker value meaning "not deleted".
pub const NOT_DELETED_SENTINEL: &str = "9999-12-31 23:59:59";

/// Source of the current UTC time as formatted text.
pub trait Clock {
    fn now_utc(&self) -> String;
}

/// Wall clock backed by `chrono::Utc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> String {
        Utc::now().format(DATETIME_FORMAT).to_string()
    }
}

/// Deterministic clock that advances one second per reading.
///
/// Useful for tests and imports that need stable, strictly increasing stamps.
#[derive(Debug)]
pub struct SteppingClock {
    next: Cell<NaiveDateTime>,
}

impl SteppingClock {
    /// Starts at `start` (formatted as [`DATETIME_FORMAT`]).
    ///
    /// Returns `None` when `start` cannot be parsed.
    pub fn starting_at(start: &str) -> Option<Self> {
        let parsed = NaiveDateTime::parse_from_str(start, DATETIME_FORMAT).ok()?;
        Some(Self {
            next: Cell::new(parsed),
        })
    }
}

impl Clock for SteppingClock {
    fn now_utc(&self) -> String {
        let current = self.next.get();
        self.next.set(current + chrono::Duration::seconds(1));
        current.format(DATETIME_FORMAT).to_string()
    }
}

/// Source of new opaque entity identifiers.
pub trait IdGenerator {
    fn new_id(&self) -> String;
}

/// Random v4 UUID identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, IdGenerator, SteppingClock, SystemClock, UuidGenerator, NOT_DELETED_SENTINEL};

    #[test]
    fn system_clock_uses_fixed_width_format() {
        let now = SystemClock.now_utc();
        assert_eq!(now.len(), "2024-01-01 00:00:00".len());
        assert!(now.as_str() < NOT_DELETED_SENTINEL);
    }

    #[test]
    fn stepping_clock_advances_one_second_per_reading() {
        let clock = SteppingClock::starting_at("2024-03-01 23:59:59").unwrap();
        assert_eq!(clock.now_utc(), "2024-03-01 23:59:59");
        assert_eq!(clock.now_utc(), "2024-03-02 00:00:00");
    }

    #[test]
    fn stepping_clock_rejects_malformed_start() {
        assert!(SteppingClock::starting_at("yesterday").is_none());
    }

    #[test]
    fn uuid_generator_yields_distinct_ids() {
        let first = UuidGenerator.new_id();
        let second = UuidGenerator.new_id();
        assert!(!first.is_empty());
        assert_ne!(first, second);
    }
}
