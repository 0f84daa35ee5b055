//! Entity stores over the SQL executor.
//!
//! # Responsibility
//! - Define the CRUD contract shared by every entity family.
//! - Isolate SQL statement execution from entity and query types.
//!
//! # Invariants
//! - Stores never retry; executor errors propagate as `StoreError::Db`.
//! - Every executed statement is reported to the injected observer.

pub mod entity_store;
pub mod observer;
pub mod shop_store;
