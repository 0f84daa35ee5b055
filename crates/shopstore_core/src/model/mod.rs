//! Shop domain model.
//!
//! # Responsibility
//! - Define the attribute record every entity is built on.
//! - Define the six entity types as typed views over that record.
//!
//! # Invariants
//! - Every entity is identified by a stable, opaque string `id`.
//! - Deletion is a soft-delete timestamp unless a store deletes physically.

pub mod category;
pub mod discount;
pub mod entity;
pub mod media;
pub mod order;
pub mod order_line_item;
pub mod product;
pub mod record;
