//! Persistence core for the shop entities.
//! Typed CRUD, soft deletion and filtered listing over SQLite.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;

pub use clock::{Clock, IdGenerator, SteppingClock, SystemClock, UuidGenerator};
pub use config::{ConfigError, CoreConfig, DatabaseLocation};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{Category, CategoryStatus};
pub use model::discount::{Discount, DiscountStatus, DiscountType};
pub use model::entity::Entity;
pub use model::media::{Media, MediaStatus};
pub use model::order::{Order, OrderStatus};
pub use model::order_line_item::{OrderLineItem, OrderLineItemStatus};
pub use model::product::{Product, ProductStatus};
pub use model::record::{AttributeRecord, Attributes, Metas};
pub use query::{Query, QueryError, QueryResult};
pub use repo::entity_store::{Repository, Store, StoreError, StoreResult};
pub use repo::observer::{LogObserver, NoopObserver, StatementEvent, StoreObserver};
pub use repo::shop_store::ShopStore;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
