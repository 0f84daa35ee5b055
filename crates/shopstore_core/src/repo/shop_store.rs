//! Facade owning the collaborators shared by all entity stores.

use crate::clock::{Clock, IdGenerator, SystemClock, UuidGenerator};
use crate::db::SqlExecutor;
use crate::model::category::Category;
use crate::model::discount::Discount;
use crate::model::entity::Entity;
use crate::model::media::Media;
use crate::model::order::Order;
use crate::model::order_line_item::OrderLineItem;
use crate::model::product::Product;
use crate::repo::entity_store::Store;
use crate::repo::observer::{LogObserver, StoreObserver};

/// Entry point handing out one [`Store`] per entity family.
///
/// Defaults to the system clock, UUID identifiers and a logging observer;
/// each can be replaced with the `with_*` builders.
pub struct ShopStore<'conn> {
    executor: &'conn dyn SqlExecutor,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    observer: Box<dyn StoreObserver>,
}

impl<'conn> ShopStore<'conn> {
    pub fn new(executor: &'conn dyn SqlExecutor) -> Self {
        Self {
            executor,
            clock: Box::new(SystemClock),
            ids: Box::new(UuidGenerator),
            observer: Box::new(LogObserver),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_observer(mut self, observer: impl StoreObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Store for any entity type.
    pub fn store<E: Entity>(&self) -> Store<'_, E> {
        Store::new(
            self.executor,
            self.clock.as_ref(),
            self.ids.as_ref(),
            self.observer.as_ref(),
        )
    }

    pub fn discounts(&self) -> Store<'_, Discount> {
        self.store()
    }

    pub fn orders(&self) -> Store<'_, Order> {
        self.store()
    }

    pub fn order_line_items(&self) -> Store<'_, OrderLineItem> {
        self.store()
    }

    pub fn products(&self) -> Store<'_, Product> {
        self.store()
    }

    pub fn categories(&self) -> Store<'_, Category> {
        self.store()
    }

    pub fn media(&self) -> Store<'_, Media> {
        self.store()
    }
}
