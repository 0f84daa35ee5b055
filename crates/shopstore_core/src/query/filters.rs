//! Entity-specific filter sets and their `Query<E>` accessors.

use super::{require_non_empty, EntityFilters, Predicates, Query, QueryResult};
use crate::model::category::Category;
use crate::model::discount::Discount;
use crate::model::entity::{
    COLUMN_CODE, COLUMN_CUSTOMER_ID, COLUMN_ENTITY_ID, COLUMN_ORDER_ID, COLUMN_PARENT_ID,
    COLUMN_PRODUCT_ID, COLUMN_TITLE, COLUMN_TYPE,
};
use crate::model::media::Media;
use crate::model::order::Order;
use crate::model::order_line_item::OrderLineItem;
use crate::model::product::Product;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscountFilters {
    code: Option<String>,
}

impl EntityFilters for DiscountFilters {
    fn validate(&self) -> QueryResult<()> {
        require_non_empty("code", self.code.as_deref())
    }

    fn apply(&self, predicates: &mut Predicates) {
        if let Some(code) = self.code.as_deref() {
            predicates.equals(COLUMN_CODE, code);
        }
    }
}

impl Query<Discount> {
    pub fn has_code(&self) -> bool {
        self.filters.code.is_some()
    }

    pub fn code(&self) -> &str {
        self.filters.code.as_deref().unwrap_or_default()
    }

    pub fn set_code(mut self, code: impl Into<String>) -> Self {
        self.filters.code = Some(code.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilters {
    customer_id: Option<String>,
}

impl EntityFilters for OrderFilters {
    fn validate(&self) -> QueryResult<()> {
        require_non_empty("customer_id", self.customer_id.as_deref())
    }

    fn apply(&self, predicates: &mut Predicates) {
        if let Some(customer_id) = self.customer_id.as_deref() {
            predicates.equals(COLUMN_CUSTOMER_ID, customer_id);
        }
    }
}

impl Query<Order> {
    pub fn has_customer_id(&self) -> bool {
        self.filters.customer_id.is_some()
    }

    pub fn customer_id(&self) -> &str {
        self.filters.customer_id.as_deref().unwrap_or_default()
    }

    pub fn set_customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.filters.customer_id = Some(customer_id.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderLineItemFilters {
    order_id: Option<String>,
    product_id: Option<String>,
}

impl EntityFilters for OrderLineItemFilters {
    fn validate(&self) -> QueryResult<()> {
        require_non_empty("order_id", self.order_id.as_deref())?;
        require_non_empty("product_id", self.product_id.as_deref())
    }

    fn apply(&self, predicates: &mut Predicates) {
        if let Some(order_id) = self.order_id.as_deref() {
            predicates.equals(COLUMN_ORDER_ID, order_id);
        }
        if let Some(product_id) = self.product_id.as_deref() {
            predicates.equals(COLUMN_PRODUCT_ID, product_id);
        }
    }
}

impl Query<OrderLineItem> {
    pub fn has_order_id(&self) -> bool {
        self.filters.order_id.is_some()
    }

    pub fn order_id(&self) -> &str {
        self.filters.order_id.as_deref().unwrap_or_default()
    }

    pub fn set_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.filters.order_id = Some(order_id.into());
        self
    }

    pub fn has_product_id(&self) -> bool {
        self.filters.product_id.is_some()
    }

    pub fn product_id(&self) -> &str {
        self.filters.product_id.as_deref().unwrap_or_default()
    }

    pub fn set_product_id(mut self, product_id: impl Into<String>) -> Self {
        self.filters.product_id = Some(product_id.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilters {
    title_like: Option<String>,
}

impl EntityFilters for ProductFilters {
    fn validate(&self) -> QueryResult<()> {
        require_non_empty("title_like", self.title_like.as_deref())
    }

    fn apply(&self, predicates: &mut Predicates) {
        if let Some(title) = self.title_like.as_deref() {
            predicates.contains(COLUMN_TITLE, title);
        }
    }
}

impl Query<Product> {
    pub fn has_title_like(&self) -> bool {
        self.filters.title_like.is_some()
    }

    pub fn title_like(&self) -> &str {
        self.filters.title_like.as_deref().unwrap_or_default()
    }

    /// Substring match on `title`; `%` and `_` are matched literally.
    pub fn set_title_like(mut self, title: impl Into<String>) -> Self {
        self.filters.title_like = Some(title.into());
        self
    }
}

/// Category filters. A present empty `parent_id` selects root categories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilters {
    parent_id: Option<String>,
    title_like: Option<String>,
}

impl EntityFilters for CategoryFilters {
    fn validate(&self) -> QueryResult<()> {
        require_non_empty("title_like", self.title_like.as_deref())
    }

    fn apply(&self, predicates: &mut Predicates) {
        if let Some(parent_id) = self.parent_id.as_deref() {
            predicates.equals(COLUMN_PARENT_ID, parent_id);
        }
        if let Some(title) = self.title_like.as_deref() {
            predicates.contains(COLUMN_TITLE, title);
        }
    }
}

impl Query<Category> {
    pub fn has_parent_id(&self) -> bool {
        self.filters.parent_id.is_some()
    }

    pub fn parent_id(&self) -> &str {
        self.filters.parent_id.as_deref().unwrap_or_default()
    }

    pub fn set_parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.filters.parent_id = Some(parent_id.into());
        self
    }

    pub fn has_title_like(&self) -> bool {
        self.filters.title_like.is_some()
    }

    pub fn title_like(&self) -> &str {
        self.filters.title_like.as_deref().unwrap_or_default()
    }

    pub fn set_title_like(mut self, title: impl Into<String>) -> Self {
        self.filters.title_like = Some(title.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaFilters {
    entity_id: Option<String>,
    media_type: Option<String>,
}

impl EntityFilters for MediaFilters {
    fn validate(&self) -> QueryResult<()> {
        require_non_empty("entity_id", self.entity_id.as_deref())?;
        require_non_empty("media_type", self.media_type.as_deref())
    }

    fn apply(&self, predicates: &mut Predicates) {
        if let Some(entity_id) = self.entity_id.as_deref() {
            predicates.equals(COLUMN_ENTITY_ID, entity_id);
        }
        if let Some(media_type) = self.media_type.as_deref() {
            predicates.equals(COLUMN_TYPE, media_type);
        }
    }
}

impl Query<Media> {
    pub fn has_entity_id(&self) -> bool {
        self.filters.entity_id.is_some()
    }

    pub fn entity_id(&self) -> &str {
        self.filters.entity_id.as_deref().unwrap_or_default()
    }

    pub fn set_entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.filters.entity_id = Some(entity_id.into());
        self
    }

    pub fn has_media_type(&self) -> bool {
        self.filters.media_type.is_some()
    }

    pub fn media_type(&self) -> &str {
        self.filters.media_type.as_deref().unwrap_or_default()
    }

    pub fn set_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.filters.media_type = Some(media_type.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::model::category::Category;
    use crate::model::media::Media;
    use crate::model::order_line_item::OrderLineItem;
    use crate::query::{Query, QueryError};

    #[test]
    fn category_accepts_empty_parent_id_as_root_filter() {
        let query = Query::<Category>::new().set_parent_id("");

        assert!(query.has_parent_id());
        assert_eq!(query.parent_id(), "");
        assert!(query.validate().is_ok());
    }

    #[test]
    fn entity_filters_are_validated_after_shared_fields() {
        let query = Query::<OrderLineItem>::new().set_order_id("o-1").set_product_id("");
        assert_eq!(query.validate(), Err(QueryError::EmptyValue("product_id")));

        let query = Query::<OrderLineItem>::new().set_limit(-1).set_product_id("");
        assert_eq!(query.validate(), Err(QueryError::InvalidLimit(-1)));
    }

    #[test]
    fn media_filters_round_trip_through_accessors() {
        let query = Query::<Media>::new()
            .set_entity_id("p-1")
            .set_media_type("image/png");

        assert!(query.has_entity_id());
        assert_eq!(query.entity_id(), "p-1");
        assert_eq!(query.media_type(), "image/png");
        assert!(query.validate().is_ok());
    }
}
