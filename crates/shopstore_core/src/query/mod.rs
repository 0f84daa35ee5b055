//! Optional-field query specifications.
//!
//! # Responsibility
//! - Describe filter/sort/pagination/projection requests for one entity.
//! - Validate every present field before it is lowered to SQL.
//!
//! # Invariants
//! - Each field is independently present or absent; a getter returns the
//!   zero value when absent, so callers check `has_*` first.
//! - Lowering only happens on a specification that passed `validate()`.
//! - Soft-deleted rows are excluded unless `with_soft_deleted` is set.

use crate::model::entity::Entity;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

mod filters;
mod lower;

pub use filters::{
    CategoryFilters, DiscountFilters, MediaFilters, OrderFilters, OrderLineItemFilters,
    ProductFilters,
};
pub use lower::{select_statement, Predicates, Statement, COUNT_COLUMN};

pub const SORT_ASC: &str = "asc";
pub const SORT_DESC: &str = "desc";

pub type QueryResult<T> = Result<T, QueryError>;

/// First violation found while validating a query specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A present text filter holds an empty string.
    EmptyValue(&'static str),
    /// A present set filter holds no values.
    EmptySet(&'static str),
    InvalidLimit(i64),
    NegativeOffset(i64),
    UnknownColumn {
        field: &'static str,
        column: String,
    },
    InvalidSortDirection(String),
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyValue(field) => write!(f, "{field} filter cannot be empty"),
            Self::EmptySet(field) => write!(f, "{field} filter needs at least one value"),
            Self::InvalidLimit(limit) => write!(f, "limit must be greater than 0, got {limit}"),
            Self::NegativeOffset(offset) => {
                write!(f, "offset cannot be negative, got {offset}")
            }
            Self::UnknownColumn { field, column } => {
                write!(f, "{field} references unknown column `{column}`")
            }
            Self::InvalidSortDirection(value) => {
                write!(f, "sort direction must be `asc` or `desc`, got `{value}`")
            }
        }
    }
}

impl Error for QueryError {}

/// Entity-specific filter set carried by `Query<E>`.
pub trait EntityFilters: Clone + Debug + Default + PartialEq {
    /// Checks every present filter; first violation wins.
    fn validate(&self) -> QueryResult<()>;

    /// Appends this filter set's predicates.
    fn apply(&self, predicates: &mut Predicates);
}

/// Filter/sort/pagination descriptor for listing or counting one entity.
pub struct Query<E: Entity> {
    id: Option<String>,
    id_in: Option<Vec<String>>,
    status: Option<String>,
    status_in: Option<Vec<String>>,
    created_at_gte: Option<String>,
    created_at_lte: Option<String>,
    limit: Option<i64>,
    offset: Option<i64>,
    order_by: Option<String>,
    sort_direction: Option<String>,
    count_only: Option<bool>,
    with_soft_deleted: Option<bool>,
    columns: Option<Vec<String>>,
    filters: E::Filters,
}

impl<E: Entity> Query<E> {
    /// Empty specification: every field absent.
    pub fn new() -> Self {
        Self {
            id: None,
            id_in: None,
            status: None,
            status_in: None,
            created_at_gte: None,
            created_at_lte: None,
            limit: None,
            offset: None,
            order_by: None,
            sort_direction: None,
            count_only: None,
            with_soft_deleted: None,
            columns: None,
            filters: E::Filters::default(),
        }
    }

    pub fn has_id(&self) -> bool {
        self.id.is_some()
    }

    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    pub fn set_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn has_id_in(&self) -> bool {
        self.id_in.is_some()
    }

    pub fn id_in(&self) -> &[String] {
        self.id_in.as_deref().unwrap_or_default()
    }

    pub fn set_id_in<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.id_in = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn has_status(&self) -> bool {
        self.status.is_some()
    }

    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or_default()
    }

    pub fn set_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn has_status_in(&self) -> bool {
        self.status_in.is_some()
    }

    pub fn status_in(&self) -> &[String] {
        self.status_in.as_deref().unwrap_or_default()
    }

    pub fn set_status_in<I, S>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.status_in = Some(statuses.into_iter().map(Into::into).collect());
        self
    }

    pub fn has_created_at_gte(&self) -> bool {
        self.created_at_gte.is_some()
    }

    pub fn created_at_gte(&self) -> &str {
        self.created_at_gte.as_deref().unwrap_or_default()
    }

    /// Inclusive lower bound on `created_at`.
    pub fn set_created_at_gte(mut self, created_at: impl Into<String>) -> Self {
        self.created_at_gte = Some(created_at.into());
        self
    }

    pub fn has_created_at_lte(&self) -> bool {
        self.created_at_lte.is_some()
    }

    pub fn created_at_lte(&self) -> &str {
        self.created_at_lte.as_deref().unwrap_or_default()
    }

    /// Inclusive upper bound on `created_at`.
    pub fn set_created_at_lte(mut self, created_at: impl Into<String>) -> Self {
        self.created_at_lte = Some(created_at.into());
        self
    }

    pub fn has_limit(&self) -> bool {
        self.limit.is_some()
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or_default()
    }

    pub fn set_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn has_offset(&self) -> bool {
        self.offset.is_some()
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or_default()
    }

    pub fn set_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn has_order_by(&self) -> bool {
        self.order_by.is_some()
    }

    pub fn order_by(&self) -> &str {
        self.order_by.as_deref().unwrap_or_default()
    }

    pub fn set_order_by(mut self, column: impl Into<String>) -> Self {
        self.order_by = Some(column.into());
        self
    }

    pub fn has_sort_direction(&self) -> bool {
        self.sort_direction.is_some()
    }

    pub fn sort_direction(&self) -> &str {
        self.sort_direction.as_deref().unwrap_or_default()
    }

    /// `asc` or `desc` (case-insensitive).
    pub fn set_sort_direction(mut self, direction: impl Into<String>) -> Self {
        self.sort_direction = Some(direction.into());
        self
    }

    pub fn has_count_only(&self) -> bool {
        self.count_only.is_some()
    }

    pub fn count_only(&self) -> bool {
        self.count_only.unwrap_or_default()
    }

    pub fn set_count_only(mut self, count_only: bool) -> Self {
        self.count_only = Some(count_only);
        self
    }

    pub fn has_with_soft_deleted(&self) -> bool {
        self.with_soft_deleted.is_some()
    }

    /// Whether soft-deleted rows are included. Defaults to `false`.
    pub fn with_soft_deleted(&self) -> bool {
        self.with_soft_deleted.unwrap_or_default()
    }

    pub fn set_with_soft_deleted(mut self, with_soft_deleted: bool) -> Self {
        self.with_soft_deleted = Some(with_soft_deleted);
        self
    }

    pub fn has_columns(&self) -> bool {
        self.columns.is_some()
    }

    /// Requested projection in order; empty means all columns.
    pub fn columns(&self) -> &[String] {
        self.columns.as_deref().unwrap_or_default()
    }

    pub fn set_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Entity-specific filters.
    pub fn filters(&self) -> &E::Filters {
        &self.filters
    }

    /// Checks every present field against its invariant.
    ///
    /// Returns the first violation; fields are checked shared-first, then
    /// the entity-specific filters.
    pub fn validate(&self) -> QueryResult<()> {
        require_non_empty("id", self.id.as_deref())?;
        require_non_empty_set("id_in", self.id_in.as_deref())?;
        require_non_empty("status", self.status.as_deref())?;
        require_non_empty_set("status_in", self.status_in.as_deref())?;
        require_non_empty("created_at_gte", self.created_at_gte.as_deref())?;
        require_non_empty("created_at_lte", self.created_at_lte.as_deref())?;

        if let Some(limit) = self.limit {
            if limit <= 0 {
                return Err(QueryError::InvalidLimit(limit));
            }
        }
        if let Some(offset) = self.offset {
            if offset < 0 {
                return Err(QueryError::NegativeOffset(offset));
            }
        }

        if let Some(order_by) = self.order_by.as_deref() {
            if order_by.is_empty() {
                return Err(QueryError::EmptyValue("order_by"));
            }
            known_column::<E>("order_by", order_by)?;
        }
        if let Some(direction) = self.sort_direction.as_deref() {
            if direction.is_empty() {
                return Err(QueryError::EmptyValue("sort_direction"));
            }
            if !is_sort_direction(direction) {
                return Err(QueryError::InvalidSortDirection(direction.to_string()));
            }
        }
        for column in self.columns() {
            known_column::<E>("columns", column)?;
        }

        self.filters.validate()
    }
}

impl<E: Entity> Default for Query<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Clone for Query<E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            id_in: self.id_in.clone(),
            status: self.status.clone(),
            status_in: self.status_in.clone(),
            created_at_gte: self.created_at_gte.clone(),
            created_at_lte: self.created_at_lte.clone(),
            limit: self.limit,
            offset: self.offset,
            order_by: self.order_by.clone(),
            sort_direction: self.sort_direction.clone(),
            count_only: self.count_only,
            with_soft_deleted: self.with_soft_deleted,
            columns: self.columns.clone(),
            filters: self.filters.clone(),
        }
    }
}

impl<E: Entity> Debug for Query<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Query")
            .field("table", &E::TABLE)
            .field("id", &self.id)
            .field("id_in", &self.id_in)
            .field("status", &self.status)
            .field("status_in", &self.status_in)
            .field("created_at_gte", &self.created_at_gte)
            .field("created_at_lte", &self.created_at_lte)
            .field("limit", &self.limit)
            .field("offset", &self.offset)
            .field("order_by", &self.order_by)
            .field("sort_direction", &self.sort_direction)
            .field("count_only", &self.count_only)
            .field("with_soft_deleted", &self.with_soft_deleted)
            .field("columns", &self.columns)
            .field("filters", &self.filters)
            .finish()
    }
}

impl<E: Entity> PartialEq for Query<E> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.id_in == other.id_in
            && self.status == other.status
            && self.status_in == other.status_in
            && self.created_at_gte == other.created_at_gte
            && self.created_at_lte == other.created_at_lte
            && self.limit == other.limit
            && self.offset == other.offset
            && self.order_by == other.order_by
            && self.sort_direction == other.sort_direction
            && self.count_only == other.count_only
            && self.with_soft_deleted == other.with_soft_deleted
            && self.columns == other.columns
            && self.filters == other.filters
    }
}

pub(crate) fn require_non_empty(field: &'static str, value: Option<&str>) -> QueryResult<()> {
    match value {
        Some(value) if value.is_empty() => Err(QueryError::EmptyValue(field)),
        _ => Ok(()),
    }
}

pub(crate) fn require_non_empty_set(
    field: &'static str,
    values: Option<&[String]>,
) -> QueryResult<()> {
    match values {
        Some([]) => Err(QueryError::EmptySet(field)),
        Some(values) if values.iter().any(String::is_empty) => Err(QueryError::EmptyValue(field)),
        _ => Ok(()),
    }
}

/// Resolves a caller-supplied column name to the entity's static name.
pub(crate) fn known_column<E: Entity>(
    field: &'static str,
    column: &str,
) -> QueryResult<&'static str> {
    E::COLUMNS
        .iter()
        .copied()
        .find(|known| *known == column)
        .ok_or_else(|| QueryError::UnknownColumn {
            field,
            column: column.to_string(),
        })
}

fn is_sort_direction(value: &str) -> bool {
    value.eq_ignore_ascii_case(SORT_ASC) || value.eq_ignore_ascii_case(SORT_DESC)
}

#[cfg(test)]
mod tests {
    use super::{Query, QueryError};
    use crate::model::product::Product;

    #[test]
    fn absent_fields_read_as_zero_values() {
        let query = Query::<Product>::new();

        assert!(!query.has_id());
        assert_eq!(query.id(), "");
        assert!(!query.has_limit());
        assert_eq!(query.limit(), 0);
        assert!(!query.with_soft_deleted());
        assert!(query.columns().is_empty());
        assert!(query.validate().is_ok());
    }

    #[test]
    fn present_empty_id_is_distinguishable_from_absent() {
        let query = Query::<Product>::new().set_id("");

        assert!(query.has_id());
        assert_eq!(query.id(), "");
        assert_eq!(query.validate(), Err(QueryError::EmptyValue("id")));
    }

    #[test]
    fn first_violation_is_reported() {
        let query = Query::<Product>::new()
            .set_status("")
            .set_limit(0)
            .set_offset(-1);

        assert_eq!(query.validate(), Err(QueryError::EmptyValue("status")));
    }

    #[test]
    fn pagination_bounds_are_checked() {
        assert_eq!(
            Query::<Product>::new().set_limit(0).validate(),
            Err(QueryError::InvalidLimit(0))
        );
        assert_eq!(
            Query::<Product>::new().set_offset(-5).validate(),
            Err(QueryError::NegativeOffset(-5))
        );
        assert!(Query::<Product>::new()
            .set_limit(1)
            .set_offset(0)
            .validate()
            .is_ok());
    }

    #[test]
    fn empty_sets_are_rejected() {
        let ids: Vec<String> = Vec::new();
        assert_eq!(
            Query::<Product>::new().set_id_in(ids).validate(),
            Err(QueryError::EmptySet("id_in"))
        );
        assert_eq!(
            Query::<Product>::new().set_status_in(["active", ""]).validate(),
            Err(QueryError::EmptyValue("status_in"))
        );
    }

    #[test]
    fn order_by_and_sort_direction_are_checked() {
        assert_eq!(
            Query::<Product>::new().set_order_by("").validate(),
            Err(QueryError::EmptyValue("order_by"))
        );
        assert_eq!(
            Query::<Product>::new()
                .set_order_by("price; DROP TABLE shop_product")
                .validate(),
            Err(QueryError::UnknownColumn {
                field: "order_by",
                column: "price; DROP TABLE shop_product".to_string(),
            })
        );
        assert_eq!(
            Query::<Product>::new().set_sort_direction("").validate(),
            Err(QueryError::EmptyValue("sort_direction"))
        );
        assert_eq!(
            Query::<Product>::new().set_sort_direction("up").validate(),
            Err(QueryError::InvalidSortDirection("up".to_string()))
        );
        assert!(Query::<Product>::new()
            .set_order_by("price")
            .set_sort_direction("ASC")
            .validate()
            .is_ok());
    }

    #[test]
    fn projection_must_name_known_columns() {
        let query = Query::<Product>::new().set_columns(["id", "colour"]);
        assert_eq!(
            query.validate(),
            Err(QueryError::UnknownColumn {
                field: "columns",
                column: "colour".to_string(),
            })
        );

        let empty: Vec<String> = Vec::new();
        let all = Query::<Product>::new().set_columns(empty);
        assert!(all.has_columns());
        assert!(all.validate().is_ok());
    }

    #[test]
    fn clone_keeps_every_field() {
        let query = Query::<Product>::new()
            .set_status("active")
            .set_limit(10)
            .set_title_like("shirt");
        let counted = query.clone().set_count_only(true);

        assert!(!query.count_only());
        assert!(counted.count_only());
        assert_eq!(counted.title_like(), "shirt");
        assert_eq!(query, query.clone());
    }
}
