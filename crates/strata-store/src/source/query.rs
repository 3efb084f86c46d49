//! Query descriptor types.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::StoreError;
use strata_core::{Collection, FieldValue};

/// Comparison operator for range filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeOp {
    /// Strictly less than.
    Lt,
    /// Less than or equal.
    Le,
    /// Strictly greater than.
    Gt,
    /// Greater than or equal.
    Ge,
}

impl RangeOp {
    /// Parses an operator string, rejecting unsupported operators.
    ///
    /// # Example
    ///
    /// ```
    /// use strata_store::RangeOp;
    ///
    /// assert_eq!(RangeOp::parse("<=").unwrap(), RangeOp::Le);
    /// assert!(RangeOp::parse("!=").is_err());
    /// ```
    pub fn parse(op: &str) -> Result<Self, StoreError> {
        match op {
            "<" => Ok(Self::Lt),
            "<=" => Ok(Self::Le),
            ">" => Ok(Self::Gt),
            ">=" => Ok(Self::Ge),
            other => Err(StoreError::invalid_query(format!(
                "unsupported operator '{}'",
                other
            ))),
        }
    }

    /// Returns the operator as its textual form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }

    /// Returns true if the given ordering between a field value and the
    /// filter value satisfies this operator.
    pub fn accepts(&self, ord: Ordering) -> bool {
        match self {
            Self::Lt => ord == Ordering::Less,
            Self::Le => ord != Ordering::Greater,
            Self::Gt => ord == Ordering::Greater,
            Self::Ge => ord != Ordering::Less,
        }
    }
}

/// A single filter clause of a query.
///
/// Filters are a closed set of variants so that unsupported operators are
/// rejected when the descriptor is built, not when the backend call runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterClause {
    /// Field equals value.
    Equals { field: String, value: FieldValue },
    /// Field compares against value with a range operator.
    Range {
        field: String,
        op: RangeOp,
        value: FieldValue,
    },
}

impl FilterClause {
    /// Creates an equality filter.
    pub fn equals(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates a range filter.
    pub fn range(field: impl Into<String>, op: RangeOp, value: impl Into<FieldValue>) -> Self {
        Self::Range {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Builds a filter from an operator string, e.g. coming from a
    /// request payload.
    ///
    /// # Example
    ///
    /// ```
    /// use strata_store::FilterClause;
    ///
    /// let f = FilterClause::parse("stock", ">", 0).unwrap();
    /// assert_eq!(f.field(), "stock");
    /// assert!(FilterClause::parse("tags", "array-contains", "sale").is_err());
    /// ```
    pub fn parse(
        field: impl Into<String>,
        op: &str,
        value: impl Into<FieldValue>,
    ) -> Result<Self, StoreError> {
        match op {
            "==" | "=" => Ok(Self::equals(field, value)),
            other => Ok(Self::range(field, RangeOp::parse(other)?, value)),
        }
    }

    /// Returns the field path this clause applies to.
    pub fn field(&self) -> &str {
        match self {
            Self::Equals { field, .. } | Self::Range { field, .. } => field,
        }
    }

    /// Returns the filter value.
    pub fn value(&self) -> &FieldValue {
        match self {
            Self::Equals { value, .. } | Self::Range { value, .. } => value,
        }
    }

    /// Evaluates this clause against a field value looked up from a
    /// document. A missing field never matches.
    pub fn matches(&self, actual: Option<&FieldValue>) -> bool {
        let Some(actual) = actual else {
            return false;
        };

        match self {
            Self::Equals { value, .. } => {
                // compare() handles cross-numeric equality; Eq covers
                // non-scalar values where compare() abstains.
                actual.compare(value) == Some(Ordering::Equal) || actual == value
            },
            Self::Range { op, value, .. } => actual
                .compare(value)
                .map(|ord| op.accepts(ord))
                .unwrap_or(false),
        }
    }
}

impl fmt::Display for FilterClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Self::Equals { .. } => "==",
            Self::Range { op, .. } => op.as_str(),
        };
        match serde_json::to_string(self.value()) {
            Ok(v) => write!(f, "{}{}{}", self.field(), op, v),
            Err(_) => write!(f, "{}{}<?>", self.field(), op),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    /// Returns the direction as its textual form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Ordering clause of a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderBy {
    field: String,
    direction: Direction,
}

impl OrderBy {
    /// Creates an ascending ordering on the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    /// Creates a descending ordering on the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }

    /// Returns the field being ordered on.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the sort direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.field, self.direction.as_str())
    }
}

/// Opaque pagination token.
///
/// The token is assigned by the backend (the identity of the last record
/// of the previous page) and must not be interpreted by callers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Creates a cursor from a backend-assigned token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A declarative query against one collection.
///
/// Descriptors are immutable once built and are the unit the cache layer
/// derives its keys from: two descriptors that are equal always execute
/// the same backend query.
///
/// # Example
///
/// ```
/// use strata_store::{FilterClause, OrderBy, QueryDescriptor};
///
/// let query = QueryDescriptor::new("products")
///     .with_filter(FilterClause::equals("featured", true))
///     .with_order(OrderBy::desc("price"))
///     .with_page_size(20);
///
/// assert_eq!(query.collection().as_str(), "products");
/// assert!(query.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    /// The collection to query.
    collection: Collection,

    /// Filter clauses, applied in order.
    filters: Vec<FilterClause>,

    /// Optional ordering.
    order_by: Option<OrderBy>,

    /// Page size. None means use the executor's default.
    page_size: Option<usize>,

    /// Continuation cursor from a previous page, if any.
    cursor: Option<Cursor>,
}

impl QueryDescriptor {
    /// Creates a new descriptor for the given collection.
    pub fn new(collection: impl Into<Collection>) -> Self {
        Self {
            collection: collection.into(),
            filters: Vec::new(),
            order_by: None,
            page_size: None,
            cursor: None,
        }
    }

    /// Adds a filter clause.
    pub fn with_filter(mut self, filter: FilterClause) -> Self {
        self.filters.push(filter);
        self
    }

    /// Sets the ordering.
    pub fn with_order(mut self, order: OrderBy) -> Self {
        self.order_by = Some(order);
        self
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Sets the continuation cursor.
    pub fn with_cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Returns the collection.
    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Returns the filter clauses.
    pub fn filters(&self) -> &[FilterClause] {
        &self.filters
    }

    /// Returns the ordering, if any.
    pub fn order_by(&self) -> Option<&OrderBy> {
        self.order_by.as_ref()
    }

    /// Returns the page size, if set.
    pub fn page_size(&self) -> Option<usize> {
        self.page_size
    }

    /// Returns the cursor, if any.
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    /// Returns the effective page size, using the provided default when
    /// none is set.
    pub fn effective_page_size(&self, default: usize) -> usize {
        self.page_size.unwrap_or(default)
    }

    /// Validates the descriptor.
    ///
    /// # Errors
    ///
    /// `StoreError::InvalidQuery` when the collection name is empty or the
    /// page size is zero.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.collection.as_str().is_empty() {
            return Err(StoreError::invalid_query("collection name cannot be empty"));
        }
        if self.page_size == Some(0) {
            return Err(StoreError::invalid_query("page size must be positive"));
        }
        Ok(())
    }
}

impl fmt::Display for QueryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.collection)?;
        if !self.filters.is_empty() {
            let rendered: Vec<String> = self.filters.iter().map(|c| c.to_string()).collect();
            write!(f, "[{}]", rendered.join(","))?;
        }
        if let Some(order) = &self.order_by {
            write!(f, "/{}", order)?;
        }
        if let Some(size) = self.page_size {
            write!(f, "/n{}", size)?;
        }
        if let Some(cursor) = &self.cursor {
            write!(f, "/after:{}", cursor)?;
        }
        Ok(())
    }
}
