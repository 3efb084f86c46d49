//! Query result types.

use serde::{Deserialize, Serialize};

use crate::source::query::Cursor;
use strata_core::{Document, FieldValue, RecordId};

/// A single document returned from a query, with its backend identity
/// injected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// The record's identity within its collection.
    id: RecordId,

    /// The document fields. Schema is owned by the backend collection.
    fields: Document,
}

impl Record {
    /// Creates a new record.
    pub fn new(id: impl Into<RecordId>, fields: Document) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Returns the record id.
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Returns the document fields.
    pub fn fields(&self) -> &Document {
        &self.fields
    }

    /// Convenience field lookup with dot notation.
    pub fn get(&self, path: &str) -> Option<&FieldValue> {
        self.fields.get(path)
    }
}

/// One page of query results plus continuation state.
///
/// `has_more` is inferred from the page being full: a result set whose
/// size is an exact multiple of the page size reports one trailing page
/// that turns out empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    /// The records, in query order.
    items: Vec<Record>,

    /// Token to continue after the last record, absent on an empty page.
    next_cursor: Option<Cursor>,

    /// Whether another page is expected to exist.
    has_more: bool,
}

impl PageResult {
    /// Builds a page from the records a backend returned for the given
    /// page size, deriving `next_cursor` and `has_more`.
    pub fn from_page(items: Vec<Record>, page_size: usize) -> Self {
        let next_cursor = items.last().map(|r| Cursor::new(r.id().as_str()));
        let has_more = items.len() == page_size;

        Self {
            items,
            next_cursor,
            has_more,
        }
    }

    /// Creates an empty page.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
            has_more: false,
        }
    }

    /// Returns the records of this page.
    pub fn items(&self) -> &[Record] {
        &self.items
    }

    /// Returns the continuation cursor, if any.
    pub fn next_cursor(&self) -> Option<&Cursor> {
        self.next_cursor.as_ref()
    }

    /// Returns whether another page is expected.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Returns true if the page holds no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of records in the page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
