//! In-process reference backend.

use std::collections::HashMap;

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreError;
use crate::source::query::{Cursor, FilterClause, OrderBy};
use crate::source::traits::DocumentStore;
use strata_core::{Collection, Document, RecordId};

/// An in-memory document store.
///
/// Collections are ordered maps of id to document, so queries without an
/// explicit ordering return records in insertion order. This backend is
/// the reference implementation of [`DocumentStore`] and the workhorse of
/// the test suites; it is not meant to hold production data.
#[derive(Default)]
pub struct MemoryBackend {
    collections: RwLock<HashMap<String, IndexMap<String, Document>>>,
}

impl MemoryBackend {
    /// Creates a new empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a document under a caller-chosen id.
    ///
    /// Intended for seeding test fixtures with deterministic ids; regular
    /// writes go through [`DocumentStore::insert_document`].
    pub fn insert_with_id(
        &self,
        collection: impl Into<Collection>,
        id: impl Into<RecordId>,
        fields: Document,
    ) {
        let collection = collection.into();
        let id = id.into();
        let mut guard = self.collections.write();
        guard
            .entry(collection.as_str().to_string())
            .or_default()
            .insert(id.as_str().to_string(), fields);
    }

    /// Returns the number of documents in a collection.
    pub fn collection_len(&self, collection: &Collection) -> usize {
        self.collections
            .read()
            .get(collection.as_str())
            .map(|docs| docs.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl DocumentStore for MemoryBackend {
    async fn run_query(
        &self,
        collection: &Collection,
        filters: &[FilterClause],
        order_by: Option<&OrderBy>,
        start_after: Option<&Cursor>,
        limit: usize,
    ) -> Result<Vec<(RecordId, Document)>, StoreError> {
        let guard = self.collections.read();

        // A missing collection is an empty result, not an error.
        let Some(docs) = guard.get(collection.as_str()) else {
            return Ok(Vec::new());
        };

        let mut rows: Vec<(RecordId, Document)> = docs
            .iter()
            .filter(|(_, doc)| filters.iter().all(|clause| clause.matches(doc.get(clause.field()))))
            .map(|(id, doc)| (RecordId::new(id.as_str()), doc.clone()))
            .collect();

        if let Some(order) = order_by {
            rows.sort_by(|(_, a), (_, b)| {
                let ord = match (a.get(order.field()), b.get(order.field())) {
                    (Some(va), Some(vb)) => {
                        va.compare(vb).unwrap_or(std::cmp::Ordering::Equal)
                    },
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                };
                match order.direction() {
                    crate::source::query::Direction::Asc => ord,
                    crate::source::query::Direction::Desc => ord.reverse(),
                }
            });
        }

        if let Some(cursor) = start_after {
            // A cursor names the last record of the previous page. If it
            // is no longer visible (deleted, filtered out), the page is
            // empty rather than restarted from the top.
            match rows.iter().position(|(id, _)| id.as_str() == cursor.as_str()) {
                Some(pos) => {
                    rows.drain(..=pos);
                },
                None => rows.clear(),
            }
        }

        rows.truncate(limit);

        debug!(
            collection = %collection,
            rows = rows.len(),
            "Memory query executed"
        );

        Ok(rows)
    }

    async fn get_document(
        &self,
        collection: &Collection,
        id: &RecordId,
    ) -> Result<Document, StoreError> {
        self.collections
            .read()
            .get(collection.as_str())
            .and_then(|docs| docs.get(id.as_str()))
            .cloned()
            .ok_or_else(|| StoreError::record_not_found(collection.as_str(), id.as_str()))
    }

    async fn insert_document(
        &self,
        collection: &Collection,
        fields: Document,
    ) -> Result<RecordId, StoreError> {
        let id = RecordId::new(Uuid::now_v7().to_string());

        let mut guard = self.collections.write();
        guard
            .entry(collection.as_str().to_string())
            .or_default()
            .insert(id.as_str().to_string(), fields);

        debug!(collection = %collection, id = %id, "Document inserted");

        Ok(id)
    }

    async fn update_document(
        &self,
        collection: &Collection,
        id: &RecordId,
        fields: Document,
    ) -> Result<(), StoreError> {
        let mut guard = self.collections.write();

        let doc = guard
            .get_mut(collection.as_str())
            .and_then(|docs| docs.get_mut(id.as_str()))
            .ok_or_else(|| StoreError::record_not_found(collection.as_str(), id.as_str()))?;

        doc.merge_from(&fields);

        debug!(collection = %collection, id = %id, "Document updated");

        Ok(())
    }

    async fn delete_document(
        &self,
        collection: &Collection,
        id: &RecordId,
    ) -> Result<(), StoreError> {
        let mut guard = self.collections.write();

        let removed = guard
            .get_mut(collection.as_str())
            .and_then(|docs| docs.shift_remove(id.as_str()));

        if removed.is_none() {
            return Err(StoreError::record_not_found(
                collection.as_str(),
                id.as_str(),
            ));
        }

        debug!(collection = %collection, id = %id, "Document deleted");

        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
