//! Test helpers para strata-cache.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use strata_store::strata_core::{Collection, Document, RecordId};
use strata_store::{Cursor, DocumentStore, FilterClause, MemoryBackend, OrderBy, StoreError};

/// Backend wrapper that counts calls and can inject failures.
///
/// Queries against a collection listed in `fail_collections` return
/// `StoreError::Unavailable` without touching the inner backend.
pub struct InstrumentedBackend {
    inner: MemoryBackend,
    query_calls: AtomicU32,
    get_calls: AtomicU32,
    fail_collections: Vec<String>,
}

impl InstrumentedBackend {
    pub fn new() -> Self {
        Self {
            inner: MemoryBackend::new(),
            query_calls: AtomicU32::new(0),
            get_calls: AtomicU32::new(0),
            fail_collections: Vec::new(),
        }
    }

    /// Creates a backend that fails every query against the given
    /// collections.
    pub fn failing_for(collections: &[&str]) -> Self {
        Self {
            fail_collections: collections.iter().map(|c| c.to_string()).collect(),
            ..Self::new()
        }
    }

    /// Seeds a document with a deterministic id.
    pub fn seed(&self, collection: &str, id: &str, fields: Document) {
        self.inner.insert_with_id(collection, id, fields);
    }

    /// Number of `run_query` calls that reached this backend.
    pub fn query_calls(&self) -> u32 {
        self.query_calls.load(Ordering::SeqCst)
    }

    /// Number of `get_document` calls that reached this backend.
    pub fn get_calls(&self) -> u32 {
        self.get_calls.load(Ordering::SeqCst)
    }

    fn check_failure(&self, collection: &Collection) -> Result<(), StoreError> {
        if self.fail_collections.iter().any(|c| c == collection.as_str()) {
            return Err(StoreError::unavailable("injected failure"));
        }
        Ok(())
    }
}

impl Default for InstrumentedBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InstrumentedBackend {
    async fn run_query(
        &self,
        collection: &Collection,
        filters: &[FilterClause],
        order_by: Option<&OrderBy>,
        start_after: Option<&Cursor>,
        limit: usize,
    ) -> Result<Vec<(RecordId, Document)>, StoreError> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure(collection)?;
        self.inner
            .run_query(collection, filters, order_by, start_after, limit)
            .await
    }

    async fn get_document(
        &self,
        collection: &Collection,
        id: &RecordId,
    ) -> Result<Document, StoreError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure(collection)?;
        self.inner.get_document(collection, id).await
    }

    async fn insert_document(
        &self,
        collection: &Collection,
        fields: Document,
    ) -> Result<RecordId, StoreError> {
        self.inner.insert_document(collection, fields).await
    }

    async fn update_document(
        &self,
        collection: &Collection,
        id: &RecordId,
        fields: Document,
    ) -> Result<(), StoreError> {
        self.inner.update_document(collection, id, fields).await
    }

    async fn delete_document(
        &self,
        collection: &Collection,
        id: &RecordId,
    ) -> Result<(), StoreError> {
        self.inner.delete_document(collection, id).await
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.inner.health_check().await
    }

    fn name(&self) -> &str {
        "instrumented"
    }
}
