//! Query executor: one descriptor, one backend call, one normalized page.

use std::sync::Arc;

use tracing::debug;

use crate::error::StoreError;
use crate::source::query::QueryDescriptor;
use crate::source::result::{PageResult, Record};
use crate::source::traits::DocumentStore;

/// Default page size applied when a descriptor does not set one.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Translates declarative query descriptors into backend calls and
/// normalizes the response into [`PageResult`]s.
///
/// The executor is stateless beyond its configuration: it performs no
/// caching, no retries, and exactly one backend call per `execute`.
/// Retry policy belongs to callers.
#[derive(Clone)]
pub struct QueryExecutor {
    store: Arc<dyn DocumentStore>,
    default_page_size: usize,
}

impl QueryExecutor {
    /// Creates an executor over the given backend with the default page
    /// size.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_page_size(store, DEFAULT_PAGE_SIZE)
    }

    /// Creates an executor with an explicit default page size.
    pub fn with_page_size(store: Arc<dyn DocumentStore>, default_page_size: usize) -> Self {
        Self {
            store,
            default_page_size,
        }
    }

    /// Returns the backend this executor runs against.
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Returns the default page size.
    pub fn default_page_size(&self) -> usize {
        self.default_page_size
    }

    /// Executes one descriptor against the backend.
    ///
    /// Rows come back as raw (id, fields) pairs; the executor injects the
    /// id into each [`Record`] and derives the continuation cursor and
    /// `has_more` flag from the page size.
    ///
    /// # Errors
    ///
    /// - `StoreError::InvalidQuery` when the descriptor fails validation
    ///   (no backend call is made)
    /// - `StoreError::Unavailable` propagated unchanged from the backend
    pub async fn execute(&self, descriptor: &QueryDescriptor) -> Result<PageResult, StoreError> {
        descriptor.validate()?;

        let limit = descriptor.effective_page_size(self.default_page_size);

        debug!(query = %descriptor, limit, "Executing query");

        let rows = self
            .store
            .run_query(
                descriptor.collection(),
                descriptor.filters(),
                descriptor.order_by(),
                descriptor.cursor(),
                limit,
            )
            .await?;

        let items: Vec<Record> = rows
            .into_iter()
            .map(|(id, fields)| Record::new(id, fields))
            .collect();

        debug!(query = %descriptor, rows = items.len(), "Query executed");

        Ok(PageResult::from_page(items, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::query::{Cursor, FilterClause, OrderBy};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use strata_core::{Collection, Document, RecordId};

    /// Backend that serves a fixed number of rows and counts calls.
    struct FixedBackend {
        rows: usize,
        calls: AtomicU32,
    }

    impl FixedBackend {
        fn new(rows: usize) -> Self {
            Self {
                rows,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl DocumentStore for FixedBackend {
        async fn run_query(
            &self,
            _collection: &Collection,
            _filters: &[FilterClause],
            _order_by: Option<&OrderBy>,
            _start_after: Option<&Cursor>,
            limit: usize,
        ) -> Result<Vec<(RecordId, Document)>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok((0..self.rows.min(limit))
                .map(|i| {
                    (
                        RecordId::new(format!("r-{}", i)),
                        Document::new().with("n", i as i64),
                    )
                })
                .collect())
        }

        async fn get_document(
            &self,
            collection: &Collection,
            id: &RecordId,
        ) -> Result<Document, StoreError> {
            Err(StoreError::record_not_found(
                collection.as_str(),
                id.as_str(),
            ))
        }

        async fn insert_document(
            &self,
            _collection: &Collection,
            _fields: Document,
        ) -> Result<RecordId, StoreError> {
            Ok(RecordId::new("unused"))
        }

        async fn update_document(
            &self,
            _collection: &Collection,
            _id: &RecordId,
            _fields: Document,
        ) -> Result<(), StoreError> {
            Ok(())
        }

        async fn delete_document(
            &self,
            _collection: &Collection,
            _id: &RecordId,
        ) -> Result<(), StoreError> {
            Ok(())
        }

        async fn health_check(&self) -> Result<(), StoreError> {
            Ok(())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn test_execute_makes_one_call_and_injects_ids() {
        let backend = Arc::new(FixedBackend::new(3));
        let executor = QueryExecutor::new(Arc::clone(&backend) as Arc<dyn DocumentStore>);

        let page = executor
            .execute(&QueryDescriptor::new("products").with_page_size(10))
            .await
            .unwrap();

        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
        assert_eq!(page.len(), 3);
        assert_eq!(page.items()[0].id().as_str(), "r-0");
    }

    #[tokio::test]
    async fn test_full_page_reports_has_more() {
        let backend = Arc::new(FixedBackend::new(50));
        let executor = QueryExecutor::new(backend as Arc<dyn DocumentStore>);

        let page = executor
            .execute(&QueryDescriptor::new("products").with_page_size(5))
            .await
            .unwrap();

        assert_eq!(page.len(), 5);
        assert!(page.has_more());
        assert_eq!(page.next_cursor().unwrap().as_str(), "r-4");
    }

    #[tokio::test]
    async fn test_partial_page_reports_no_more() {
        let backend = Arc::new(FixedBackend::new(2));
        let executor = QueryExecutor::new(backend as Arc<dyn DocumentStore>);

        let page = executor
            .execute(&QueryDescriptor::new("products").with_page_size(5))
            .await
            .unwrap();

        assert_eq!(page.len(), 2);
        assert!(!page.has_more());
    }

    #[tokio::test]
    async fn test_default_page_size_applies() {
        let backend = Arc::new(FixedBackend::new(100));
        let executor =
            QueryExecutor::with_page_size(backend as Arc<dyn DocumentStore>, 7);

        let page = executor
            .execute(&QueryDescriptor::new("products"))
            .await
            .unwrap();

        assert_eq!(page.len(), 7);
    }

    #[tokio::test]
    async fn test_invalid_descriptor_fails_before_backend_call() {
        let backend = Arc::new(FixedBackend::new(3));
        let executor = QueryExecutor::new(Arc::clone(&backend) as Arc<dyn DocumentStore>);

        let err = executor
            .execute(&QueryDescriptor::new(""))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::InvalidQuery(_)));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }
}
