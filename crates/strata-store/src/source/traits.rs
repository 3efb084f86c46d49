//! Document store trait definition.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::source::query::{Cursor, FilterClause, OrderBy};
use strata_core::{Collection, Document, RecordId};

/// A pending write inside a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Insert a new document; the backend assigns the id.
    Insert {
        collection: Collection,
        fields: Document,
    },
    /// Merge fields into an existing document.
    Update {
        collection: Collection,
        id: RecordId,
        fields: Document,
    },
    /// Delete a document.
    Delete {
        collection: Collection,
        id: RecordId,
    },
}

/// A document-oriented storage backend.
///
/// This trait abstracts over different document stores (in-memory, remote
/// document databases, etc.) allowing the query and cache layers to run
/// without knowing the underlying storage.
///
/// Backends are treated as black boxes: the wire format and consistency
/// model are the backend's concern. Implementations must not retry on
/// their callers' behalf; transient failures surface as
/// `StoreError::Unavailable`.
///
/// # Implementors
///
/// - `MemoryBackend` - In-process reference backend
/// - (Future) remote document database clients
///
/// # Example
///
/// ```ignore
/// use strata_store::{DocumentStore, QueryDescriptor};
///
/// struct MyBackend;
///
/// #[async_trait]
/// impl DocumentStore for MyBackend {
///     async fn run_query(&self, ...) -> Result<Vec<(RecordId, Document)>, StoreError> {
///         // Implementation here
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Runs one collection query: equality/range filters in clause order,
    /// then ordering, then cursor, then limit.
    ///
    /// Returns raw rows as (identity, fields) pairs; a missing collection
    /// yields an empty result, not an error.
    ///
    /// # Errors
    ///
    /// - `StoreError::Unavailable` when the backend cannot be reached
    async fn run_query(
        &self,
        collection: &Collection,
        filters: &[FilterClause],
        order_by: Option<&OrderBy>,
        start_after: Option<&Cursor>,
        limit: usize,
    ) -> Result<Vec<(RecordId, Document)>, StoreError>;

    /// Fetches a single document by id.
    ///
    /// # Errors
    ///
    /// - `StoreError::RecordNotFound` when the id does not exist
    async fn get_document(
        &self,
        collection: &Collection,
        id: &RecordId,
    ) -> Result<Document, StoreError>;

    /// Inserts a new document and returns the backend-assigned id.
    async fn insert_document(
        &self,
        collection: &Collection,
        fields: Document,
    ) -> Result<RecordId, StoreError>;

    /// Merges fields into an existing document.
    ///
    /// # Errors
    ///
    /// - `StoreError::RecordNotFound` when the id does not exist
    async fn update_document(
        &self,
        collection: &Collection,
        id: &RecordId,
        fields: Document,
    ) -> Result<(), StoreError>;

    /// Deletes a document.
    ///
    /// # Errors
    ///
    /// - `StoreError::RecordNotFound` when the id does not exist
    async fn delete_document(
        &self,
        collection: &Collection,
        id: &RecordId,
    ) -> Result<(), StoreError>;

    /// Applies several writes.
    ///
    /// The default implementation applies the operations sequentially and
    /// stops at the first failure; backends with native batching should
    /// override it.
    async fn write_batch(&self, ops: Vec<WriteOp>) -> Result<(), StoreError> {
        for op in ops {
            match op {
                WriteOp::Insert { collection, fields } => {
                    self.insert_document(&collection, fields).await?;
                },
                WriteOp::Update {
                    collection,
                    id,
                    fields,
                } => {
                    self.update_document(&collection, &id, fields).await?;
                },
                WriteOp::Delete { collection, id } => {
                    self.delete_document(&collection, &id).await?;
                },
            }
        }
        Ok(())
    }

    /// Performs a health check on the backend.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the backend is reachable, or an error describing the
    /// problem.
    async fn health_check(&self) -> Result<(), StoreError>;

    /// Returns the name of this backend.
    ///
    /// This is used for logging and identification purposes.
    fn name(&self) -> &str;
}
