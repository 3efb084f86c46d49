//! Cache-aware client: the public read surface plus mutation wrappers.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::cache::{CacheConfig, CacheKey, CachedValue, QueryCache};
use strata_store::strata_core::{Collection, Document, RecordId};
use strata_store::{
    DEFAULT_PAGE_SIZE, DocumentStore, PageResult, QueryDescriptor, QueryExecutor, Record,
    StoreError, WriteOp,
};

/// The cache-aware façade over a document store.
///
/// Reads derive a [`CacheKey`] from the descriptor, serve hits straight
/// from the [`QueryCache`], and populate it on misses. Writes go to the
/// backend first; on success the affected cache entries are invalidated
/// synchronously, so the next read repopulates from the backend.
///
/// The client owns no global state: construct one per process and pass it
/// by reference to every consumer. Tests construct a fresh instance per
/// case.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use strata_cache::{CacheConfig, CachedClient};
/// use strata_store::{MemoryBackend, QueryDescriptor};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), strata_store::StoreError> {
/// let client = CachedClient::new(Arc::new(MemoryBackend::new()), CacheConfig::default());
///
/// let page = client.read(&QueryDescriptor::new("products")).await?;
/// assert!(page.is_empty());
/// # Ok(())
/// # }
/// ```
pub struct CachedClient {
    executor: QueryExecutor,
    cache: QueryCache,
    /// Downstream aggregate keys to invalidate per collection.
    dependents: RwLock<HashMap<String, Vec<CacheKey>>>,
}

impl CachedClient {
    /// Creates a client over the given backend with the default page size.
    pub fn new(store: Arc<dyn DocumentStore>, config: CacheConfig) -> Self {
        Self::with_page_size(store, config, DEFAULT_PAGE_SIZE)
    }

    /// Creates a client with an explicit default page size.
    pub fn with_page_size(
        store: Arc<dyn DocumentStore>,
        config: CacheConfig,
        default_page_size: usize,
    ) -> Self {
        Self {
            executor: QueryExecutor::with_page_size(store, default_page_size),
            cache: QueryCache::new(config),
            dependents: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the underlying backend.
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        self.executor.store()
    }

    /// Returns the cache for diagnostics (hit/miss counters, entry count).
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    // ============================================
    // Reads
    // ============================================

    /// Reads one page of results, serving from cache when possible.
    ///
    /// On a hit no backend call is made. On a miss the query executes,
    /// the page is stored under the derived key and returned. A failed
    /// execution leaves the cache untouched.
    #[instrument(skip_all, fields(query = %descriptor))]
    pub async fn read(&self, descriptor: &QueryDescriptor) -> Result<Arc<PageResult>, StoreError> {
        let key = CacheKey::for_query(descriptor);

        if let Some(page) = self.cache.get(&key).await.and_then(CachedValue::into_page) {
            debug!("Cache hit");
            return Ok(page);
        }

        let page = Arc::new(self.executor.execute(descriptor).await?);
        self.cache.insert_page(key, Arc::clone(&page)).await;

        Ok(page)
    }

    /// Reads several independent queries, executing cache-misses
    /// concurrently.
    ///
    /// Results align positionally with the input descriptors regardless of
    /// completion order. Failures propagate per slot: one descriptor's
    /// backend error never poisons the other results.
    pub async fn read_batch(
        &self,
        descriptors: &[QueryDescriptor],
    ) -> Vec<Result<Arc<PageResult>, StoreError>> {
        join_all(descriptors.iter().map(|d| self.read(d))).await
    }

    /// Reads a single record by id, serving from cache when possible.
    #[instrument(skip_all, fields(collection = %collection, id = %id))]
    pub async fn get_record(
        &self,
        collection: &Collection,
        id: &RecordId,
    ) -> Result<Arc<Record>, StoreError> {
        let key = CacheKey::for_record(collection, id);

        if let Some(record) = self
            .cache
            .get(&key)
            .await
            .and_then(CachedValue::into_record)
        {
            debug!("Cache hit");
            return Ok(record);
        }

        let fields = self.store().get_document(collection, id).await?;
        let record = Arc::new(Record::new(id.clone(), fields));
        self.cache.insert_record(key, Arc::clone(&record)).await;

        Ok(record)
    }

    // ============================================
    // Mutations
    // ============================================

    /// Inserts a new record and clears the collection's cached reads.
    ///
    /// A new record may satisfy arbitrarily many filtered and paginated
    /// views, so the whole collection is cleared rather than individual
    /// keys. The cache is only touched after the write succeeds.
    #[instrument(skip_all, fields(collection = %collection))]
    pub async fn add_record(
        &self,
        collection: &Collection,
        fields: Document,
    ) -> Result<RecordId, StoreError> {
        let id = self.store().insert_document(collection, fields).await?;

        self.invalidate_after_write(collection).await;

        info!(id = %id, "Record added");

        Ok(id)
    }

    /// Merges fields into an existing record and invalidates its cached
    /// reads.
    ///
    /// Both the record's own key and the collection's list entries fall:
    /// an update may change which filters the record matches.
    #[instrument(skip_all, fields(collection = %collection, id = %id))]
    pub async fn update_record(
        &self,
        collection: &Collection,
        id: &RecordId,
        fields: Document,
    ) -> Result<(), StoreError> {
        self.store().update_document(collection, id, fields).await?;

        self.cache
            .invalidate(&CacheKey::for_record(collection, id))
            .await;
        self.invalidate_after_write(collection).await;

        info!("Record updated");

        Ok(())
    }

    /// Deletes a record and invalidates its cached reads.
    #[instrument(skip_all, fields(collection = %collection, id = %id))]
    pub async fn delete_record(
        &self,
        collection: &Collection,
        id: &RecordId,
    ) -> Result<(), StoreError> {
        self.store().delete_document(collection, id).await?;

        self.cache
            .invalidate(&CacheKey::for_record(collection, id))
            .await;
        self.invalidate_after_write(collection).await;

        info!("Record deleted");

        Ok(())
    }

    /// Applies a batch of writes, then invalidates every affected
    /// collection and record key.
    ///
    /// Invalidation runs even when the batch fails: a sequential backend
    /// may have persisted a prefix of the operations before the failing
    /// one, so the affected entries cannot be trusted either way.
    pub async fn apply_batch(&self, ops: Vec<WriteOp>) -> Result<(), StoreError> {
        let mut collections: HashSet<Collection> = HashSet::new();
        let mut record_keys: Vec<CacheKey> = Vec::new();

        for op in &ops {
            match op {
                WriteOp::Insert { collection, .. } => {
                    collections.insert(collection.clone());
                },
                WriteOp::Update { collection, id, .. } | WriteOp::Delete { collection, id } => {
                    collections.insert(collection.clone());
                    record_keys.push(CacheKey::for_record(collection, id));
                },
            }
        }

        let result = self.store().write_batch(ops).await;

        for key in &record_keys {
            self.cache.invalidate(key).await;
        }
        for collection in &collections {
            self.invalidate_after_write(collection).await;
        }

        result
    }

    // ============================================
    // Invalidation surface
    // ============================================

    /// Invalidates one cache entry.
    pub async fn invalidate(&self, key: &CacheKey) {
        self.cache.invalidate(key).await;
    }

    /// Clears the entire cache.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Invalidates every entry whose key contains the substring.
    pub async fn invalidate_containing(&self, pattern: &str) -> crate::cache::InvalidationResult {
        self.cache.invalidate_containing(pattern).await
    }

    /// Registers a downstream aggregate key (e.g. a dashboard summary)
    /// to invalidate whenever the given collection mutates.
    pub async fn register_dependent_key(&self, collection: &Collection, key: CacheKey) {
        let mut dependents = self.dependents.write().await;
        dependents
            .entry(collection.as_str().to_string())
            .or_default()
            .push(key);
    }

    /// Collection-wide invalidation applied after every successful write.
    async fn invalidate_after_write(&self, collection: &Collection) {
        self.cache.invalidate_collection(collection).await;

        let dependents = self.dependents.read().await;
        if let Some(keys) = dependents.get(collection.as_str()) {
            for key in keys {
                self.cache.invalidate(key).await;
            }
        }
    }
}
