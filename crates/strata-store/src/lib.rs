//! # Strata Store
//!
//! Document store abstraction for the Strata query cache.
//!
//! This crate defines the declarative query model (descriptors, filter
//! clauses, pagination cursors), the [`DocumentStore`] trait that backends
//! implement, the [`QueryExecutor`] that turns one descriptor into one
//! backend call, and an in-memory reference backend.
//!
//! ## Features
//!
//! - Async trait-based document store abstraction
//! - Tagged filter variants that reject unsupported operators at
//!   construction time
//! - Cursor-based pagination with backend-assigned opaque tokens
//! - Batched multi-document writes
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use strata_core::Document;
//! use strata_store::{
//!     DocumentStore, FilterClause, MemoryBackend, QueryDescriptor, QueryExecutor,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), strata_store::StoreError> {
//! let backend = Arc::new(MemoryBackend::new());
//! backend.insert_with_id(
//!     "products",
//!     "p-1",
//!     Document::new().with("name", "Desk Lamp").with("featured", true),
//! );
//!
//! let executor = QueryExecutor::new(backend);
//! let query = QueryDescriptor::new("products")
//!     .with_filter(FilterClause::equals("featured", true))
//!     .with_page_size(10);
//!
//! let page = executor.execute(&query).await?;
//! assert_eq!(page.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod executor;
pub mod memory;
pub mod source;

// Re-exports
pub use error::StoreError;
pub use executor::{DEFAULT_PAGE_SIZE, QueryExecutor};
pub use memory::MemoryBackend;
pub use source::{
    Cursor, Direction, DocumentStore, FilterClause, OrderBy, PageResult, QueryDescriptor, RangeOp,
    Record, WriteOp,
};

// Re-export strata_core for consumers
pub use strata_core;
