//! # Strata Cache
//!
//! Client-side query result cache for document stores.
//!
//! This crate wraps a [`strata_store::DocumentStore`] with a TTL cache:
//! reads derive deterministic keys from query descriptors and are served
//! from memory while fresh; writes invalidate the affected entries so the
//! next read repopulates from the backend.
//!
//! ## Features
//!
//! - Moka-based TTL cache with bounded capacity
//! - Deterministic cache keys derived from query descriptors
//! - Substring-based bulk invalidation per collection
//! - Concurrent batch reads with per-slot error propagation
//! - Mutation wrappers applying the invalidation policy
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use strata_cache::{CacheConfig, CachedClient};
//! use strata_store::{MemoryBackend, QueryDescriptor};
//!
//! let client = CachedClient::new(Arc::new(MemoryBackend::new()), CacheConfig::default());
//!
//! let query = QueryDescriptor::new("products").with_page_size(20);
//! let page = client.read(&query).await?;       // backend call
//! let page = client.read(&query).await?;       // served from cache
//! ```

pub mod cache;
pub mod client;
pub mod metrics;

// Re-exports
pub use cache::{CacheConfig, CacheKey, CachedValue, InvalidationResult, QueryCache};
pub use client::CachedClient;
pub use metrics::{CacheMetrics, register_cache_metrics};

// Re-export strata_store for consumers
pub use strata_store;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
