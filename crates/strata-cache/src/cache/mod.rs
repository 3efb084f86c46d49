//! Cache module for Strata.
//!
//! This module provides a high-performance cache layer using Moka,
//! with support for TTL-based expiration, substring-based invalidation,
//! and metrics.

pub mod invalidation;
pub mod keys;
pub mod query_cache;

// Re-exports
pub use invalidation::InvalidationResult;
pub use keys::CacheKey;
pub use query_cache::{CacheConfig, CachedValue, QueryCache};
