//! Metrics recording for the cache layer.
//!
//! Uses the `metrics` facade; exposition (Prometheus, etc.) is the
//! embedding application's concern.

pub mod cache;

pub use cache::{CacheMetrics, register_cache_metrics};
