//! Metricas del cache de resultados de queries.
//!
//! Los contadores atomicos internos alimentan `hit_rate()` y los asserts
//! de los tests; cada registro ademas publica la serie correspondiente en
//! la facade `metrics`, lista para el exporter que monte la aplicacion.

use metrics::{counter, gauge, histogram};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Describe las series `strata_cache_*` una sola vez al arranque.
pub fn register_cache_metrics() {
    metrics::describe_counter!(
        "strata_cache_hits_total",
        "Reads served from cache without a backend call"
    );
    metrics::describe_counter!(
        "strata_cache_misses_total",
        "Reads that had to execute against the backend"
    );
    metrics::describe_counter!(
        "strata_cache_evictions_total",
        "Entries removed by TTL, capacity or replacement"
    );
    metrics::describe_counter!(
        "strata_cache_invalidation_runs_total",
        "Substring invalidation sweeps executed"
    );
    metrics::describe_counter!(
        "strata_cache_invalidated_entries_total",
        "Entries removed by invalidation sweeps"
    );
    metrics::describe_gauge!(
        "strata_cache_entries",
        "Entries currently resident in the cache"
    );
    metrics::describe_histogram!(
        "strata_cache_operation_seconds",
        "Latency of individual cache operations"
    );
}

/// Contadores del cache de queries.
///
/// Un clon comparte los mismos atomicos: el cache y quien lo consulta ven
/// los mismos totales. Hits, misses y entradas invalidadas se acumulan
/// localmente para que los tests puedan hacer asserts sin un recorder
/// instalado; evictions, gauge e histogramas solo viven en la facade.
#[derive(Debug, Clone, Default)]
pub struct CacheMetrics {
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    invalidated: Arc<AtomicU64>,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Un read servido desde cache.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        counter!("strata_cache_hits_total").increment(1);
    }

    /// Un read que tuvo que ejecutarse contra el backend.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        counter!("strata_cache_misses_total").increment(1);
    }

    /// Una entrada expulsada por moka; `reason` distingue ttl, capacity,
    /// manual y replaced.
    pub fn record_eviction(&self, reason: &str) {
        counter!("strata_cache_evictions_total", "reason" => reason.to_string()).increment(1);
    }

    /// Una corrida de invalidacion por substring y cuantas entradas se
    /// llevo (cero incluido: la corrida cuenta igual).
    pub fn record_invalidation(&self, count: usize) {
        self.invalidated.fetch_add(count as u64, Ordering::Relaxed);
        counter!("strata_cache_invalidation_runs_total").increment(1);
        counter!("strata_cache_invalidated_entries_total").increment(count as u64);
    }

    /// Actualiza el gauge de entradas residentes.
    pub fn update_entry_count(&self, count: u64) {
        gauge!("strata_cache_entries").set(count as f64);
    }

    /// Registra la latencia de una operacion individual del cache.
    pub fn record_operation_duration(&self, operation: &str, duration: Duration) {
        histogram!(
            "strata_cache_operation_seconds",
            "operation" => operation.to_string()
        )
        .record(duration.as_secs_f64());
    }

    /// Proporcion de hits sobre el total de reads observados; 0.0 sin
    /// trafico.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(Ordering::Relaxed) as f64;
        let misses = self.misses.load(Ordering::Relaxed) as f64;
        let total = hits + misses;
        if total == 0.0 { 0.0 } else { hits / total }
    }

    /// Total de hits acumulados.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Total de misses acumulados.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Total acumulado de entradas removidas por invalidacion.
    pub fn invalidated_entries(&self) -> u64 {
        self.invalidated.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let metrics = CacheMetrics::new();

        assert_eq!(metrics.hits(), 0);
        assert_eq!(metrics.misses(), 0);
        assert_eq!(metrics.invalidated_entries(), 0);
        assert_eq!(metrics.hit_rate(), 0.0);
    }

    #[test]
    fn hit_rate_reflects_traffic() {
        let metrics = CacheMetrics::new();

        metrics.record_hit();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_miss();

        assert_eq!(metrics.hits(), 3);
        assert_eq!(metrics.misses(), 1);
        assert!((metrics.hit_rate() - 0.75).abs() < 0.001);
    }

    #[test]
    fn invalidation_totals_accumulate() {
        let metrics = CacheMetrics::new();

        metrics.record_invalidation(3);
        metrics.record_invalidation(0);
        metrics.record_invalidation(2);

        assert_eq!(metrics.invalidated_entries(), 5);
    }

    #[test]
    fn clones_share_the_same_counters() {
        let metrics = CacheMetrics::new();
        let clone = metrics.clone();

        metrics.record_hit();
        clone.record_miss();
        clone.record_invalidation(1);

        assert_eq!(metrics.hits(), 1);
        assert_eq!(metrics.misses(), 1);
        assert_eq!(metrics.invalidated_entries(), 1);
    }
}
