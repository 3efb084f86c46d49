//! Query result cache using Moka.

use crate::cache::keys::CacheKey;
use crate::metrics::CacheMetrics;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use strata_store::{PageResult, Record};

/// Configuracion del cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL de cada entrada (default: 5 minutos)
    pub ttl: Duration,
    /// Maximo numero de entries (default: 10000)
    pub max_capacity: u64,
    /// Time-to-idle (opcional)
    pub tti: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 10_000,
            tti: None,
        }
    }
}

/// Valor almacenado en el cache: una pagina de resultados o un record
/// individual. Ambos viven detras de `Arc`, los clones son baratos.
#[derive(Debug, Clone)]
pub enum CachedValue {
    /// Una pagina de resultados de query.
    Page(Arc<PageResult>),
    /// Un record cacheado individualmente.
    Record(Arc<Record>),
}

impl CachedValue {
    /// Retorna la pagina si el valor es una pagina.
    pub fn into_page(self) -> Option<Arc<PageResult>> {
        match self {
            Self::Page(page) => Some(page),
            Self::Record(_) => None,
        }
    }

    /// Retorna el record si el valor es un record.
    pub fn into_record(self) -> Option<Arc<Record>> {
        match self {
            Self::Record(record) => Some(record),
            Self::Page(_) => None,
        }
    }
}

/// Cache de resultados de queries usando Moka.
/// Thread-safe y async-friendly.
///
/// Todas las operaciones son totales: no hay paths de error. Una entrada
/// nunca se retorna despues de que su TTL expiro.
///
/// # Examples
///
/// ```no_run
/// use strata_cache::cache::{CacheConfig, CacheKey, QueryCache};
/// use strata_store::QueryDescriptor;
///
/// # #[tokio::main]
/// # async fn main() {
/// let cache = QueryCache::new(CacheConfig::default());
/// let key = CacheKey::for_query(&QueryDescriptor::new("products"));
///
/// // Get value if exists
/// if let Some(value) = cache.get(&key).await {
///     println!("Cache hit!");
/// }
/// # }
/// ```
#[derive(Clone)]
pub struct QueryCache {
    inner: Cache<CacheKey, CachedValue>,
    metrics: CacheMetrics,
}

impl QueryCache {
    /// Crea un nuevo cache con la configuracion dada.
    pub fn new(config: CacheConfig) -> Self {
        let metrics = CacheMetrics::new();

        let mut builder = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(config.ttl);

        if let Some(tti) = config.tti {
            builder = builder.time_to_idle(tti);
        }

        // Configurar listener para evictions
        let eviction_metrics = metrics.clone();
        builder = builder.eviction_listener(move |_key, _value, cause| {
            let reason = match cause {
                moka::notification::RemovalCause::Expired => "ttl",
                moka::notification::RemovalCause::Size => "capacity",
                moka::notification::RemovalCause::Explicit => "manual",
                moka::notification::RemovalCause::Replaced => "replaced",
            };
            eviction_metrics.record_eviction(reason);
        });

        Self {
            inner: builder.build(),
            metrics,
        }
    }

    /// Obtiene un valor del cache si existe y no expiro.
    pub async fn get(&self, key: &CacheKey) -> Option<CachedValue> {
        let start = Instant::now();
        let result = self.inner.get(key).await;

        if result.is_some() {
            self.metrics.record_hit();
        } else {
            self.metrics.record_miss();
        }

        self.metrics
            .record_operation_duration("get", start.elapsed());
        self.update_entry_gauge();

        result
    }

    /// Inserta o sobreescribe un valor; el timestamp de insercion es ahora.
    pub async fn insert(&self, key: CacheKey, value: CachedValue) {
        self.inner.insert(key, value).await;
        self.update_entry_gauge();
    }

    /// Inserta una pagina de resultados.
    pub async fn insert_page(&self, key: CacheKey, page: Arc<PageResult>) {
        self.insert(key, CachedValue::Page(page)).await;
    }

    /// Inserta un record individual.
    pub async fn insert_record(&self, key: CacheKey, record: Arc<Record>) {
        self.insert(key, CachedValue::Record(record)).await;
    }

    /// Invalida una entrada especifica. No-op si no existe.
    pub async fn invalidate(&self, key: &CacheKey) {
        self.inner.invalidate(key).await;
    }

    /// Invalida todas las entradas.
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Retorna el numero aproximado de entries en cache.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Itera sobre todas las entries del cache.
    /// Nota: Esta es una snapshot, entries pueden cambiar durante iteracion.
    pub fn iter(&self) -> impl Iterator<Item = (Arc<CacheKey>, CachedValue)> + '_ {
        self.inner.iter()
    }

    /// Actualiza el gauge de entry count.
    fn update_entry_gauge(&self) {
        self.metrics.update_entry_count(self.inner.entry_count());
    }

    /// Retorna las metricas para acceso externo.
    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    /// Sincroniza el cache (para tests principalmente).
    /// Fuerza la limpieza de entries expiradas.
    #[cfg(test)]
    pub(crate) async fn sync(&self) {
        self.inner.run_pending_tasks().await;
    }
}
