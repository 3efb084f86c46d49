//! Cache invalidation with substring matching support.

use crate::cache::QueryCache;
use strata_store::strata_core::Collection;
use tracing::info;

/// Resultado de una operación de invalidación.
#[derive(Debug, Clone)]
pub struct InvalidationResult {
    /// Número de entries invalidadas.
    pub count: usize,
    /// Patrón aplicado.
    pub pattern: String,
}

impl QueryCache {
    /// Invalida todas las entradas cuya key contenga el substring dado.
    ///
    /// La contención de substrings es una aproximación de un índice de
    /// dependencias: es frágil si el nombre de una colección es substring
    /// del nombre de otra (p. ej. `order` y `order_items`).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use strata_cache::cache::{CacheConfig, QueryCache};
    /// # #[tokio::main]
    /// # async fn main() {
    /// # let cache = QueryCache::new(CacheConfig::default());
    /// let result = cache.invalidate_containing("products").await;
    /// println!("Invalidated {} entries", result.count);
    /// # }
    /// ```
    pub async fn invalidate_containing(&self, pattern: &str) -> InvalidationResult {
        let mut invalidated_keys = Vec::new();

        // Iterar sobre todas las entries y recolectar las que coincidan
        for (key, _) in self.iter() {
            if key.contains(pattern) {
                invalidated_keys.push((*key).clone());
            }
        }

        // Invalidar las keys recolectadas
        let count = invalidated_keys.len();
        for key in invalidated_keys {
            self.invalidate(&key).await;
        }

        self.metrics().record_invalidation(count);

        info!(
            pattern = %pattern,
            count = count,
            "Cache entries invalidated by substring"
        );

        InvalidationResult {
            count,
            pattern: pattern.to_string(),
        }
    }

    /// Invalida todas las entradas asociadas a una colección: páginas de
    /// queries, records individuales, lo que contenga su nombre.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use strata_cache::cache::{CacheConfig, QueryCache};
    /// # use strata_store::strata_core::Collection;
    /// # #[tokio::main]
    /// # async fn main() {
    /// # let cache = QueryCache::new(CacheConfig::default());
    /// let result = cache.invalidate_collection(&Collection::new("products")).await;
    /// println!("Invalidated {} entries", result.count);
    /// # }
    /// ```
    pub async fn invalidate_collection(&self, collection: &Collection) -> InvalidationResult {
        self.invalidate_containing(collection.as_str()).await
    }
}
