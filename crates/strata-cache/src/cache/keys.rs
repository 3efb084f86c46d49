//! Cache key derivation.

use std::fmt;

use strata_store::QueryDescriptor;
use strata_store::strata_core::{Collection, RecordId};

/// Key unica para entradas de cache.
///
/// Derivada deterministicamente de la consulta: dos queries logicamente
/// identicas producen siempre la misma key, y cualquier diferencia en
/// filtros, orden, tamano de pagina o cursor produce keys distintas.
/// La identidad del cursor la asigna el backend, por lo que su
/// serializacion estable es best-effort.
///
/// Los prefijos `q:`, `r:` y `agg:` separan los espacios de keys de
/// paginas, records individuales y agregados.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Deriva la key de una consulta paginada.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_cache::cache::CacheKey;
    /// use strata_store::QueryDescriptor;
    ///
    /// let q = QueryDescriptor::new("products").with_page_size(10);
    /// assert_eq!(CacheKey::for_query(&q), CacheKey::for_query(&q.clone()));
    /// ```
    pub fn for_query(descriptor: &QueryDescriptor) -> Self {
        Self(format!("q:{}", descriptor))
    }

    /// Deriva la key de un record individual.
    pub fn for_record(collection: &Collection, id: &RecordId) -> Self {
        Self(format!("r:{}/{}", collection, id))
    }

    /// Crea una key para un agregado con nombre propio (por ejemplo un
    /// resumen de dashboard).
    pub fn aggregate(name: impl Into<String>) -> Self {
        Self(format!("agg:{}", name.into()))
    }

    /// Retorna la key como string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Retorna true si la key contiene el substring dado.
    ///
    /// La invalidacion por coleccion se apoya en esta contencion de
    /// substrings; es fragil cuando el nombre de una coleccion es
    /// substring del nombre de otra.
    pub fn contains(&self, pattern: &str) -> bool {
        self.0.contains(pattern)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
