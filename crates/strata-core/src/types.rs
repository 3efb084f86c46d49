//! Common type definitions and newtypes for Strata.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Collection identifier.
///
/// Represents the name of a document collection, e.g. "products" or
/// "orders". Collections are flat namespaces owned by the backend.
///
/// # Example
///
/// ```
/// use strata_core::Collection;
///
/// let col = Collection::new("products");
/// assert_eq!(col.as_str(), "products");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection(String);

impl Collection {
    /// Creates a new Collection identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the collection name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Collection {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Collection {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Record identifier within a collection.
///
/// Backends assign ids on insertion; ids are opaque strings from the
/// caller's point of view.
///
/// # Example
///
/// ```
/// use strata_core::RecordId;
///
/// let id = RecordId::new("p-1042");
/// assert_eq!(id.as_str(), "p-1042");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Creates a new RecordId.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_display() {
        let col = Collection::new("orders");
        assert_eq!(col.to_string(), "orders");
    }

    #[test]
    fn test_record_id_equality() {
        let a = RecordId::new("abc");
        let b: RecordId = "abc".into();
        assert_eq!(a, b);
    }

    #[test]
    fn test_serde_transparent() {
        let col = Collection::new("products");
        let json = serde_json::to_string(&col).unwrap();
        assert_eq!(json, "\"products\"");

        let back: Collection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, col);
    }
}
