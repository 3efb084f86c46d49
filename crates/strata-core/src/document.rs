use crate::error::{Result, StrataError};
use crate::value::FieldValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A schemaless document holding named field values.
///
/// This struct wraps an `IndexMap<String, FieldValue>` to provide
/// specialized methods for document handling, such as dot-notation access
/// and merge semantics for partial updates.
///
/// We use `IndexMap` to ensure iteration order is deterministic (insertion
/// order), which keeps serialized output and derived cache keys stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Document {
    #[serde(flatten)]
    inner: IndexMap<String, FieldValue>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Self {
            inner: IndexMap::new(),
        }
    }

    /// Creates a Document from an existing IndexMap.
    pub fn from_inner(inner: IndexMap<String, FieldValue>) -> Self {
        Self { inner }
    }

    /// Returns a reference to the internal map.
    pub fn as_inner(&self) -> &IndexMap<String, FieldValue> {
        &self.inner
    }

    /// Returns a mutable reference to the internal map.
    pub fn as_inner_mut(&mut self) -> &mut IndexMap<String, FieldValue> {
        &mut self.inner
    }

    /// Returns true if the document contains no fields.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of fields in the document.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Inserts a field into the document.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.inner.insert(key.into(), value.into());
    }

    /// Builder-style field insertion.
    ///
    /// # Example
    ///
    /// ```
    /// use strata_core::Document;
    ///
    /// let doc = Document::new().with("name", "Aurora Lamp").with("stock", 5);
    /// assert_eq!(doc.len(), 2);
    /// ```
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Retrieves a value by key, supporting dot notation for nested access.
    ///
    /// # Example
    /// ```
    /// # use strata_core::Document;
    /// let doc = Document::from_json(r#"{"price": {"amount": 20}}"#).unwrap();
    /// assert_eq!(doc.get("price.amount").unwrap().as_i64(), Some(20));
    /// ```
    pub fn get(&self, path: &str) -> Option<&FieldValue> {
        if path.is_empty() {
            return None;
        }

        // Fast path for simple keys
        if !path.contains('.') {
            return self.inner.get(path);
        }

        // Recursive lookup for dot notation
        let parts: Vec<&str> = path.split('.').collect();
        let mut current_value = self.inner.get(parts[0])?;

        for part in &parts[1..] {
            match current_value {
                FieldValue::Object(map) => {
                    current_value = map.get(*part)?;
                },
                _ => return None,
            }
        }

        Some(current_value)
    }

    /// Merges another document into this one, overwriting existing fields.
    ///
    /// This is the semantics of a partial update: fields present in `other`
    /// replace fields with the same name here, other fields are preserved.
    pub fn merge_from(&mut self, other: &Document) {
        for (key, value) in other.as_inner() {
            self.inner.insert(key.clone(), value.clone());
        }
    }

    /// Parses a JSON string into a Document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| StrataError::parse_error("json_source", e.to_string()))
    }

    /// Serializes the document to a JSON string (pretty printed).
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| StrataError::parse_error("json_target", e.to_string()))
    }
}

// Implement From<IndexMap>
impl From<IndexMap<String, FieldValue>> for Document {
    fn from(map: IndexMap<String, FieldValue>) -> Self {
        Document { inner: map }
    }
}
