use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Represents a field value inside a document, mirroring JSON types.
///
/// This enum is the core building block for schemaless documents. It
/// supports recursive types (Arrays inside Objects, etc.) and uses
/// `IndexMap` to preserve field order, which keeps serialized output
/// predictable.
///
/// # Example
///
/// ```
/// use strata_core::FieldValue;
///
/// let val: FieldValue = "sneaker".into();
/// assert_eq!(val.as_str(), Some("sneaker"));
///
/// // Nested structure
/// let arr: FieldValue = vec![1, 2, 3].into();
/// matches!(arr, FieldValue::Array(_));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (signed 64-bit)
    Integer(i64),
    /// Floating point value (wrapped in OrderedFloat for Eq support)
    Float(OrderedFloat<f64>),
    /// String value
    String(String),
    /// Array of values
    Array(Vec<FieldValue>),
    /// Object (Map) of values
    Object(IndexMap<String, FieldValue>),
}

impl FieldValue {
    /// Returns true if the value is Null.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Returns the value as a bool if it matches.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as an i64 if it matches.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as an f64 if it matches (Integer or Float).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(f.into_inner()),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the value as a str if it matches.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as an array slice if it matches.
    pub fn as_array(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Returns the value as an object (IndexMap) if it matches.
    pub fn as_object(&self) -> Option<&IndexMap<String, FieldValue>> {
        match self {
            FieldValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Compares two values for query ordering and range filters.
    ///
    /// Numeric values compare across Integer/Float. Strings and booleans
    /// compare within their own type. Mixed or non-scalar types are not
    /// comparable and return `None`, which backends treat as "filter does
    /// not match" / "sorts last".
    ///
    /// # Example
    ///
    /// ```
    /// use strata_core::FieldValue;
    /// use std::cmp::Ordering;
    ///
    /// let a: FieldValue = 3.into();
    /// let b: FieldValue = 4.5.into();
    /// assert_eq!(a.compare(&b), Some(Ordering::Less));
    ///
    /// let s: FieldValue = "abc".into();
    /// assert_eq!(s.compare(&a), None); // string vs number
    /// ```
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        use FieldValue::*;

        match (self, other) {
            (Integer(a), Integer(b)) => Some(a.cmp(b)),
            (Bool(a), Bool(b)) => Some(a.cmp(b)),
            (String(a), String(b)) => Some(a.cmp(b)),
            // Cross-numeric comparison via OrderedFloat
            (Integer(_) | Float(_), Integer(_) | Float(_)) => {
                let a = OrderedFloat(self.as_f64()?);
                let b = OrderedFloat(other.as_f64()?);
                Some(a.cmp(&b))
            },
            _ => None,
        }
    }
}

// ==========================================
// From Conversions for Ergonomics
// ==========================================

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Integer(v as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(OrderedFloat(v))
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::String(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::String(v.to_string())
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(v: Vec<T>) -> Self {
        FieldValue::Array(v.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_creation() {
        let v: FieldValue = 42.into();
        assert_eq!(v, FieldValue::Integer(42));
        assert_eq!(v.as_i64(), Some(42));
        assert_eq!(v.as_f64(), Some(42.0));

        let s: FieldValue = "hello".into();
        assert_eq!(s.as_str(), Some("hello"));
    }

    #[test]
    fn test_serde_serialization() {
        let v: FieldValue = vec![1, 2].into();
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[1,2]");
    }

    #[test]
    fn test_serde_deserialization() {
        let json = r#"{"key": "value", "num": 10.5}"#;
        let v: FieldValue = serde_json::from_str(json).unwrap();

        if let FieldValue::Object(map) = v {
            assert_eq!(map.get("key").unwrap().as_str(), Some("value"));
            assert_eq!(map.get("num").unwrap().as_f64(), Some(10.5));
        } else {
            panic!("Expected Object");
        }
    }

    #[test]
    fn test_compare_numbers() {
        let a: FieldValue = 10.into();
        let b: FieldValue = 10.0.into();
        let c: FieldValue = 11.into();

        assert_eq!(a.compare(&b), Some(Ordering::Equal));
        assert_eq!(a.compare(&c), Some(Ordering::Less));
        assert_eq!(c.compare(&a), Some(Ordering::Greater));
    }

    #[test]
    fn test_compare_strings() {
        let a: FieldValue = "apple".into();
        let b: FieldValue = "banana".into();

        assert_eq!(a.compare(&b), Some(Ordering::Less));
        assert_eq!(a.compare(&a.clone()), Some(Ordering::Equal));
    }

    #[test]
    fn test_compare_mixed_types() {
        let s: FieldValue = "10".into();
        let n: FieldValue = 10.into();
        let arr: FieldValue = vec![1].into();

        assert_eq!(s.compare(&n), None);
        assert_eq!(arr.compare(&n), None);
        assert_eq!(FieldValue::Null.compare(&n), None);
    }
}
