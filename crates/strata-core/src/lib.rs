//! Strata Core - Domain types for schemaless documents
//!
//! This crate provides the foundational types for the Strata query cache:
//! dynamic field values, ordered documents, and the collection/record
//! identifier newtypes shared by the store and cache layers.

pub mod document;
pub mod error;
pub mod types;
pub mod value;

// Re-exports
pub use document::Document;
pub use error::{Result, StrataError};
pub use types::{Collection, RecordId};
pub use value::FieldValue;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_defined() {
        assert!(!version().is_empty());
    }

    #[test]
    fn version_is_semver() {
        let v = version();
        assert_eq!(v.split('.').count(), 3, "Version should be semver");
    }
}
