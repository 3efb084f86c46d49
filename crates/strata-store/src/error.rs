//! Error types for document store backends.

/// Errors that can occur when working with a document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend is not reachable or the call failed in transit.
    #[error("backend unavailable: {reason}")]
    Unavailable { reason: String },

    /// A single-record operation targeted an id that does not exist.
    #[error("record not found: {collection}/{id}")]
    RecordNotFound { collection: String, id: String },

    /// The requested collection does not exist.
    #[error("collection not found: {0}")]
    CollectionNotFound(String),

    /// The query descriptor is malformed or uses an unsupported operator.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A document could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Creates a new Unavailable error.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Creates a new RecordNotFound error.
    pub fn record_not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::RecordNotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Creates a new InvalidQuery error.
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    /// Returns true if this is a transient error that might succeed on retry.
    ///
    /// No retry is performed anywhere in this crate; the classification is
    /// offered to callers that add their own resilience.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    /// Returns true if this error indicates a missing record or collection.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecordNotFound { .. } | Self::CollectionNotFound(_))
    }
}
