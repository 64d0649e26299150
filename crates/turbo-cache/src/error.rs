//! Cache error types.

use thiserror::Error;

/// Errors that can occur when using the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to serialize a value before storing it.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// A stored value could not be read back as the requested type.
    #[error("Failed to decode cached value for key {key}: {source}")]
    DecodeError {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
