//! Error types for key-value stores

use std::path::PathBuf;

/// Errors raised by a [`KeyValueStore`](crate::KeyValueStore)
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Storage is switched off (private browsing, permissions)
    #[error("storage unavailable")]
    Unavailable,

    /// Write would exceed the store's capacity
    #[error("storage quota exceeded: {needed} bytes needed, {limit} allowed")]
    QuotaExceeded {
        /// Bytes the store would hold after the write
        needed: usize,
        /// Capacity in bytes
        limit: usize,
    },

    /// Key cannot be mapped onto the backing storage
    #[error("invalid key: '{0}'")]
    InvalidKey(String),

    /// IO error on a file-backed store
    #[error("io error on {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Value could not be encoded
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
