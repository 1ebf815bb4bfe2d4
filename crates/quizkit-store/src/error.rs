//! Store error types.
//!
//! Not-found and validation are not errors here: absent records surface as
//! `Ok(None)` or `Ok(false)` from the repository traits. `StoreError` covers
//! the storage itself, so an unreadable backing document is reported as such
//! instead of being silently treated as an empty collection.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur when touching the durable store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing document could not be read or written.
    #[error("storage unavailable at {path}: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing document exists but could not be decoded.
    #[error("collection document corrupt at {path}: {detail}")]
    Corrupt { path: PathBuf, detail: String },

    /// A record could not be serialized.
    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn unavailable(path: &Path, source: std::io::Error) -> Self {
        StoreError::Unavailable {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn corrupt(path: &Path, detail: impl Into<String>) -> Self {
        StoreError::Corrupt {
            path: path.to_path_buf(),
            detail: detail.into(),
        }
    }

    /// Returns `true` if the storage location itself was unreachable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable { .. })
    }

    /// Returns `true` if the backing document was present but undecodable.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::Corrupt { .. })
    }
}
