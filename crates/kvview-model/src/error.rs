use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SnapshotError>;

/// Failure to obtain a storage snapshot.
///
/// Model operations themselves never fail; only producing a snapshot can.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "serde")]
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate key in snapshot: {key}")]
    DuplicateKey { key: String },

    #[error("value for key {key} is not a string ({kind})")]
    NonStringValue { key: String, kind: &'static str },
}

impl SnapshotError {
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
