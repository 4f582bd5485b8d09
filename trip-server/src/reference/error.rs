//! Reference data error types.

use std::path::PathBuf;

use crate::domain::IataCode;

/// Errors that can occur when loading a reference snapshot.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    /// Snapshot file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot is not valid JSON or has the wrong shape
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The same city code appears twice
    #[error("duplicate city {0}")]
    DuplicateCity(IataCode),
}
