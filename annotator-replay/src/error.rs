//! Error types for annotator-replay.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or replaying a session.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The session file could not be read.
    #[error("failed to read session {path}: {source}")]
    Read {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The session could not be parsed or the report could not be written.
    #[error("session JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The session's surface box cannot be hit-tested against.
    #[error("session surface has no area: {width}x{height}")]
    EmptySurface {
        /// Surface width in pixels.
        width: f64,
        /// Surface height in pixels.
        height: f64,
    },

    /// Committed annotations already use the largest id, so none is left to
    /// assign.
    #[error("no annotation ids left after {max_id}")]
    IdsExhausted {
        /// Largest id in the session.
        max_id: u64,
    },
}

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;
