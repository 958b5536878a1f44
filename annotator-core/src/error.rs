//! Error types for annotation operations.

use thiserror::Error;

use crate::ShapeKind;

/// Result type for annotation operations.
pub type AnnotatorResult<T> = Result<T, AnnotatorError>;

/// Errors that can occur in annotation operations.
///
/// None of these ever escape the interaction loop: the coordinator logs them
/// and drops the triggering event.
#[derive(Debug, Error)]
pub enum AnnotatorError {
    /// A drawing selection has no anchor to measure the drag from.
    #[error("Selection for {kind} is drawing but has no anchor")]
    MissingAnchor {
        /// Shape kind of the selector that saw the selection.
        kind: ShapeKind,
    },

    /// A selector method could not produce a result for the event.
    #[error("{method} of selector {kind} violated its contract: {reason}")]
    Contract {
        /// Method name (e.g. `onMouseUp`).
        method: &'static str,
        /// Shape kind of the offending selector.
        kind: ShapeKind,
        /// Why no result was produced.
        reason: String,
    },

    /// Annotation serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
