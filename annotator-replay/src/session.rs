//! Session documents.
//!
//! A session is everything a host would know about one image: the options,
//! where the image sits on the page, what has been committed already, and a
//! script of raw input events in page pixels.
//!
//! ```json
//! {
//!   "options": { "type": "RECTANGLE" },
//!   "surface": { "left": 0, "top": 0, "width": 400, "height": 200 },
//!   "annotations": [],
//!   "events": [
//!     { "event": "mouse_down", "x": 40, "y": 20 },
//!     { "event": "mouse_move", "x": 120, "y": 60 },
//!     { "event": "mouse_up", "x": 120, "y": 60 },
//!     { "event": "type", "text": "cat" },
//!     { "event": "submit" }
//!   ]
//! }
//! ```

use std::io::Read;
use std::path::Path;

use annotator_core::{Annotation, AnnotatorOptions, SurfaceRect, TouchPoint};
use serde::{Deserialize, Serialize};

use crate::error::{ReplayError, ReplayResult};

/// One scripted input, in page pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptedEvent {
    /// Mouse button pressed.
    MouseDown {
        /// Page x.
        x: f64,
        /// Page y.
        y: f64,
    },
    /// Mouse moved.
    MouseMove {
        /// Page x.
        x: f64,
        /// Page y.
        y: f64,
    },
    /// Mouse button released.
    MouseUp {
        /// Page x.
        x: f64,
        /// Page y.
        y: f64,
    },
    /// Mouse click.
    Click {
        /// Page x.
        x: f64,
        /// Page y.
        y: f64,
    },
    /// Mouse left the image.
    MouseLeave,
    /// Fingers down.
    TouchStart {
        /// Touches on the image.
        touches: Vec<TouchPoint>,
    },
    /// Fingers moved.
    TouchMove {
        /// Touches on the image.
        touches: Vec<TouchPoint>,
    },
    /// Fingers lifted.
    TouchEnd {
        /// Touches still on the image.
        #[serde(default)]
        touches: Vec<TouchPoint>,
    },
    /// Touch sequence cancelled by the platform.
    TouchCancel,
    /// Text typed into the editor.
    Type {
        /// Full editor text.
        text: String,
    },
    /// Editor submit button.
    Submit,
}

impl ScriptedEvent {
    /// Short name used in reports.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::MouseDown { .. } => "mouse_down",
            Self::MouseMove { .. } => "mouse_move",
            Self::MouseUp { .. } => "mouse_up",
            Self::Click { .. } => "click",
            Self::MouseLeave => "mouse_leave",
            Self::TouchStart { .. } => "touch_start",
            Self::TouchMove { .. } => "touch_move",
            Self::TouchEnd { .. } => "touch_end",
            Self::TouchCancel => "touch_cancel",
            Self::Type { .. } => "type",
            Self::Submit => "submit",
        }
    }
}

/// A replayable session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Annotator options.
    #[serde(default)]
    pub options: AnnotatorOptions,
    /// Page box of the image.
    pub surface: SurfaceRect,
    /// Already committed annotations.
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// Annotations to highlight regardless of hover.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_annotations: Option<Vec<Annotation>>,
    /// Input script, replayed in order.
    #[serde(default)]
    pub events: Vec<ScriptedEvent>,
}

impl Session {
    /// Parse a session from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::Json`] if the document is not a session.
    pub fn from_json(json: &str) -> ReplayResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a session from a file, or from stdin when `path` is `-`.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::Read`] if the source cannot be read and
    /// [`ReplayError::Json`] if it is not a session.
    pub fn load(path: &Path) -> ReplayResult<Self> {
        let json = if path.as_os_str() == "-" {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|source| ReplayError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
            buffer
        } else {
            std::fs::read_to_string(path).map_err(|source| ReplayError::Read {
                path: path.to_path_buf(),
                source,
            })?
        };
        tracing::debug!("Loaded session from {} ({} bytes)", path.display(), json.len());
        Self::from_json(&json)
    }
}
