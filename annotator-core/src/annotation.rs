//! Annotations - a geometry plus payload, with optional in-progress selection state.

use serde::{Deserialize, Serialize};

use crate::{AnnotatorError, AnnotatorResult, Geometry, Point};

/// Stage of an in-progress annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionMode {
    /// Pointer is down and the shape follows the drag.
    Drawing,
    /// Shape is placed; the editor is collecting payload.
    Editing,
}

/// Selection state, present only while an annotation is drawn or edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// Current stage.
    pub mode: SelectionMode,
    /// Whether the editor should be shown.
    #[serde(default)]
    pub show_editor: bool,
    /// Drag anchor X in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_x: Option<f64>,
    /// Drag anchor Y in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_y: Option<f64>,
}

impl Selection {
    /// Drawing selection anchored at `anchor`.
    #[must_use]
    pub fn drawing(anchor: Point) -> Self {
        Self {
            mode: SelectionMode::Drawing,
            show_editor: false,
            anchor_x: Some(anchor.x),
            anchor_y: Some(anchor.y),
        }
    }

    /// The drag anchor, if both coordinates are known.
    #[must_use]
    pub fn anchor(&self) -> Option<Point> {
        Some(Point::new(self.anchor_x?, self.anchor_y?))
    }

    /// Move this selection into editing with the editor shown.
    #[must_use]
    pub fn into_editing(self) -> Self {
        Self {
            mode: SelectionMode::Editing,
            show_editor: true,
            ..self
        }
    }
}

/// Payload carried by an annotation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationData {
    /// Optional identifier assigned by whoever owns the annotation list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Text entered in the editor.
    #[serde(default)]
    pub text: String,
    /// Any other payload keys, kept verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A region of interest on the image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Shape; absent until the user starts drawing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
    /// Payload.
    #[serde(default)]
    pub data: AnnotationData,
    /// Present only while drawing or editing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<Selection>,
}

impl Annotation {
    /// A committed annotation with geometry and text.
    #[must_use]
    pub fn new(geometry: Geometry, text: impl Into<String>) -> Self {
        Self {
            geometry: Some(geometry),
            data: AnnotationData {
                text: text.into(),
                ..AnnotationData::default()
            },
            selection: None,
        }
    }

    /// Set the payload id.
    #[must_use]
    pub fn with_id(mut self, id: u64) -> Self {
        self.data.id = Some(id);
        self
    }

    /// Copy of this annotation with replaced text.
    #[must_use]
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.data.text = text.into();
        next
    }

    /// Whether the editor should be shown for this annotation.
    ///
    /// Requires a geometry to position the editor against.
    #[must_use]
    pub fn shows_editor(&self) -> bool {
        self.geometry.is_some() && self.selection.as_ref().is_some_and(|s| s.show_editor)
    }

    /// Current selection mode, if any.
    #[must_use]
    pub fn mode(&self) -> Option<SelectionMode> {
        self.selection.as_ref().map(|s| s.mode)
    }

    /// Serialize to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> AnnotatorResult<String> {
        serde_json::to_string(self).map_err(AnnotatorError::Serialization)
    }

    /// Deserialize from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> AnnotatorResult<Self> {
        serde_json::from_str(json).map_err(AnnotatorError::Serialization)
    }
}

/// A list of annotations as exchanged with the outside world.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSet {
    /// Committed annotations.
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl AnnotationSet {
    /// Serialize to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> AnnotatorResult<String> {
        serde_json::to_string(self).map_err(AnnotatorError::Serialization)
    }

    /// Deserialize from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> AnnotatorResult<Self> {
        serde_json::from_str(json).map_err(AnnotatorError::Serialization)
    }
}
