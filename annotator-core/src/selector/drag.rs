//! Two-phase drag shared by box-shaped selectors (rectangle, oval).
//!
//! Down anchors a corner, move stretches the box to the pointer, up either
//! hands the box to the editor or throws it away if it is too small.

use crate::pointer::normalize_on_target;
use crate::{
    Annotation, AnnotatorError, AnnotatorResult, Container, Geometry, InputEvent, SelectionMode,
    Selection, ShapeKind,
};

use super::Outcome;

/// Smallest committed box, in pixels along each axis. Anything smaller on
/// release is treated as a stray click and discarded.
pub const MIN_SELECTION_SIZE_PX: f64 = 2.0;

pub(super) fn pointer_down(value: &Annotation, event: &InputEvent) -> Outcome {
    let Some(anchor) = normalize_on_target(event) else {
        return Outcome::Unchanged;
    };
    if value.selection.is_some() {
        tracing::debug!("Abandoning in-progress annotation {:?}", value.data.id);
    }
    Outcome::Changed(Annotation {
        selection: Some(Selection::drawing(anchor)),
        ..Annotation::default()
    })
}

pub(super) fn pointer_move(
    kind: &ShapeKind,
    value: &Annotation,
    event: &InputEvent,
) -> AnnotatorResult<Outcome> {
    let Some(selection) = value
        .selection
        .as_ref()
        .filter(|s| s.mode == SelectionMode::Drawing)
    else {
        return Ok(Outcome::Unchanged);
    };
    let anchor = selection
        .anchor()
        .ok_or_else(|| AnnotatorError::MissingAnchor { kind: kind.clone() })?;
    let Some(corner) = normalize_on_target(event) else {
        return Ok(Outcome::Unchanged);
    };

    Ok(Outcome::Changed(Annotation {
        geometry: Some(Geometry::spanning(kind.clone(), anchor, corner)),
        ..value.clone()
    }))
}

pub(super) fn pointer_up(value: &Annotation, event: &InputEvent) -> Outcome {
    let Some(selection) = &value.selection else {
        return Outcome::Unchanged;
    };
    if selection.mode != SelectionMode::Drawing {
        return Outcome::Unchanged;
    }

    match &value.geometry {
        Some(geometry) if is_large_enough(geometry, event.target().container()) => {
            Outcome::Changed(Annotation {
                selection: Some(selection.clone().into_editing()),
                ..value.clone()
            })
        }
        _ => {
            tracing::debug!("Discarding draw below {MIN_SELECTION_SIZE_PX}px");
            Outcome::Changed(Annotation::default())
        }
    }
}

fn is_large_enough(geometry: &Geometry, container: Container) -> bool {
    let pixels = geometry.to_pixels(container);
    pixels.width >= MIN_SELECTION_SIZE_PX && pixels.height >= MIN_SELECTION_SIZE_PX
}
