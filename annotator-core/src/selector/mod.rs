//! Selectors - per-shape hit testing, measurement and gesture handling.
//!
//! A [`Selector`] is the whole behaviour of one shape kind. The interaction
//! loop never inspects geometry itself; it resolves the selector for a kind
//! through the [`SelectorRegistry`](crate::SelectorRegistry) and calls it.
//!
//! Gesture methods return an explicit [`Outcome`]. A selector that cannot
//! produce one returns an error instead, which the coordinator logs and
//! drops without touching the annotation.

mod drag;
mod oval;
mod point;
mod rectangle;

pub use drag::MIN_SELECTION_SIZE_PX;
pub use oval::OvalSelector;
pub use point::{PointSelector, POINT_AREA, POINT_HIT_RADIUS_PX};
pub use rectangle::RectangleSelector;

use crate::{
    Annotation, AnnotatorResult, Container, Geometry, MouseEvent, Point, ShapeKind, TouchEvent,
};

/// Result of a selector gesture method.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The in-progress annotation becomes this value.
    Changed(Annotation),
    /// The event does not affect the in-progress annotation.
    Unchanged,
}

impl Outcome {
    /// The new annotation, if the outcome is a change.
    #[must_use]
    pub fn into_changed(self) -> Option<Annotation> {
        match self {
            Self::Changed(annotation) => Some(annotation),
            Self::Unchanged => None,
        }
    }
}

/// Behaviour of one shape kind.
///
/// Gesture methods default to [`Outcome::Unchanged`]; implement only the
/// ones the shape responds to. Every method receives the current in-progress
/// annotation and must return a new value rather than mutate it.
#[allow(unused_variables)]
pub trait Selector {
    /// Shape kind this selector handles.
    fn kind(&self) -> ShapeKind;

    /// Whether `point` (in percent) lies on `geometry`, measured in the
    /// pixel space of `container`.
    fn intersects(&self, point: Point, geometry: &Geometry, container: Container) -> bool;

    /// Rendered area of `geometry` in square pixels.
    fn area(&self, geometry: &Geometry, container: Container) -> f64;

    /// Mouse button pressed.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector cannot produce an outcome.
    fn on_mouse_down(&self, value: &Annotation, event: &MouseEvent) -> AnnotatorResult<Outcome> {
        Ok(Outcome::Unchanged)
    }

    /// Mouse moved.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector cannot produce an outcome.
    fn on_mouse_move(&self, value: &Annotation, event: &MouseEvent) -> AnnotatorResult<Outcome> {
        Ok(Outcome::Unchanged)
    }

    /// Mouse button released.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector cannot produce an outcome.
    fn on_mouse_up(&self, value: &Annotation, event: &MouseEvent) -> AnnotatorResult<Outcome> {
        Ok(Outcome::Unchanged)
    }

    /// Click.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector cannot produce an outcome.
    fn on_click(&self, value: &Annotation, event: &MouseEvent) -> AnnotatorResult<Outcome> {
        Ok(Outcome::Unchanged)
    }

    /// First finger down.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector cannot produce an outcome.
    fn on_touch_start(&self, value: &Annotation, event: &TouchEvent) -> AnnotatorResult<Outcome> {
        Ok(Outcome::Unchanged)
    }

    /// Finger moved.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector cannot produce an outcome.
    fn on_touch_move(&self, value: &Annotation, event: &TouchEvent) -> AnnotatorResult<Outcome> {
        Ok(Outcome::Unchanged)
    }

    /// Finger lifted.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector cannot produce an outcome.
    fn on_touch_end(&self, value: &Annotation, event: &TouchEvent) -> AnnotatorResult<Outcome> {
        Ok(Outcome::Unchanged)
    }
}
