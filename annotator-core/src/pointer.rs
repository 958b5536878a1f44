//! Coordinate normalization - raw page pixels to surface percentages.

use crate::{InputEvent, MouseEvent, Point, SurfaceRect, TouchEvent};

/// Convert a page-pixel position into percentages of `reference`.
///
/// Returns `None` when the reference box has no usable size. Positions past
/// an edge are not clamped.
#[must_use]
pub fn relative_position(x: f64, y: f64, reference: &SurfaceRect) -> Option<Point> {
    if !reference.container().is_usable() {
        return None;
    }
    let offset_x = x - reference.left;
    let offset_y = y - reference.top;
    Some(Point::new(
        offset_x / reference.width * 100.0,
        offset_y / reference.height * 100.0,
    ))
}

/// Normalize a mouse event against `reference`.
#[must_use]
pub fn normalize_mouse(event: &MouseEvent, reference: &SurfaceRect) -> Option<Point> {
    relative_position(event.x, event.y, reference)
}

/// Normalize a touch event against `reference`.
///
/// Only a single concurrent touch is honoured; anything else yields `None`.
#[must_use]
pub fn normalize_touch(event: &TouchEvent, reference: &SurfaceRect) -> Option<Point> {
    let touch = event.single_touch()?;
    relative_position(touch.x, touch.y, reference)
}

/// Normalize any input event against `reference`.
#[must_use]
pub fn normalize(event: &InputEvent, reference: &SurfaceRect) -> Option<Point> {
    match event {
        InputEvent::Mouse(mouse) => normalize_mouse(mouse, reference),
        InputEvent::Touch(touch) => normalize_touch(touch, reference),
    }
}

/// Normalize an event against the element it targeted.
#[must_use]
pub fn normalize_on_target(event: &InputEvent) -> Option<Point> {
    normalize(event, &event.target())
}

/// Tracks where the pointer currently is over the surface.
///
/// `position()` is `None` while the pointer is away from the surface; that
/// means "no hit possible", never the origin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RelativePointer {
    position: Option<Point>,
}

impl RelativePointer {
    /// Create a tracker with no position.
    #[must_use]
    pub const fn new() -> Self {
        Self { position: None }
    }

    /// Current position, if the pointer is over the surface.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        self.position
    }

    /// Update from a mouse move.
    pub fn on_mouse_move(&mut self, event: &MouseEvent, reference: &SurfaceRect) {
        self.position = normalize_mouse(event, reference);
    }

    /// Update from a touch move.
    ///
    /// Multi-touch moves leave the previous position in place.
    pub fn on_touch_move(&mut self, event: &TouchEvent, reference: &SurfaceRect) {
        if event.single_touch().is_none() {
            return;
        }
        self.position = normalize_touch(event, reference);
    }

    /// Pointer left the surface (mouse leave or touch cancel).
    pub fn on_leave(&mut self) {
        self.position = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TouchPhase, TouchPoint};

    fn surface() -> SurfaceRect {
        SurfaceRect::new(100.0, 50.0, 400.0, 200.0)
    }

    fn touch_move(points: &[(f64, f64)]) -> TouchEvent {
        TouchEvent::new(
            TouchPhase::Move,
            points
                .iter()
                .zip(0..)
                .map(|(&(x, y), id)| TouchPoint { id, x, y })
                .collect(),
            surface(),
        )
    }

    #[test]
    fn mouse_position_is_percent_of_reference() {
        let event = MouseEvent::new(300.0, 100.0, surface());
        assert_eq!(normalize_mouse(&event, &surface()), Some(Point::new(50.0, 25.0)));
    }

    #[test]
    fn positions_outside_are_not_clamped() {
        let event = MouseEvent::new(50.0, 500.0, surface());
        let point = normalize_mouse(&event, &surface()).expect("usable surface");
        assert!(point.x < 0.0);
        assert!(point.y > 100.0);
    }

    #[test]
    fn zero_sized_reference_yields_none() {
        let empty = SurfaceRect::new(0.0, 0.0, 0.0, 100.0);
        let event = MouseEvent::new(10.0, 10.0, empty);
        assert_eq!(normalize_mouse(&event, &empty), None);
    }

    #[test]
    fn multi_touch_does_not_normalize() {
        let event = touch_move(&[(150.0, 60.0), (200.0, 70.0)]);
        assert_eq!(normalize_touch(&event, &surface()), None);
    }

    #[test]
    fn multi_touch_keeps_previous_position() {
        let mut pointer = RelativePointer::new();
        pointer.on_touch_move(&touch_move(&[(300.0, 150.0)]), &surface());
        let before = pointer.position();
        assert_eq!(before, Some(Point::new(50.0, 50.0)));

        pointer.on_touch_move(&touch_move(&[(100.0, 50.0), (500.0, 250.0)]), &surface());
        pointer.on_touch_move(&touch_move(&[]), &surface());
        assert_eq!(pointer.position(), before);
    }

    #[test]
    fn leave_resets_to_none() {
        let mut pointer = RelativePointer::new();
        pointer.on_mouse_move(&MouseEvent::new(100.0, 50.0, surface()), &surface());
        assert_eq!(pointer.position(), Some(Point::new(0.0, 0.0)));

        pointer.on_leave();
        assert_eq!(pointer.position(), None);
    }

    #[test]
    fn normalize_on_target_uses_event_box() {
        let event = InputEvent::from(MouseEvent::new(
            20.0,
            20.0,
            SurfaceRect::new(0.0, 0.0, 40.0, 80.0),
        ));
        assert_eq!(normalize_on_target(&event), Some(Point::new(50.0, 25.0)));
    }
}
