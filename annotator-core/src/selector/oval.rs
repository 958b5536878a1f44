//! Oval selector - an ellipse inscribed in a dragged bounding box.

use crate::{
    Annotation, AnnotatorResult, Container, Geometry, InputEvent, MouseEvent, Point, ShapeKind,
    TouchEvent,
};

use super::{drag, Outcome, Selector};

/// Ellipse drawn the same way as a rectangle; `x,y` is the top-left of its
/// bounding box.
#[derive(Debug, Clone, Copy, Default)]
pub struct OvalSelector;

impl Selector for OvalSelector {
    fn kind(&self) -> ShapeKind {
        ShapeKind::OVAL
    }

    fn intersects(&self, point: Point, geometry: &Geometry, container: Container) -> bool {
        let bounds = geometry.to_pixels(container);
        let rx = bounds.width / 2.0;
        let ry = bounds.height / 2.0;
        if rx <= 0.0 || ry <= 0.0 {
            return false;
        }
        let (px, py) = container.to_pixels(point);
        let dx = (px - (bounds.x + rx)) / rx;
        let dy = (py - (bounds.y + ry)) / ry;
        dx * dx + dy * dy <= 1.0
    }

    fn area(&self, geometry: &Geometry, container: Container) -> f64 {
        let bounds = geometry.to_pixels(container);
        std::f64::consts::PI * (bounds.width / 2.0) * (bounds.height / 2.0)
    }

    fn on_mouse_down(&self, value: &Annotation, event: &MouseEvent) -> AnnotatorResult<Outcome> {
        Ok(drag::pointer_down(value, &InputEvent::Mouse(*event)))
    }

    fn on_mouse_move(&self, value: &Annotation, event: &MouseEvent) -> AnnotatorResult<Outcome> {
        drag::pointer_move(&self.kind(), value, &InputEvent::Mouse(*event))
    }

    fn on_mouse_up(&self, value: &Annotation, event: &MouseEvent) -> AnnotatorResult<Outcome> {
        Ok(drag::pointer_up(value, &InputEvent::Mouse(*event)))
    }

    fn on_touch_start(&self, value: &Annotation, event: &TouchEvent) -> AnnotatorResult<Outcome> {
        Ok(drag::pointer_down(value, &InputEvent::Touch(event.clone())))
    }

    fn on_touch_move(&self, value: &Annotation, event: &TouchEvent) -> AnnotatorResult<Outcome> {
        drag::pointer_move(&self.kind(), value, &InputEvent::Touch(event.clone()))
    }

    fn on_touch_end(&self, value: &Annotation, event: &TouchEvent) -> AnnotatorResult<Outcome> {
        Ok(drag::pointer_up(value, &InputEvent::Touch(event.clone())))
    }
}
