//! Axis-aligned rectangle selector.

use crate::{
    Annotation, AnnotatorResult, Container, Geometry, InputEvent, MouseEvent, Point, ShapeKind,
    TouchEvent,
};

use super::{drag, Outcome, Selector};

/// Rectangle drawn by dragging from one corner to the opposite one.
#[derive(Debug, Clone, Copy, Default)]
pub struct RectangleSelector;

impl Selector for RectangleSelector {
    fn kind(&self) -> ShapeKind {
        ShapeKind::RECTANGLE
    }

    fn intersects(&self, point: Point, geometry: &Geometry, container: Container) -> bool {
        let (px, py) = container.to_pixels(point);
        geometry.to_pixels(container).contains(px, py)
    }

    fn area(&self, geometry: &Geometry, container: Container) -> f64 {
        geometry.to_pixels(container).area()
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SelectionMode, SurfaceRect, TouchPhase, TouchPoint};
    use proptest::prelude::*;

    const SURFACE: SurfaceRect = SurfaceRect::new(0.0, 0.0, 100.0, 100.0);

    fn mouse(x: f64, y: f64) -> MouseEvent {
        MouseEvent::new(x, y, SURFACE)
    }

    fn draw(from: (f64, f64), to: (f64, f64)) -> Annotation {
        let selector = RectangleSelector;
        let value = selector
            .on_mouse_down(&Annotation::default(), &mouse(from.0, from.1))
            .expect("no error")
            .into_changed()
            .expect("press anchors");
        let value = selector
            .on_mouse_move(&value, &mouse(to.0, to.1))
            .expect("no error")
            .into_changed()
            .expect("move changes geometry");
        selector
            .on_mouse_up(&value, &mouse(to.0, to.1))
            .expect("no error")
            .into_changed()
            .expect("release changes mode")
    }

    #[test]
    fn draw_cycle_produces_box_in_editing() {
        let annotation = draw((10.0, 10.0), (40.0, 30.0));
        assert_eq!(
            annotation.geometry,
            Some(Geometry::new(ShapeKind::RECTANGLE, 10.0, 10.0, 30.0, 20.0))
        );
        let selection = annotation.selection.expect("selection");
        assert_eq!(selection.mode, SelectionMode::Editing);
        assert!(selection.show_editor);
    }

    #[test]
    fn reversed_drag_yields_same_box() {
        assert_eq!(
            draw((40.0, 30.0), (10.0, 10.0)).geometry,
            draw((10.0, 10.0), (40.0, 30.0)).geometry
        );
    }

    #[test]
    fn touch_drag_matches_mouse_drag() {
        let selector = RectangleSelector;
        let touch = |phase, points: Vec<(f64, f64)>| {
            TouchEvent::new(
                phase,
                points
                    .into_iter()
                    .map(|(x, y)| TouchPoint { id: 0, x, y })
                    .collect(),
                SURFACE,
            )
        };

        let value = selector
            .on_touch_start(&Annotation::default(), &touch(TouchPhase::Start, vec![(10.0, 10.0)]))
            .expect("no error")
            .into_changed()
            .expect("anchored");
        let value = selector
            .on_touch_move(&value, &touch(TouchPhase::Move, vec![(40.0, 30.0)]))
            .expect("no error")
            .into_changed()
            .expect("moved");
        let value = selector
            .on_touch_end(&value, &touch(TouchPhase::End, vec![]))
            .expect("no error")
            .into_changed()
            .expect("released");

        assert_eq!(value, draw((10.0, 10.0), (40.0, 30.0)));
    }

    #[test]
    fn edges_count_as_inside() {
        let g = Geometry::new(ShapeKind::RECTANGLE, 10.0, 10.0, 30.0, 20.0);
        let c = Container::new(500.0, 300.0);
        assert!(RectangleSelector.intersects(Point::new(10.0, 10.0), &g, c));
        assert!(RectangleSelector.intersects(Point::new(40.0, 30.0), &g, c));
        assert!(!RectangleSelector.intersects(Point::new(40.1, 30.0), &g, c));
    }

    proptest! {
        #[test]
        fn area_is_pixel_width_times_height(
            x in 0.0f64..100.0, y in 0.0f64..100.0,
            w in 0.0f64..100.0, h in 0.0f64..100.0,
            cw in 1.0f64..4000.0, ch in 1.0f64..4000.0,
        ) {
            let g = Geometry::new(ShapeKind::RECTANGLE, x, y, w, h);
            let c = Container::new(cw, ch);
            let expected = (w / 100.0 * cw) * (h / 100.0 * ch);
            let area = RectangleSelector.area(&g, c);
            prop_assert!((area - expected).abs() <= 1e-6 * expected.max(1.0));
        }

        #[test]
        fn strictly_inside_hits_strictly_outside_misses(
            x in 0.0f64..80.0, y in 0.0f64..80.0,
            w in 1.0f64..20.0, h in 1.0f64..20.0,
            fx in 0.01f64..0.99, fy in 0.01f64..0.99,
            out in 0.01f64..50.0,
            cw in 10.0f64..4000.0, ch in 10.0f64..4000.0,
        ) {
            let g = Geometry::new(ShapeKind::RECTANGLE, x, y, w, h);
            let c = Container::new(cw, ch);
            let inside = Point::new(x + fx * w, y + fy * h);
            prop_assert!(RectangleSelector.intersects(inside, &g, c));

            let right = Point::new(x + w + out, y + fy * h);
            let above = Point::new(x + fx * w, y - out);
            prop_assert!(!RectangleSelector.intersects(right, &g, c));
            prop_assert!(!RectangleSelector.intersects(above, &g, c));
        }
    }
}
