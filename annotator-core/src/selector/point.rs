//! Point selector - a single click places a marker.

use crate::pointer::normalize_mouse;
use crate::{
    Annotation, AnnotatorResult, Container, Geometry, MouseEvent, Point, Selection, SelectionMode,
    ShapeKind,
};

use super::{Outcome, Selector};

/// Pixel radius around a point that still counts as a hit.
///
/// A point geometry has zero size, so its clickable area is the marker
/// drawn around it rather than the geometry itself.
pub const POINT_HIT_RADIUS_PX: f64 = 6.0;

/// Area reported for every point. Being the smallest possible area, points
/// win hover ties against any shape they sit on.
pub const POINT_AREA: f64 = 0.0;

/// Point placed with a click; no drag phase.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointSelector;

impl Selector for PointSelector {
    fn kind(&self) -> ShapeKind {
        ShapeKind::POINT
    }

    fn intersects(&self, point: Point, geometry: &Geometry, container: Container) -> bool {
        let (px, py) = container.to_pixels(point);
        let (gx, gy) = container.to_pixels(Point::new(geometry.x, geometry.y));
        let (dx, dy) = (px - gx, py - gy);
        dx * dx + dy * dy <= POINT_HIT_RADIUS_PX * POINT_HIT_RADIUS_PX
    }

    fn area(&self, _geometry: &Geometry, _container: Container) -> f64 {
        POINT_AREA
    }

    fn on_click(&self, value: &Annotation, event: &MouseEvent) -> AnnotatorResult<Outcome> {
        if value.geometry.is_some() {
            // A second click abandons the pending point.
            return Ok(Outcome::Changed(Annotation::default()));
        }
        let Some(position) = normalize_mouse(event, &event.target) else {
            return Ok(Outcome::Unchanged);
        };

        Ok(Outcome::Changed(Annotation {
            geometry: Some(Geometry::at(self.kind(), position)),
            data: value.data.clone(),
            selection: Some(Selection {
                mode: SelectionMode::Editing,
                show_editor: true,
                anchor_x: None,
                anchor_y: None,
            }),
        }))
    }
}
