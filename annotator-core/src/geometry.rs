//! Percentage-space geometry - the shapes annotations are stored in.
//!
//! Every coordinate in a [`Geometry`] is a percentage (0-100) of the image
//! surface, so annotations survive any rendered size. Pixel space only exists
//! transiently, through a [`Container`], while hit-testing and measuring.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag naming a shape kind (`"RECTANGLE"`, `"POINT"`, `"OVAL"` or any
/// user-registered kind).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeKind(Cow<'static, str>);

impl ShapeKind {
    /// Axis-aligned rectangle, anchored at its top-left corner.
    pub const RECTANGLE: Self = Self(Cow::Borrowed("RECTANGLE"));
    /// Single point placed with a click.
    pub const POINT: Self = Self(Cow::Borrowed("POINT"));
    /// Ellipse inscribed in its top-left anchored bounding box.
    pub const OVAL: Self = Self(Cow::Borrowed("OVAL"));

    /// Create a shape kind from any tag.
    #[must_use]
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self(tag.into())
    }

    /// The raw tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ShapeKind {
    fn default() -> Self {
        Self::RECTANGLE
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ShapeKind {
    fn from(tag: &'static str) -> Self {
        Self(Cow::Borrowed(tag))
    }
}

/// A position in percentage coordinates relative to the surface.
///
/// Values outside 0-100 are legal and mean the pointer is past an edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Percent of surface width from the left edge.
    pub x: f64,
    /// Percent of surface height from the top edge.
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel size of the rendered image surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Container {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Container {
    /// Create a container.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether the container has a usable (non-empty, finite) box.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Convert a percentage point into pixels.
    #[must_use]
    pub fn to_pixels(&self, point: Point) -> (f64, f64) {
        (point.x / 100.0 * self.width, point.y / 100.0 * self.height)
    }
}

/// Bounding box of a reference element in page pixels.
///
/// Raw pointer positions are measured against this box to produce
/// percentage coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceRect {
    /// Left edge in page pixels.
    pub left: f64,
    /// Top edge in page pixels.
    pub top: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl SurfaceRect {
    /// Create a surface box.
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// The pixel size of this box as a container.
    #[must_use]
    pub const fn container(&self) -> Container {
        Container::new(self.width, self.height)
    }
}

/// Pixel-space rectangle derived from a geometry and a container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl PixelBox {
    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    /// Area in square pixels.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Normalized shape descriptor.
///
/// `x,y` is the anchor: the top-left corner for rectangles and ovals, the
/// position itself for points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Shape kind tag.
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    /// Anchor X in percent.
    pub x: f64,
    /// Anchor Y in percent.
    pub y: f64,
    /// Width in percent.
    pub width: f64,
    /// Height in percent.
    pub height: f64,
}

impl Geometry {
    /// Create a geometry.
    #[must_use]
    pub fn new(kind: ShapeKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            kind,
            x,
            y,
            width,
            height,
        }
    }

    /// Zero-size geometry at a point.
    #[must_use]
    pub fn at(kind: ShapeKind, point: Point) -> Self {
        Self::new(kind, point.x, point.y, 0.0, 0.0)
    }

    /// Box spanned by two corners, with non-negative width and height
    /// whichever direction the drag went.
    #[must_use]
    pub fn spanning(kind: ShapeKind, anchor: Point, corner: Point) -> Self {
        let width = corner.x - anchor.x;
        let height = corner.y - anchor.y;
        Self {
            kind,
            x: if width > 0.0 { anchor.x } else { corner.x },
            y: if height > 0.0 { anchor.y } else { corner.y },
            width: width.abs(),
            height: height.abs(),
        }
    }

    /// This geometry's bounding box in pixels.
    #[must_use]
    pub fn to_pixels(&self, container: Container) -> PixelBox {
        PixelBox {
            x: self.x / 100.0 * container.width,
            y: self.y / 100.0 * container.height,
            width: self.width / 100.0 * container.width,
            height: self.height / 100.0 * container.height,
        }
    }

    /// Point directly below the shape where content and editor panels sit.
    #[must_use]
    pub fn caption_anchor(&self) -> Point {
        Point::new(self.x, self.y + self.height)
    }
}
