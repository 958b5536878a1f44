//! # Annotator Core
//!
//! Geometry and interaction core for drawing, editing and hover-highlighting
//! regions of interest over a 2-D image. Compiles to WASM.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │             annotator-core.wasm             │
//! ├─────────────────────────────────────────────┤
//! │  Annotator (interaction coordinator)        │
//! │  - gesture dispatch   - hover tracking      │
//! │  - render passes      - touch lifecycle     │
//! ├──────────────────────┬──────────────────────┤
//! │  Selector Registry   │  Hit Resolution      │
//! │  - Rectangle         │  - topmost by area   │
//! │  - Point             │  - active state      │
//! │  - Oval / custom     │                      │
//! ├──────────────────────┴──────────────────────┤
//! │  Coordinate Normalizer (page px -> percent) │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Annotations are stored in percentages of the image surface; pixels only
//! appear transiently while hit-testing against the mounted surface.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod annotation;
pub mod annotator;
pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod hit;
pub mod pointer;
pub mod registry;
pub mod render;
pub mod selector;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use annotation::{Annotation, AnnotationData, AnnotationSet, Selection, SelectionMode};
pub use annotator::{Annotator, Dispatch, TouchResponse};
pub use config::{AnnotatorConfig, AnnotatorOptions, EventOverrides};
pub use error::{AnnotatorError, AnnotatorResult};
pub use event::{InputEvent, Method, MouseEvent, TouchEvent, TouchPhase, TouchPoint};
pub use geometry::{Container, Geometry, PixelBox, Point, ShapeKind, SurfaceRect};
pub use hit::{is_active, top_intersecting, ActiveSet, Comparator};
pub use registry::SelectorRegistry;
pub use render::{Frame, Renderer};
pub use selector::{OvalSelector, Outcome, PointSelector, RectangleSelector, Selector};

/// Annotator core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
