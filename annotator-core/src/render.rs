//! Render callback contract.
//!
//! Drawing is delegated entirely to a [`Renderer`]. The annotator decides
//! *what* to draw on each pass and in which order; the renderer turns each
//! request into whatever drawable unit the host uses.

use std::fmt;
use std::rc::Rc;

use crate::{Annotation, ShapeKind};

/// Callback receiving an updated in-progress annotation.
pub type ChangeHandler = Rc<dyn Fn(Annotation)>;

/// Callback receiving the annotation being submitted.
pub type SubmitHandler = Rc<dyn Fn(Annotation)>;

/// Request to draw a committed annotation's highlight.
#[derive(Debug, Clone, Copy)]
pub struct HighlightProps<'a> {
    /// Annotation to highlight.
    pub annotation: &'a Annotation,
    /// Whether it is hovered or in the active set.
    pub active: bool,
}

/// Request to draw an active annotation's content panel.
#[derive(Debug, Clone, Copy)]
pub struct ContentProps<'a> {
    /// Annotation whose payload to show.
    pub annotation: &'a Annotation,
}

/// Request to draw the in-progress shape.
#[derive(Debug, Clone, Copy)]
pub struct SelectorProps<'a> {
    /// In-progress annotation; always has a geometry.
    pub annotation: &'a Annotation,
}

/// Request to draw the editor for the in-progress annotation.
pub struct EditorProps<'a> {
    /// Annotation being edited.
    pub annotation: &'a Annotation,
    /// Forward an edited annotation (e.g. from [`Annotation::with_text`]).
    pub on_change: ChangeHandler,
    /// Submit the annotation as it currently stands.
    pub on_submit: Rc<dyn Fn()>,
}

impl fmt::Debug for EditorProps<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorProps")
            .field("annotation", self.annotation)
            .finish_non_exhaustive()
    }
}

/// Request to draw the instruction overlay.
#[derive(Debug, Clone, Copy)]
pub struct OverlayProps<'a> {
    /// Shape kind currently being drawn.
    pub kind: &'a ShapeKind,
    /// In-progress annotation.
    pub annotation: &'a Annotation,
}

/// Host-provided drawing callbacks.
pub trait Renderer {
    /// Drawable unit produced by each callback.
    type Output;

    /// Once per committed annotation.
    fn render_highlight(&mut self, props: HighlightProps<'_>) -> Self::Output;

    /// Once per active annotation.
    fn render_content(&mut self, props: ContentProps<'_>) -> Self::Output;

    /// For the in-progress annotation once it has a geometry.
    fn render_selector(&mut self, props: SelectorProps<'_>) -> Self::Output;

    /// While the in-progress annotation has its editor shown.
    fn render_editor(&mut self, props: EditorProps<'_>) -> Self::Output;

    /// Every pass unless the overlay is disabled.
    fn render_overlay(&mut self, props: OverlayProps<'_>) -> Self::Output;
}

/// Everything drawn in one pass, grouped by layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<T> {
    /// One per committed annotation, in list order.
    pub highlights: Vec<T>,
    /// In-progress shape.
    pub selector: Option<T>,
    /// Instruction overlay.
    pub overlay: Option<T>,
    /// One per active annotation, in list order.
    pub contents: Vec<T>,
    /// Editor for the in-progress annotation.
    pub editor: Option<T>,
}

impl<T> Default for Frame<T> {
    fn default() -> Self {
        Self {
            highlights: Vec::new(),
            selector: None,
            overlay: None,
            contents: Vec::new(),
            editor: None,
        }
    }
}

impl<T> Frame<T> {
    /// All drawables in paint order, bottom to top.
    pub fn into_layers(self) -> impl Iterator<Item = T> {
        self.highlights
            .into_iter()
            .chain(self.selector)
            .chain(self.overlay)
            .chain(self.contents)
            .chain(self.editor)
    }
}

/// Instruction text shown by the default overlay for `kind`.
#[must_use]
pub fn overlay_hint(kind: &ShapeKind) -> &'static str {
    if *kind == ShapeKind::POINT {
        "Click to Annotate"
    } else {
        "Click and Drag to Annotate"
    }
}
