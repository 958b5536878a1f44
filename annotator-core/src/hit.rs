//! Hover resolution - which annotation is under the pointer, and which
//! annotations render as active.

use std::rc::Rc;

use crate::{Annotation, Container, Point, SelectorRegistry};

/// Equality predicate deciding membership of the external active set.
pub type Comparator = Rc<dyn Fn(&Annotation, &Annotation) -> bool>;

/// Comparator used when none is configured: structural equality.
#[must_use]
pub fn default_comparator() -> Comparator {
    Rc::new(|a: &Annotation, b: &Annotation| a == b)
}

/// Find the topmost annotation under `point`.
///
/// Candidates are annotations whose selector reports an intersection; the one
/// with the smallest rendered area wins, equal areas keep list order. Returns
/// `None` with no pointer position, no usable container, or no hit.
/// Annotations without geometry or without a registered selector never hit.
#[must_use]
pub fn top_intersecting<'a>(
    point: Option<Point>,
    annotations: &'a [Annotation],
    registry: &SelectorRegistry,
    container: Option<Container>,
) -> Option<&'a Annotation> {
    let point = point?;
    let container = container.filter(Container::is_usable)?;

    let mut hits: Vec<(&Annotation, f64)> = annotations
        .iter()
        .filter_map(|annotation| {
            let geometry = annotation.geometry.as_ref()?;
            let selector = registry.resolve(&geometry.kind)?;
            selector
                .intersects(point, geometry, container)
                .then(|| (annotation, selector.area(geometry, container)))
        })
        .collect();

    // Stable sort: equal areas keep list order
    hits.sort_by(|a, b| a.1.total_cmp(&b.1));

    hits.first().map(|(annotation, _)| *annotation)
}

/// An externally supplied set of annotations to render as active.
#[derive(Clone)]
pub struct ActiveSet<'a> {
    members: &'a [Annotation],
    comparator: &'a Comparator,
}

impl<'a> ActiveSet<'a> {
    /// Active set matched with `comparator`.
    #[must_use]
    pub fn new(members: &'a [Annotation], comparator: &'a Comparator) -> Self {
        Self {
            members,
            comparator,
        }
    }

    /// Whether any member matches `annotation`.
    #[must_use]
    pub fn contains(&self, annotation: &Annotation) -> bool {
        self.members
            .iter()
            .any(|member| (self.comparator)(annotation, member))
    }
}

/// Whether `annotation` should render as active.
///
/// The hover hit is compared by identity, so it activates even when the
/// active set's comparator would not match it.
#[must_use]
pub fn is_active(
    annotation: &Annotation,
    top: Option<&Annotation>,
    active: Option<&ActiveSet<'_>>,
) -> bool {
    let hovered = top.is_some_and(|top| std::ptr::eq(top, annotation));
    match active {
        Some(set) => hovered || set.contains(annotation),
        None => hovered,
    }
}
