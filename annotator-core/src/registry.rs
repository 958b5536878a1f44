//! Ordered registry of selectors keyed by shape kind.

use std::fmt;

use crate::selector::{OvalSelector, PointSelector, RectangleSelector, Selector};
use crate::ShapeKind;

/// Registered selectors, in registration order.
///
/// A lookup miss is not an error: callers treat it as "nothing to do".
pub struct SelectorRegistry {
    selectors: Vec<Box<dyn Selector>>,
}

impl SelectorRegistry {
    /// Registry with no selectors.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            selectors: Vec::new(),
        }
    }

    /// Registry with the built-in rectangle, point and oval selectors.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::empty()
            .with(RectangleSelector)
            .with(PointSelector)
            .with(OvalSelector)
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, selector: impl Selector + 'static) -> Self {
        self.register(selector);
        self
    }

    /// Register a selector.
    ///
    /// A selector for an already registered kind replaces the old one in
    /// place, keeping its position.
    pub fn register(&mut self, selector: impl Selector + 'static) {
        let kind = selector.kind();
        let boxed: Box<dyn Selector> = Box::new(selector);
        if let Some(slot) = self.selectors.iter_mut().find(|s| s.kind() == kind) {
            tracing::debug!("Replacing selector for {kind}");
            *slot = boxed;
        } else {
            self.selectors.push(boxed);
        }
    }

    /// Selector for `kind`, if one is registered.
    #[must_use]
    pub fn resolve(&self, kind: &ShapeKind) -> Option<&dyn Selector> {
        self.selectors
            .iter()
            .find(|s| &s.kind() == kind)
            .map(Box::as_ref)
    }

    /// Registered kinds, in order.
    pub fn kinds(&self) -> impl Iterator<Item = ShapeKind> + '_ {
        self.selectors.iter().map(|s| s.kind())
    }

    /// Number of registered selectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// Check if no selectors are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

impl Default for SelectorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for SelectorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.kinds()).finish()
    }
}
