//! Annotator configuration.
//!
//! Built once at the call site and handed to the [`Annotator`](crate::Annotator);
//! there is no shared default instance.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::hit::{default_comparator, Comparator};
use crate::render::{ChangeHandler, SubmitHandler};
use crate::selector::Selector;
use crate::{Annotation, MouseEvent, SelectorRegistry, ShapeKind, TouchEvent};

/// Plain options, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct AnnotatorOptions {
    /// Shape kind drawn by new gestures.
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    /// Ignore all gesture events.
    pub disable_annotation: bool,
    /// Do not draw the in-progress shape.
    pub disable_selector: bool,
    /// Do not draw the editor.
    pub disable_editor: bool,
    /// Do not draw the instruction overlay.
    pub disable_overlay: bool,
    /// Handle touch input (and suppress the platform's scroll/zoom).
    pub allow_touch: bool,
}

impl Default for AnnotatorOptions {
    fn default() -> Self {
        Self {
            kind: ShapeKind::RECTANGLE,
            disable_annotation: false,
            disable_selector: false,
            disable_editor: false,
            disable_overlay: false,
            allow_touch: false,
        }
    }
}

/// Replacement for a selector method. When present it runs instead of the
/// selector.
pub type MouseOverride = Rc<dyn Fn(&MouseEvent)>;

/// Replacement for a selector touch method.
pub type TouchOverride = Rc<dyn Fn(&TouchEvent)>;

/// Per-event overrides.
#[derive(Clone, Default)]
pub struct EventOverrides {
    /// Replaces `onMouseDown`.
    pub on_mouse_down: Option<MouseOverride>,
    /// Replaces `onMouseMove`.
    pub on_mouse_move: Option<MouseOverride>,
    /// Replaces `onMouseUp`.
    pub on_mouse_up: Option<MouseOverride>,
    /// Replaces `onClick`.
    pub on_click: Option<MouseOverride>,
    /// Replaces `onTouchStart`.
    pub on_touch_start: Option<TouchOverride>,
    /// Replaces `onTouchMove`.
    pub on_touch_move: Option<TouchOverride>,
    /// Replaces `onTouchEnd`.
    pub on_touch_end: Option<TouchOverride>,
}

impl fmt::Debug for EventOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventOverrides")
            .field("on_mouse_down", &self.on_mouse_down.is_some())
            .field("on_mouse_move", &self.on_mouse_move.is_some())
            .field("on_mouse_up", &self.on_mouse_up.is_some())
            .field("on_click", &self.on_click.is_some())
            .field("on_touch_start", &self.on_touch_start.is_some())
            .field("on_touch_move", &self.on_touch_move.is_some())
            .field("on_touch_end", &self.on_touch_end.is_some())
            .finish()
    }
}

/// Complete annotator configuration.
pub struct AnnotatorConfig {
    /// Plain options.
    pub options: AnnotatorOptions,
    /// Selectors available for drawing and hit-testing.
    pub selectors: SelectorRegistry,
    /// Active-set membership predicate.
    pub active_comparator: Comparator,
    /// Per-event overrides.
    pub overrides: EventOverrides,
    /// Receives every new in-progress value.
    pub on_change: ChangeHandler,
    /// Receives the value on submit.
    pub on_submit: SubmitHandler,
}

impl AnnotatorConfig {
    /// Default options, built-in selectors and no-op callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::from_options(AnnotatorOptions::default())
    }

    /// Configuration around existing options.
    #[must_use]
    pub fn from_options(options: AnnotatorOptions) -> Self {
        Self {
            options,
            selectors: SelectorRegistry::with_defaults(),
            active_comparator: default_comparator(),
            overrides: EventOverrides::default(),
            on_change: Rc::new(|_| {}),
            on_submit: Rc::new(|_| {}),
        }
    }

    /// Set the shape kind to draw.
    #[must_use]
    pub fn with_kind(mut self, kind: ShapeKind) -> Self {
        self.options.kind = kind;
        self
    }

    /// Replace the selector registry.
    #[must_use]
    pub fn with_selectors(mut self, selectors: SelectorRegistry) -> Self {
        self.selectors = selectors;
        self
    }

    /// Register one more selector.
    #[must_use]
    pub fn with_selector(mut self, selector: impl Selector + 'static) -> Self {
        self.selectors.register(selector);
        self
    }

    /// Set the active-set comparator.
    #[must_use]
    pub fn with_active_comparator(
        mut self,
        comparator: impl Fn(&Annotation, &Annotation) -> bool + 'static,
    ) -> Self {
        self.active_comparator = Rc::new(comparator);
        self
    }

    /// Set the per-event overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: EventOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Set the change callback.
    #[must_use]
    pub fn on_change(mut self, handler: impl Fn(Annotation) + 'static) -> Self {
        self.on_change = Rc::new(handler);
        self
    }

    /// Set the submit callback.
    #[must_use]
    pub fn on_submit(mut self, handler: impl Fn(Annotation) + 'static) -> Self {
        self.on_submit = Rc::new(handler);
        self
    }

    /// Set whether gesture events are ignored.
    #[must_use]
    pub fn disable_annotation(mut self, disabled: bool) -> Self {
        self.options.disable_annotation = disabled;
        self
    }

    /// Set whether touch input is handled.
    #[must_use]
    pub fn allow_touch(mut self, allowed: bool) -> Self {
        self.options.allow_touch = allowed;
        self
    }
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AnnotatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotatorConfig")
            .field("options", &self.options)
            .field("selectors", &self.selectors)
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}
