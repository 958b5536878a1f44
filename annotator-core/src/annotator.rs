//! The interaction coordinator.
//!
//! [`Annotator`] routes raw input to the selector for the configured shape
//! kind and reports new in-progress values through the change callback. It
//! never stores those values itself: the host owns both the in-progress
//! `value` and the committed `annotations` and hands them back with
//! [`Annotator::set_value`] / [`Annotator::set_annotations`].
//!
//! ```text
//! raw event ──► disabled? ──► override? ──► registry[kind].method(value, event)
//!                  │              │                       │
//!                  ▼              ▼                       ▼
//!               ignored      override runs      Changed ─► on_change(value)
//!                                               Unchanged / Err ─► nothing
//! ```
//!
//! Hover tracking is separate: every move updates the pointer position, which
//! feeds hit resolution and active-state decisions on each render pass, even
//! while gestures are disabled.

use std::rc::Rc;

use serde::Serialize;

use crate::config::{AnnotatorConfig, AnnotatorOptions};
use crate::hit::{is_active, top_intersecting, ActiveSet};
use crate::pointer::RelativePointer;
use crate::render::{
    ContentProps, EditorProps, Frame, HighlightProps, OverlayProps, Renderer, SelectorProps,
};
use crate::selector::{Outcome, Selector};
use crate::{
    Annotation, AnnotatorResult, Container, Method, MouseEvent, Point, ShapeKind, SurfaceRect,
    TouchEvent, TouchPhase,
};

/// What happened to a gesture event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dispatch {
    /// Annotation is disabled; the event was ignored.
    Disabled,
    /// An override handled the event instead of the selector.
    Overridden,
    /// No selector is registered for the configured kind.
    NoSelector,
    /// The selector produced a new value and the change callback ran.
    Changed,
    /// The selector reported no change.
    Unchanged,
    /// The selector failed; the event was logged and dropped.
    Dropped,
}

/// Result of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchResponse {
    /// Gesture dispatch, if the event reached one.
    pub dispatch: Option<Dispatch>,
    /// Whether the host should suppress the platform's default scroll/zoom.
    pub prevent_default: bool,
}

impl TouchResponse {
    const IGNORED: Self = Self {
        dispatch: None,
        prevent_default: false,
    };
}

/// Draw/edit interaction over one image surface.
pub struct Annotator {
    config: AnnotatorConfig,
    value: Annotation,
    annotations: Vec<Annotation>,
    active_annotations: Option<Vec<Annotation>>,
    pointer: RelativePointer,
    surface: Option<SurfaceRect>,
    touch_listening: bool,
}

impl Annotator {
    /// Create an annotator with no surface mounted yet.
    #[must_use]
    pub fn new(config: AnnotatorConfig) -> Self {
        let mut annotator = Self {
            config,
            value: Annotation::default(),
            annotations: Vec::new(),
            active_annotations: None,
            pointer: RelativePointer::new(),
            surface: None,
            touch_listening: false,
        };
        annotator.sync_touch_listeners();
        annotator
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &AnnotatorConfig {
        &self.config
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &AnnotatorOptions {
        &self.config.options
    }

    /// Replace the plain options, installing or removing touch handling if
    /// `allow_touch` flipped.
    pub fn set_options(&mut self, options: AnnotatorOptions) {
        self.config.options = options;
        self.sync_touch_listeners();
    }

    /// Change the shape kind drawn by new gestures.
    pub fn set_kind(&mut self, kind: ShapeKind) {
        self.config.options.kind = kind;
    }

    /// Enable or disable touch handling.
    pub fn set_allow_touch(&mut self, allowed: bool) {
        self.config.options.allow_touch = allowed;
        self.sync_touch_listeners();
    }

    /// Whether touch handlers are currently installed.
    #[must_use]
    pub fn touch_listening(&self) -> bool {
        self.touch_listening
    }

    fn sync_touch_listeners(&mut self) {
        let wanted = self.config.options.allow_touch;
        if wanted == self.touch_listening {
            return;
        }
        if wanted {
            tracing::debug!("Installing touch listeners");
        } else {
            tracing::debug!("Removing touch listeners");
        }
        self.touch_listening = wanted;
    }

    /// Image surface loaded: record its page box.
    pub fn mount(&mut self, surface: SurfaceRect) {
        tracing::debug!(
            "Mounted surface {}x{} at ({}, {})",
            surface.width,
            surface.height,
            surface.left,
            surface.top
        );
        self.surface = Some(surface);
    }

    /// Image surface gone; hover resolution stops until remounted.
    pub fn unmount(&mut self) {
        self.surface = None;
        self.pointer.on_leave();
    }

    /// Page box of the mounted surface.
    #[must_use]
    pub fn surface(&self) -> Option<SurfaceRect> {
        self.surface
    }

    /// Pixel size of the mounted surface.
    #[must_use]
    pub fn container(&self) -> Option<Container> {
        self.surface.map(|s| s.container())
    }

    /// In-progress annotation.
    #[must_use]
    pub fn value(&self) -> &Annotation {
        &self.value
    }

    /// Replace the in-progress annotation. Passing an empty annotation
    /// abandons any draw or edit in progress.
    pub fn set_value(&mut self, value: Annotation) {
        self.value = value;
    }

    /// Committed annotations.
    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Replace the committed annotations.
    pub fn set_annotations(&mut self, annotations: Vec<Annotation>) {
        self.annotations = annotations;
    }

    /// Externally chosen active annotations.
    #[must_use]
    pub fn active_annotations(&self) -> Option<&[Annotation]> {
        self.active_annotations.as_deref()
    }

    /// Set or clear the external active set.
    pub fn set_active_annotations(&mut self, active: Option<Vec<Annotation>>) {
        self.active_annotations = active;
    }

    /// Pointer position over the surface, in percent.
    #[must_use]
    pub fn pointer_position(&self) -> Option<Point> {
        self.pointer.position()
    }

    // ------------------------------------------------------------------
    // Mouse
    // ------------------------------------------------------------------

    /// Mouse button pressed on the surface.
    pub fn on_mouse_down(&self, event: &MouseEvent) -> Dispatch {
        self.call_selector_method(
            Method::MouseDown,
            event,
            self.config.overrides.on_mouse_down.as_ref(),
            |selector, value| selector.on_mouse_down(value, event),
        )
    }

    /// Mouse moved over the surface. Updates hover tracking, then dispatches.
    pub fn on_mouse_move(&mut self, event: &MouseEvent) -> Dispatch {
        match self.surface {
            Some(surface) => self.pointer.on_mouse_move(event, &surface),
            None => self.pointer.on_leave(),
        }
        self.trace_hover();
        self.call_selector_method(
            Method::MouseMove,
            event,
            self.config.overrides.on_mouse_move.as_ref(),
            |selector, value| selector.on_mouse_move(value, event),
        )
    }

    /// Mouse button released on the surface.
    pub fn on_mouse_up(&self, event: &MouseEvent) -> Dispatch {
        self.call_selector_method(
            Method::MouseUp,
            event,
            self.config.overrides.on_mouse_up.as_ref(),
            |selector, value| selector.on_mouse_up(value, event),
        )
    }

    /// Click on the surface.
    pub fn on_click(&self, event: &MouseEvent) -> Dispatch {
        self.call_selector_method(
            Method::Click,
            event,
            self.config.overrides.on_click.as_ref(),
            |selector, value| selector.on_click(value, event),
        )
    }

    /// Mouse left the surface.
    pub fn on_mouse_leave(&mut self) {
        self.pointer.on_leave();
    }

    // ------------------------------------------------------------------
    // Touch
    // ------------------------------------------------------------------

    /// Route a touch event to the handler for its phase.
    pub fn on_touch(&mut self, event: &TouchEvent) -> TouchResponse {
        match event.phase {
            TouchPhase::Start => self.on_touch_start(event),
            TouchPhase::Move => self.on_touch_move(event),
            TouchPhase::End => self.on_touch_end(event),
            TouchPhase::Cancel => self.on_touch_cancel(),
        }
    }

    /// Finger down. Ignored unless touch handling is installed.
    pub fn on_touch_start(&self, event: &TouchEvent) -> TouchResponse {
        if !self.touch_listening {
            return TouchResponse::IGNORED;
        }
        self.touch_dispatched(self.call_selector_method(
            Method::TouchStart,
            event,
            self.config.overrides.on_touch_start.as_ref(),
            |selector, value| selector.on_touch_start(value, event),
        ))
    }

    /// Finger moved. Updates hover tracking (single touch only), then
    /// dispatches.
    pub fn on_touch_move(&mut self, event: &TouchEvent) -> TouchResponse {
        if !self.touch_listening {
            return TouchResponse::IGNORED;
        }
        if let Some(surface) = self.surface {
            self.pointer.on_touch_move(event, &surface);
        }
        self.trace_hover();
        self.touch_dispatched(self.call_selector_method(
            Method::TouchMove,
            event,
            self.config.overrides.on_touch_move.as_ref(),
            |selector, value| selector.on_touch_move(value, event),
        ))
    }

    /// Finger lifted.
    pub fn on_touch_end(&self, event: &TouchEvent) -> TouchResponse {
        if !self.touch_listening {
            return TouchResponse::IGNORED;
        }
        self.touch_dispatched(self.call_selector_method(
            Method::TouchEnd,
            event,
            self.config.overrides.on_touch_end.as_ref(),
            |selector, value| selector.on_touch_end(value, event),
        ))
    }

    /// Touch sequence cancelled; the pointer is treated as gone.
    pub fn on_touch_cancel(&mut self) -> TouchResponse {
        self.pointer.on_leave();
        TouchResponse {
            dispatch: None,
            prevent_default: self.touch_listening,
        }
    }

    fn touch_dispatched(&self, dispatch: Dispatch) -> TouchResponse {
        TouchResponse {
            dispatch: Some(dispatch),
            prevent_default: self.touch_listening,
        }
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    fn call_selector_method<E>(
        &self,
        method: Method,
        event: &E,
        override_handler: Option<&Rc<dyn Fn(&E)>>,
        call: impl FnOnce(&dyn Selector, &Annotation) -> AnnotatorResult<Outcome>,
    ) -> Dispatch {
        if self.config.options.disable_annotation {
            return Dispatch::Disabled;
        }

        if let Some(handler) = override_handler {
            handler(event);
            return Dispatch::Overridden;
        }

        let kind = &self.config.options.kind;
        let Some(selector) = self.config.selectors.resolve(kind) else {
            tracing::debug!("No selector for {kind}, ignoring {method}");
            return Dispatch::NoSelector;
        };

        match call(selector, &self.value) {
            Ok(Outcome::Changed(next)) => {
                tracing::debug!(
                    "{method} of selector {kind} -> {:?}",
                    next.mode()
                );
                (self.config.on_change)(next);
                Dispatch::Changed
            }
            Ok(Outcome::Unchanged) => Dispatch::Unchanged,
            Err(err) => {
                tracing::warn!(
                    "{method} of selector type {kind} returned no result, dropping event: {err}"
                );
                Dispatch::Dropped
            }
        }
    }

    // ------------------------------------------------------------------
    // Hover and rendering
    // ------------------------------------------------------------------

    /// Committed annotation under the pointer, smallest area first.
    #[must_use]
    pub fn top_annotation(&self) -> Option<&Annotation> {
        top_intersecting(
            self.pointer.position(),
            &self.annotations,
            &self.config.selectors,
            self.container(),
        )
    }

    /// Active state of every committed annotation, in list order.
    #[must_use]
    pub fn active_states(&self) -> Vec<bool> {
        let top = self.top_annotation();
        let active_set = self.active_set();
        self.annotations
            .iter()
            .map(|annotation| is_active(annotation, top, active_set.as_ref()))
            .collect()
    }

    fn active_set(&self) -> Option<ActiveSet<'_>> {
        self.active_annotations
            .as_deref()
            .map(|members| ActiveSet::new(members, &self.config.active_comparator))
    }

    fn trace_hover(&self) {
        if let Some(top) = self.top_annotation() {
            tracing::trace!(
                "Pointer over annotation {:?} at {:?}",
                top.data.id,
                self.pointer.position()
            );
        }
    }

    /// Send the in-progress value to the submit callback.
    pub fn submit(&self) {
        tracing::debug!("Submitting annotation {:?}", self.value.data.id);
        (self.config.on_submit)(self.value.clone());
    }

    /// Run one render pass through `renderer`.
    pub fn render<R: Renderer>(&self, renderer: &mut R) -> Frame<R::Output> {
        let options = &self.config.options;
        let active = self.active_states();

        let highlights = self
            .annotations
            .iter()
            .zip(&active)
            .map(|(annotation, &active)| {
                renderer.render_highlight(HighlightProps { annotation, active })
            })
            .collect();

        let selector = (!options.disable_selector && self.value.geometry.is_some())
            .then(|| renderer.render_selector(SelectorProps { annotation: &self.value }));

        let overlay = (!options.disable_overlay).then(|| {
            renderer.render_overlay(OverlayProps {
                kind: &options.kind,
                annotation: &self.value,
            })
        });

        let contents = self
            .annotations
            .iter()
            .zip(&active)
            .filter(|(_, &active)| active)
            .map(|(annotation, _)| renderer.render_content(ContentProps { annotation }))
            .collect();

        let editor = (!options.disable_editor && self.value.shows_editor()).then(|| {
            let on_submit = Rc::clone(&self.config.on_submit);
            let submitted = self.value.clone();
            renderer.render_editor(EditorProps {
                annotation: &self.value,
                on_change: Rc::clone(&self.config.on_change),
                on_submit: Rc::new(move || on_submit(submitted.clone())),
            })
        });

        Frame {
            highlights,
            selector,
            overlay,
            contents,
            editor,
        }
    }
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new(AnnotatorConfig::default())
    }
}

impl std::fmt::Debug for Annotator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Annotator")
            .field("config", &self.config)
            .field("value", &self.value)
            .field("annotations", &self.annotations.len())
            .field("pointer", &self.pointer.position())
            .field("surface", &self.surface)
            .field("touch_listening", &self.touch_listening)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use tracing_subscriber::layer::SubscriberExt;

    use super::*;
    use crate::config::EventOverrides;
    use crate::{AnnotatorError, Geometry, SelectionMode, TouchPhase, TouchPoint};

    const SURFACE: SurfaceRect = SurfaceRect::new(0.0, 0.0, 100.0, 100.0);

    fn mouse(x: f64, y: f64) -> MouseEvent {
        MouseEvent::new(x, y, SURFACE)
    }

    fn touch(phase: TouchPhase, points: &[(f64, f64)]) -> TouchEvent {
        TouchEvent::new(
            phase,
            points
                .iter()
                .zip(0..)
                .map(|(&(x, y), id)| TouchPoint { id, x, y })
                .collect(),
            SURFACE,
        )
    }

    /// Collects every value passed to the change callback.
    fn recording() -> (AnnotatorConfig, Rc<RefCell<Vec<Annotation>>>) {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        let config = AnnotatorConfig::new().on_change(move |a| sink.borrow_mut().push(a));
        (config, changes)
    }

    /// Applies the latest change back to the annotator, like a host would.
    fn adopt(annotator: &mut Annotator, changes: &Rc<RefCell<Vec<Annotation>>>) {
        if let Some(last) = changes.borrow().last() {
            annotator.set_value(last.clone());
        }
    }

    /// Counts method calls; every method returns `result()`.
    struct Counting {
        calls: Rc<Cell<usize>>,
        fail: bool,
    }

    impl Counting {
        fn result(&self) -> AnnotatorResult<Outcome> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                Err(AnnotatorError::Contract {
                    method: "test",
                    kind: self.kind(),
                    reason: "no result".to_string(),
                })
            } else {
                Ok(Outcome::Changed(Annotation::default().with_text("counted")))
            }
        }
    }

    impl Selector for Counting {
        fn kind(&self) -> ShapeKind {
            ShapeKind::new("COUNTING")
        }

        fn intersects(&self, _point: Point, _geometry: &Geometry, _container: Container) -> bool {
            false
        }

        fn area(&self, _geometry: &Geometry, _container: Container) -> f64 {
            0.0
        }

        fn on_mouse_down(
            &self,
            _value: &Annotation,
            _event: &MouseEvent,
        ) -> AnnotatorResult<Outcome> {
            self.result()
        }

        fn on_mouse_move(
            &self,
            _value: &Annotation,
            _event: &MouseEvent,
        ) -> AnnotatorResult<Outcome> {
            self.result()
        }

        fn on_mouse_up(
            &self,
            _value: &Annotation,
            _event: &MouseEvent,
        ) -> AnnotatorResult<Outcome> {
            self.result()
        }
    }

    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for WarnCounter {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn rectangle_draw_cycle_through_callbacks() {
        let (config, changes) = recording();
        let mut annotator = Annotator::new(config);
        annotator.mount(SURFACE);

        assert_eq!(annotator.on_mouse_down(&mouse(10.0, 10.0)), Dispatch::Changed);
        adopt(&mut annotator, &changes);
        assert_eq!(annotator.on_mouse_move(&mouse(40.0, 30.0)), Dispatch::Changed);
        adopt(&mut annotator, &changes);
        assert_eq!(annotator.on_mouse_up(&mouse(40.0, 30.0)), Dispatch::Changed);
        adopt(&mut annotator, &changes);

        let value = annotator.value();
        assert_eq!(
            value.geometry,
            Some(Geometry::new(ShapeKind::RECTANGLE, 10.0, 10.0, 30.0, 20.0))
        );
        assert_eq!(value.mode(), Some(SelectionMode::Editing));
        assert_eq!(changes.borrow().len(), 3);
    }

    #[test]
    fn hover_moves_without_drawing_do_not_emit_changes() {
        let (config, changes) = recording();
        let mut annotator = Annotator::new(config);
        annotator.mount(SURFACE);

        assert_eq!(annotator.on_mouse_move(&mouse(5.0, 5.0)), Dispatch::Unchanged);
        assert!(changes.borrow().is_empty());
        assert_eq!(annotator.pointer_position(), Some(Point::new(5.0, 5.0)));
    }

    #[test]
    fn disabled_annotation_never_reaches_the_selector() {
        let calls = Rc::new(Cell::new(0));
        let (config, changes) = recording();
        let config = config
            .with_selector(Counting {
                calls: Rc::clone(&calls),
                fail: false,
            })
            .with_kind(ShapeKind::new("COUNTING"))
            .disable_annotation(true);
        let mut annotator = Annotator::new(config);
        annotator.mount(SURFACE);

        assert_eq!(annotator.on_mouse_down(&mouse(1.0, 1.0)), Dispatch::Disabled);
        assert_eq!(annotator.on_mouse_move(&mouse(2.0, 2.0)), Dispatch::Disabled);
        assert_eq!(annotator.on_mouse_up(&mouse(2.0, 2.0)), Dispatch::Disabled);

        assert_eq!(calls.get(), 0);
        assert!(changes.borrow().is_empty());
        // Hover tracking keeps running.
        assert_eq!(annotator.pointer_position(), Some(Point::new(2.0, 2.0)));
    }

    #[test]
    fn override_takes_precedence_over_selector() {
        let calls = Rc::new(Cell::new(0));
        let overridden = Rc::new(Cell::new(0));
        let seen = Rc::clone(&overridden);
        let (config, changes) = recording();
        let config = config
            .with_selector(Counting {
                calls: Rc::clone(&calls),
                fail: false,
            })
            .with_kind(ShapeKind::new("COUNTING"))
            .with_overrides(EventOverrides {
                on_mouse_down: Some(Rc::new(move |_: &MouseEvent| seen.set(seen.get() + 1))),
                ..EventOverrides::default()
            });
        let annotator = Annotator::new(config);

        assert_eq!(annotator.on_mouse_down(&mouse(1.0, 1.0)), Dispatch::Overridden);
        assert_eq!(overridden.get(), 1);
        assert_eq!(calls.get(), 0);
        assert!(changes.borrow().is_empty());

        // Methods without an override still reach the selector.
        assert_eq!(annotator.on_mouse_up(&mouse(1.0, 1.0)), Dispatch::Changed);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn failing_selector_is_logged_once_and_dropped() {
        let warnings = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(Arc::clone(&warnings)));

        let calls = Rc::new(Cell::new(0));
        let (config, changes) = recording();
        let config = config
            .with_selector(Counting {
                calls: Rc::clone(&calls),
                fail: true,
            })
            .with_kind(ShapeKind::new("COUNTING"));
        let annotator = Annotator::new(config);

        let dispatch = tracing::subscriber::with_default(subscriber, || {
            annotator.on_mouse_down(&mouse(1.0, 1.0))
        });

        assert_eq!(dispatch, Dispatch::Dropped);
        assert_eq!(calls.get(), 1);
        assert!(changes.borrow().is_empty());
        assert_eq!(warnings.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unknown_kind_is_a_silent_no_op() {
        let (config, changes) = recording();
        let annotator = Annotator::new(config.with_kind(ShapeKind::new("POLYGON")));
        assert_eq!(annotator.on_mouse_down(&mouse(1.0, 1.0)), Dispatch::NoSelector);
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn touch_is_ignored_until_allowed() {
        let (config, changes) = recording();
        let mut annotator = Annotator::new(config);
        annotator.mount(SURFACE);

        let response = annotator.on_touch_start(&touch(TouchPhase::Start, &[(10.0, 10.0)]));
        assert_eq!(response, TouchResponse::IGNORED);
        assert!(changes.borrow().is_empty());

        annotator.set_allow_touch(true);
        assert!(annotator.touch_listening());
        let response = annotator.on_touch_start(&touch(TouchPhase::Start, &[(10.0, 10.0)]));
        assert_eq!(response.dispatch, Some(Dispatch::Changed));
        assert!(response.prevent_default);

        annotator.set_allow_touch(false);
        assert!(!annotator.touch_listening());
        assert_eq!(
            annotator.on_touch_end(&touch(TouchPhase::End, &[])),
            TouchResponse::IGNORED
        );
    }

    #[test]
    fn multi_touch_move_keeps_hover_position() {
        let mut annotator = Annotator::new(AnnotatorConfig::new().allow_touch(true));
        annotator.mount(SURFACE);
        assert!(annotator.touch_listening());

        annotator.on_touch_move(&touch(TouchPhase::Move, &[(20.0, 30.0)]));
        let before = annotator.pointer_position();
        assert_eq!(before, Some(Point::new(20.0, 30.0)));

        annotator.on_touch_move(&touch(TouchPhase::Move, &[(60.0, 60.0), (70.0, 70.0)]));
        assert_eq!(annotator.pointer_position(), before);

        let response = annotator.on_touch_cancel();
        assert!(response.prevent_default);
        assert_eq!(annotator.pointer_position(), None);
    }

    #[test]
    fn touch_phase_routes_to_handler() {
        let (config, changes) = recording();
        let mut annotator = Annotator::new(config.allow_touch(true));
        annotator.mount(SURFACE);

        let response = annotator.on_touch(&touch(TouchPhase::Start, &[(10.0, 10.0)]));
        assert_eq!(response.dispatch, Some(Dispatch::Changed));
        adopt(&mut annotator, &changes);

        let response = annotator.on_touch(&touch(TouchPhase::Move, &[(60.0, 60.0)]));
        assert_eq!(response.dispatch, Some(Dispatch::Changed));
        adopt(&mut annotator, &changes);
        assert_eq!(annotator.pointer_position(), Some(Point::new(60.0, 60.0)));

        let response = annotator.on_touch(&touch(TouchPhase::End, &[]));
        assert_eq!(response.dispatch, Some(Dispatch::Changed));
        adopt(&mut annotator, &changes);
        let value = annotator.value();
        assert_eq!(
            value.selection.as_ref().map(|s| s.mode),
            Some(SelectionMode::Editing)
        );
        let geometry = value.geometry.as_ref().expect("drawn box");
        assert!((geometry.width - 50.0).abs() < 1e-9);
        assert!((geometry.height - 50.0).abs() < 1e-9);

        let response = annotator.on_touch(&touch(TouchPhase::Cancel, &[]));
        assert_eq!(response.dispatch, None);
        assert!(response.prevent_default);
        assert_eq!(annotator.pointer_position(), None);
    }

    #[test]
    fn options_flip_installs_touch_listeners() {
        let mut annotator = Annotator::default();
        assert!(!annotator.touch_listening());
        annotator.set_options(AnnotatorOptions {
            allow_touch: true,
            ..AnnotatorOptions::default()
        });
        assert!(annotator.touch_listening());
    }

    #[test]
    fn point_click_places_marker() {
        let (config, changes) = recording();
        let annotator = Annotator::new(config.with_kind(ShapeKind::POINT));
        assert_eq!(annotator.on_click(&mouse(30.0, 40.0)), Dispatch::Changed);

        let placed = changes.borrow()[0].clone();
        assert_eq!(
            placed.geometry,
            Some(Geometry::at(ShapeKind::POINT, Point::new(30.0, 40.0)))
        );
        assert!(placed.shows_editor());
    }

    #[test]
    fn submit_sends_current_value() {
        let submitted = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&submitted);
        let mut annotator =
            Annotator::new(AnnotatorConfig::new().on_submit(move |a| *sink.borrow_mut() = Some(a)));
        annotator.set_value(Annotation::default().with_text("done"));

        annotator.submit();
        assert_eq!(
            submitted.borrow().as_ref().map(|a| a.data.text.clone()),
            Some("done".to_string())
        );
    }

    #[test]
    fn top_annotation_needs_a_mounted_surface() {
        let mut annotator = Annotator::default();
        annotator.set_annotations(vec![Annotation::new(
            Geometry::new(ShapeKind::RECTANGLE, 0.0, 0.0, 100.0, 100.0),
            "all",
        )]);
        annotator.on_mouse_move(&mouse(50.0, 50.0));
        assert!(annotator.top_annotation().is_none());

        annotator.mount(SURFACE);
        annotator.on_mouse_move(&mouse(50.0, 50.0));
        assert!(annotator.top_annotation().is_some());

        annotator.unmount();
        assert!(annotator.top_annotation().is_none());
    }
}
