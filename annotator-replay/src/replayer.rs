//! Session replay.
//!
//! [`Replayer`] plays the host's part around an [`Annotator`]: it adopts every
//! reported change as the new in-progress value, and on submit it commits the
//! annotation (selection stripped, id assigned) and resets the value.

use std::cell::RefCell;
use std::rc::Rc;

use annotator_core::render::{
    overlay_hint, ContentProps, EditorProps, HighlightProps, OverlayProps, SelectorProps,
};
use annotator_core::{
    Annotation, Annotator, AnnotatorConfig, Dispatch, Geometry, MouseEvent, Point, Renderer,
    SurfaceRect, TouchEvent, TouchPhase, TouchPoint,
};
use serde::Serialize;

use crate::error::{ReplayError, ReplayResult};
use crate::session::{ScriptedEvent, Session};
use crate::ReplayConfig;

/// What the host saw after one scripted event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    /// Event name.
    pub event: &'static str,
    /// Gesture dispatch, when the event reached one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispatch: Option<Dispatch>,
    /// Whether a touch event asked to suppress scrolling.
    pub prevent_default: bool,
    /// Pointer position in surface percentages.
    pub pointer: Option<Point>,
    /// Id of the hovered committed annotation.
    pub hovered: Option<u64>,
}

/// Outcome of a full replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    /// One entry per scripted event.
    pub steps: Vec<StepReport>,
    /// Committed annotations after the script.
    pub annotations: Vec<Annotation>,
    /// In-progress annotation after the script.
    pub value: Annotation,
    /// Final render pass, bottom to top.
    pub frame: Vec<String>,
}

#[derive(Default)]
struct HostState {
    pending: Option<Annotation>,
    submitted: Vec<Annotation>,
}

/// Host driving one annotator through a session.
pub struct Replayer {
    annotator: Annotator,
    host: Rc<RefCell<HostState>>,
    surface: SurfaceRect,
    next_id: Option<u64>,
}

impl Replayer {
    /// Set up the annotator for `session`, applying CLI overrides from
    /// `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::EmptySurface`] if the surface has no area and
    /// [`ReplayError::IdsExhausted`] if a committed annotation already holds
    /// `u64::MAX` as its id.
    pub fn new(config: &ReplayConfig, session: &Session) -> ReplayResult<Self> {
        let surface = session.surface;
        if !surface.container().is_usable() {
            return Err(ReplayError::EmptySurface {
                width: surface.width,
                height: surface.height,
            });
        }

        let mut options = session.options.clone();
        if let Some(kind) = &config.kind {
            options.kind = kind.clone();
        }
        options.allow_touch |= config.allow_touch;

        let host = Rc::new(RefCell::new(HostState::default()));
        let on_change = Rc::clone(&host);
        let on_submit = Rc::clone(&host);
        let annotator_config = AnnotatorConfig::from_options(options)
            .on_change(move |value| on_change.borrow_mut().pending = Some(value))
            .on_submit(move |value| on_submit.borrow_mut().submitted.push(value));

        let mut annotator = Annotator::new(annotator_config);
        annotator.mount(surface);
        annotator.set_annotations(session.annotations.clone());
        annotator.set_active_annotations(session.active_annotations.clone());

        let next_id = match session
            .annotations
            .iter()
            .filter_map(|annotation| annotation.data.id)
            .max()
        {
            Some(max_id) => Some(
                max_id
                    .checked_add(1)
                    .ok_or(ReplayError::IdsExhausted { max_id })?,
            ),
            None => Some(1),
        };

        tracing::info!(
            "Replaying {} events over {} annotations with shape {}",
            session.events.len(),
            session.annotations.len(),
            annotator.options().kind
        );

        Ok(Self {
            annotator,
            host,
            surface,
            next_id,
        })
    }

    /// The annotator being driven.
    #[must_use]
    pub fn annotator(&self) -> &Annotator {
        &self.annotator
    }

    /// Replay one event and settle the host state.
    pub fn step(&mut self, event: &ScriptedEvent) -> StepReport {
        let (dispatch, prevent_default) = match event {
            ScriptedEvent::MouseDown { x, y } => {
                let mouse = self.mouse(*x, *y);
                (Some(self.annotator.on_mouse_down(&mouse)), false)
            }
            ScriptedEvent::MouseMove { x, y } => {
                let mouse = self.mouse(*x, *y);
                (Some(self.annotator.on_mouse_move(&mouse)), false)
            }
            ScriptedEvent::MouseUp { x, y } => {
                let mouse = self.mouse(*x, *y);
                (Some(self.annotator.on_mouse_up(&mouse)), false)
            }
            ScriptedEvent::Click { x, y } => {
                let mouse = self.mouse(*x, *y);
                (Some(self.annotator.on_click(&mouse)), false)
            }
            ScriptedEvent::MouseLeave => {
                self.annotator.on_mouse_leave();
                (None, false)
            }
            ScriptedEvent::TouchStart { touches } => self.touch(TouchPhase::Start, touches),
            ScriptedEvent::TouchMove { touches } => self.touch(TouchPhase::Move, touches),
            ScriptedEvent::TouchEnd { touches } => self.touch(TouchPhase::End, touches),
            ScriptedEvent::TouchCancel => self.touch(TouchPhase::Cancel, &[]),
            ScriptedEvent::Type { text } => {
                self.type_text(text);
                (None, false)
            }
            ScriptedEvent::Submit => {
                self.annotator.submit();
                (None, false)
            }
        };

        self.settle();

        StepReport {
            event: event.name(),
            dispatch,
            prevent_default,
            pointer: self.annotator.pointer_position(),
            hovered: self
                .annotator
                .top_annotation()
                .and_then(|annotation| annotation.data.id),
        }
    }

    /// Replay every event in order and report the final state.
    #[must_use]
    pub fn run(mut self, events: &[ScriptedEvent]) -> ReplayReport {
        let steps = events.iter().map(|event| self.step(event)).collect();
        let frame = self.annotator.render(&mut SummaryRenderer).into_layers().collect();
        ReplayReport {
            steps,
            annotations: self.annotator.annotations().to_vec(),
            value: self.annotator.value().clone(),
            frame,
        }
    }

    fn mouse(&self, x: f64, y: f64) -> MouseEvent {
        MouseEvent::new(x, y, self.surface)
    }

    fn touch(&mut self, phase: TouchPhase, touches: &[TouchPoint]) -> (Option<Dispatch>, bool) {
        let event = TouchEvent::new(phase, touches.to_vec(), self.surface);
        let response = self.annotator.on_touch(&event);
        (response.dispatch, response.prevent_default)
    }

    fn type_text(&self, text: &str) {
        let value = self.annotator.value();
        if !value.shows_editor() {
            tracing::debug!("No editor open, ignoring typed text");
            return;
        }
        (self.annotator.config().on_change)(value.with_text(text));
    }

    /// Adopt the latest change, then commit anything submitted.
    fn settle(&mut self) {
        let (pending, submitted) = {
            let mut host = self.host.borrow_mut();
            (host.pending.take(), std::mem::take(&mut host.submitted))
        };

        if let Some(value) = pending {
            self.annotator.set_value(value);
        }

        if submitted.is_empty() {
            return;
        }
        let mut annotations = self.annotator.annotations().to_vec();
        for mut annotation in submitted {
            annotation.selection = None;
            if annotation.data.id.is_none() {
                match self.next_id {
                    Some(id) => {
                        annotation.data.id = Some(id);
                        self.next_id = id.checked_add(1);
                    }
                    None => tracing::warn!("No annotation ids left, committing without one"),
                }
            }
            tracing::debug!("Committed annotation {:?}", annotation.data.id);
            annotations.push(annotation);
        }
        self.annotator.set_annotations(annotations);
        self.annotator.set_value(Annotation::default());
    }
}

impl std::fmt::Debug for Replayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Replayer")
            .field("annotator", &self.annotator)
            .field("surface", &self.surface)
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

/// Describes each drawable as one line of text.
struct SummaryRenderer;

fn describe(geometry: Option<&Geometry>) -> String {
    geometry.map_or_else(
        || "no geometry".to_string(),
        |g| {
            format!(
                "{} at ({:.1}%, {:.1}%) size {:.1}% x {:.1}%",
                g.kind, g.x, g.y, g.width, g.height
            )
        },
    )
}

fn label(annotation: &Annotation) -> String {
    annotation
        .data
        .id
        .map_or_else(|| format!("{:?}", annotation.data.text), |id| format!("#{id}"))
}

impl Renderer for SummaryRenderer {
    type Output = String;

    fn render_highlight(&mut self, props: HighlightProps<'_>) -> String {
        let state = if props.active { "active" } else { "idle" };
        format!(
            "highlight {} {state}: {}",
            label(props.annotation),
            describe(props.annotation.geometry.as_ref())
        )
    }

    fn render_content(&mut self, props: ContentProps<'_>) -> String {
        let anchor = props
            .annotation
            .geometry
            .as_ref()
            .map(Geometry::caption_anchor)
            .unwrap_or_default();
        format!(
            "content {} at ({:.1}%, {:.1}%): {:?}",
            label(props.annotation),
            anchor.x,
            anchor.y,
            props.annotation.data.text
        )
    }

    fn render_selector(&mut self, props: SelectorProps<'_>) -> String {
        format!("selector: {}", describe(props.annotation.geometry.as_ref()))
    }

    fn render_editor(&mut self, props: EditorProps<'_>) -> String {
        let anchor = props
            .annotation
            .geometry
            .as_ref()
            .map(Geometry::caption_anchor)
            .unwrap_or_default();
        format!(
            "editor at ({:.1}%, {:.1}%): {:?}",
            anchor.x, anchor.y, props.annotation.data.text
        )
    }

    fn render_overlay(&mut self, props: OverlayProps<'_>) -> String {
        format!("overlay: {}", overlay_hint(props.kind))
    }
}
