//! WebAssembly bindings for annotator-core.
//!
//! This module provides JavaScript-callable functions when compiled to WASM.
//! The wrapper plays the host's part: every change the annotator reports is
//! adopted as the new in-progress value before the call returns.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::{
    Annotation, AnnotationSet, Annotator, AnnotatorConfig, AnnotatorOptions, MouseEvent,
    ShapeKind, SurfaceRect, TouchEvent, TouchPhase, TouchPoint,
};

/// Initialize the annotator WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();
}

fn js_error(message: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&message.to_string()).into()
}

/// Annotator instance for WASM.
#[wasm_bindgen]
pub struct WasmAnnotator {
    annotator: Annotator,
    pending: Rc<RefCell<Option<Annotation>>>,
    submitted: Rc<RefCell<Vec<Annotation>>>,
}

#[wasm_bindgen]
impl WasmAnnotator {
    /// Create an annotator drawing `shape_type` (e.g. `"RECTANGLE"`).
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(shape_type: String) -> Self {
        let pending = Rc::new(RefCell::new(None));
        let submitted = Rc::new(RefCell::new(Vec::new()));
        let change_slot = Rc::clone(&pending);
        let submit_log = Rc::clone(&submitted);
        let config = AnnotatorConfig::new()
            .with_kind(ShapeKind::new(shape_type))
            .on_change(move |value| *change_slot.borrow_mut() = Some(value))
            .on_submit(move |value| submit_log.borrow_mut().push(value));
        Self {
            annotator: Annotator::new(config),
            pending,
            submitted,
        }
    }

    /// Apply options serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not valid options.
    #[wasm_bindgen(js_name = setOptionsJson)]
    pub fn set_options_json(&mut self, json: &str) -> Result<(), JsValue> {
        let options: AnnotatorOptions = serde_json::from_str(json).map_err(js_error)?;
        self.annotator.set_options(options);
        Ok(())
    }

    /// Record the image element's page box.
    pub fn mount(&mut self, left: f64, top: f64, width: f64, height: f64) {
        self.annotator.mount(SurfaceRect::new(left, top, width, height));
    }

    /// Replace the committed annotations from a JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not an annotation array.
    #[wasm_bindgen(js_name = setAnnotationsJson)]
    pub fn set_annotations_json(&mut self, json: &str) -> Result<(), JsValue> {
        let annotations: Vec<Annotation> = serde_json::from_str(json).map_err(js_error)?;
        self.annotator.set_annotations(annotations);
        Ok(())
    }

    /// Replace the in-progress annotation from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not an annotation.
    #[wasm_bindgen(js_name = setValueJson)]
    pub fn set_value_json(&mut self, json: &str) -> Result<(), JsValue> {
        let value = Annotation::from_json(json).map_err(js_error)?;
        self.annotator.set_value(value);
        Ok(())
    }

    /// The in-progress annotation as JSON.
    #[wasm_bindgen(js_name = valueJson)]
    #[must_use]
    pub fn value_json(&self) -> String {
        self.annotator.value().to_json().unwrap_or_default()
    }

    /// The annotation under the pointer as JSON, or `"null"`.
    #[wasm_bindgen(js_name = topAnnotationJson)]
    #[must_use]
    pub fn top_annotation_json(&self) -> String {
        serde_json::to_string(&self.annotator.top_annotation()).unwrap_or_default()
    }

    /// Submitted annotations so far, as a JSON set; clears the log.
    #[wasm_bindgen(js_name = takeSubmittedJson)]
    #[must_use]
    pub fn take_submitted_json(&mut self) -> String {
        let annotations = std::mem::take(&mut *self.submitted.borrow_mut());
        AnnotationSet { annotations }.to_json().unwrap_or_default()
    }

    /// Submit the in-progress annotation.
    pub fn submit(&mut self) {
        self.annotator.submit();
    }

    /// Mouse pressed at page coordinates.
    #[wasm_bindgen(js_name = mouseDown)]
    pub fn mouse_down(&mut self, x: f64, y: f64) {
        let event = self.mouse_at(x, y);
        self.annotator.on_mouse_down(&event);
        self.adopt_pending();
    }

    /// Mouse moved to page coordinates.
    #[wasm_bindgen(js_name = mouseMove)]
    pub fn mouse_move(&mut self, x: f64, y: f64) {
        let event = self.mouse_at(x, y);
        self.annotator.on_mouse_move(&event);
        self.adopt_pending();
    }

    /// Mouse released at page coordinates.
    #[wasm_bindgen(js_name = mouseUp)]
    pub fn mouse_up(&mut self, x: f64, y: f64) {
        let event = self.mouse_at(x, y);
        self.annotator.on_mouse_up(&event);
        self.adopt_pending();
    }

    /// Click at page coordinates.
    pub fn click(&mut self, x: f64, y: f64) {
        let event = self.mouse_at(x, y);
        self.annotator.on_click(&event);
        self.adopt_pending();
    }

    /// Mouse left the image.
    #[wasm_bindgen(js_name = mouseLeave)]
    pub fn mouse_leave(&mut self) {
        self.annotator.on_mouse_leave();
    }

    /// Feed a DOM mouse event (`mousedown`, `mousemove`, `mouseup`,
    /// `click` or `mouseleave`).
    #[wasm_bindgen(js_name = handleMouseEvent)]
    pub fn handle_mouse_event(&mut self, event: &web_sys::MouseEvent) {
        let x = f64::from(event.page_x());
        let y = f64::from(event.page_y());
        match event.type_().as_str() {
            "mousedown" => self.mouse_down(x, y),
            "mousemove" => self.mouse_move(x, y),
            "mouseup" => self.mouse_up(x, y),
            "click" => self.click(x, y),
            "mouseleave" => self.mouse_leave(),
            other => tracing::debug!("Ignoring mouse event {other}"),
        }
    }

    /// Feed a DOM touch event. Calls `preventDefault()` when touch
    /// interaction is enabled so the page does not scroll or zoom.
    #[wasm_bindgen(js_name = handleTouchEvent)]
    pub fn handle_touch_event(&mut self, event: &web_sys::TouchEvent) {
        let phase = match event.type_().as_str() {
            "touchstart" => TouchPhase::Start,
            "touchmove" => TouchPhase::Move,
            "touchend" => TouchPhase::End,
            "touchcancel" => TouchPhase::Cancel,
            other => {
                tracing::debug!("Ignoring touch event {other}");
                return;
            }
        };
        let touches = event.target_touches();
        let points = (0..touches.length())
            .filter_map(|index| touches.get(index))
            .map(|touch| TouchPoint {
                id: u32::try_from(touch.identifier()).unwrap_or_default(),
                x: f64::from(touch.page_x()),
                y: f64::from(touch.page_y()),
            })
            .collect();
        let touch = TouchEvent::new(phase, points, self.target());

        let response = self.annotator.on_touch(&touch);
        if response.prevent_default {
            event.prevent_default();
        }
        self.adopt_pending();
    }

    fn target(&self) -> SurfaceRect {
        self.annotator
            .surface()
            .unwrap_or(SurfaceRect::new(0.0, 0.0, 0.0, 0.0))
    }

    fn mouse_at(&self, x: f64, y: f64) -> MouseEvent {
        MouseEvent::new(x, y, self.target())
    }

    fn adopt_pending(&mut self) {
        if let Some(value) = self.pending.borrow_mut().take() {
            self.annotator.set_value(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted(shape_type: &str) -> WasmAnnotator {
        let mut annotator = WasmAnnotator::new(shape_type.to_string());
        annotator.mount(0.0, 0.0, 100.0, 100.0);
        annotator
    }

    #[test]
    fn new_annotator_has_empty_value() {
        let annotator = WasmAnnotator::new("RECTANGLE".to_string());
        assert_eq!(annotator.value_json(), "{\"data\":{\"text\":\"\"}}");
    }

    #[test]
    fn drag_updates_value() {
        let mut annotator = mounted("RECTANGLE");
        annotator.mouse_down(10.0, 10.0);
        annotator.mouse_move(40.0, 30.0);
        annotator.mouse_up(40.0, 30.0);

        let value: serde_json::Value =
            serde_json::from_str(&annotator.value_json()).expect("valid json");
        assert_eq!(value["geometry"]["width"], 30.0);
        assert_eq!(value["selection"]["mode"], "EDITING");
    }

    #[test]
    fn submit_is_logged_and_drained() {
        let mut annotator = mounted("POINT");
        annotator.click(50.0, 50.0);
        annotator.submit();

        let first: serde_json::Value =
            serde_json::from_str(&annotator.take_submitted_json()).expect("valid json");
        assert_eq!(first["annotations"][0]["geometry"]["type"], "POINT");

        let second: serde_json::Value =
            serde_json::from_str(&annotator.take_submitted_json()).expect("valid json");
        assert_eq!(second["annotations"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn top_annotation_is_null_without_hover() {
        let mut annotator = mounted("RECTANGLE");
        let annotations = r#"[{"geometry":{"type":"RECTANGLE","x":0,"y":0,"width":50,"height":50},"data":{"text":"a"}}]"#;
        annotator.set_annotations_json(annotations).expect("valid annotations");
        assert_eq!(annotator.top_annotation_json(), "null");

        annotator.mouse_move(10.0, 10.0);
        assert!(annotator.top_annotation_json().contains("\"a\""));

        annotator.mouse_leave();
        assert_eq!(annotator.top_annotation_json(), "null");
    }

    #[test]
    fn options_json_switches_shape() {
        let mut annotator = mounted("RECTANGLE");
        annotator
            .set_options_json(r#"{"type":"POINT"}"#)
            .expect("valid options");
        annotator.click(20.0, 20.0);
        assert!(annotator.value_json().contains("POINT"));
    }
}
