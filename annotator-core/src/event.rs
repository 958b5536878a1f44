//! Raw input events delivered to the annotator.
//!
//! Positions are page pixels, exactly as the input source reports them.
//! Each event carries the bounding box of the element it targeted so that
//! selectors can convert it into surface percentages on their own.

use serde::{Deserialize, Serialize};

use crate::SurfaceRect;

/// Phase of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPhase {
    /// Touch started (finger down).
    Start,
    /// Touch moved (finger dragging).
    Move,
    /// Touch ended (finger up).
    End,
    /// Touch cancelled (e.g., palm rejection).
    Cancel,
}

/// A single touch point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    /// Touch identifier (for multi-touch).
    pub id: u32,
    /// X position in page pixels.
    pub x: f64,
    /// Y position in page pixels.
    pub y: f64,
}

/// A touch event with the touches currently on the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    /// Phase of this touch event.
    pub phase: TouchPhase,
    /// Touch points currently on the target element.
    pub touches: Vec<TouchPoint>,
    /// Bounding box of the target element.
    pub target: SurfaceRect,
}

impl TouchEvent {
    /// Create a new touch event.
    #[must_use]
    pub fn new(phase: TouchPhase, touches: Vec<TouchPoint>, target: SurfaceRect) -> Self {
        Self {
            phase,
            touches,
            target,
        }
    }

    /// The only touch point, if exactly one finger is down.
    #[must_use]
    pub fn single_touch(&self) -> Option<&TouchPoint> {
        match self.touches.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

/// A mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseEvent {
    /// X position in page pixels.
    pub x: f64,
    /// Y position in page pixels.
    pub y: f64,
    /// Bounding box of the target element.
    pub target: SurfaceRect,
}

impl MouseEvent {
    /// Create a mouse event.
    #[must_use]
    pub const fn new(x: f64, y: f64, target: SurfaceRect) -> Self {
        Self { x, y, target }
    }
}

/// Any input event the annotator can receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum InputEvent {
    /// Mouse event.
    Mouse(MouseEvent),
    /// Touch event.
    Touch(TouchEvent),
}

impl InputEvent {
    /// Bounding box of the element the event targeted.
    #[must_use]
    pub fn target(&self) -> SurfaceRect {
        match self {
            Self::Mouse(mouse) => mouse.target,
            Self::Touch(touch) => touch.target,
        }
    }
}

impl From<MouseEvent> for InputEvent {
    fn from(event: MouseEvent) -> Self {
        Self::Mouse(event)
    }
}

impl From<TouchEvent> for InputEvent {
    fn from(event: TouchEvent) -> Self {
        Self::Touch(event)
    }
}

/// Interaction methods a selector can implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    /// Mouse button pressed.
    MouseDown,
    /// Mouse moved over the surface.
    MouseMove,
    /// Mouse button released.
    MouseUp,
    /// Click (press and release without leaving).
    Click,
    /// First finger down.
    TouchStart,
    /// Finger moved.
    TouchMove,
    /// Finger lifted.
    TouchEnd,
}

impl Method {
    /// Handler name as used in log messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MouseDown => "onMouseDown",
            Self::MouseMove => "onMouseMove",
            Self::MouseUp => "onMouseUp",
            Self::Click => "onClick",
            Self::TouchStart => "onTouchStart",
            Self::TouchMove => "onTouchMove",
            Self::TouchEnd => "onTouchEnd",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> SurfaceRect {
        SurfaceRect::new(0.0, 0.0, 100.0, 100.0)
    }

    fn touch(id: u32, x: f64, y: f64) -> TouchPoint {
        TouchPoint { id, x, y }
    }

    #[test]
    fn single_touch_only_with_exactly_one_finger() {
        let none = TouchEvent::new(TouchPhase::End, vec![], target());
        assert!(none.single_touch().is_none());

        let one = TouchEvent::new(TouchPhase::Move, vec![touch(0, 1.0, 2.0)], target());
        assert_eq!(one.single_touch().map(|t| t.id), Some(0));

        let two = TouchEvent::new(
            TouchPhase::Move,
            vec![touch(0, 1.0, 2.0), touch(1, 3.0, 4.0)],
            target(),
        );
        assert!(two.single_touch().is_none());
    }

    #[test]
    fn input_event_json_is_tagged() {
        let event = InputEvent::from(MouseEvent::new(5.0, 6.0, target()));
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json["type"], "Mouse");
        assert_eq!(json["data"]["x"], 5.0);
    }

    #[test]
    fn method_names_match_handler_names() {
        assert_eq!(Method::MouseUp.to_string(), "onMouseUp");
        assert_eq!(Method::TouchEnd.name(), "onTouchEnd");
    }
}
