//! Boundary between the poster model and whatever recognizes pointer gestures.
//!
//! Gesture recognition and hit-testing live outside this crate. A backend
//! resolves which layer a pointer is over and reports deltas through
//! [`GestureHandler`]; the model never sees raw pointer input.

use serde::{Deserialize, Serialize};

use crate::error::PosterError;
use crate::layer::LayerId;

/// Pointer movement since the previous drag event, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DragEvent {
    pub dx: f64,
    pub dy: f64,
}

/// Two-finger gesture update since the previous event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinchEvent {
    /// Rotation delta in degrees.
    pub da: f64,
    /// Pinch ratio relative to the previous event; 1.0 means no zoom.
    pub scale: f64,
}

impl Default for PinchEvent {
    fn default() -> Self {
        Self { da: 0.0, scale: 1.0 }
    }
}

/// Capabilities a gesture backend drives, one call per recognized phase.
pub trait GestureHandler {
    fn on_drag_start(&mut self, target: &str) -> Result<(), PosterError>;
    fn on_drag_move(&mut self, target: &str, event: DragEvent) -> Result<(), PosterError>;
    fn on_drag_end(&mut self, target: &str) -> Result<(), PosterError>;
    fn on_gesture_start(&mut self, target: &str) -> Result<(), PosterError>;
    fn on_gesture_move(&mut self, target: &str, event: PinchEvent) -> Result<(), PosterError>;
    fn on_gesture_end(&mut self, target: &str) -> Result<(), PosterError>;
}

/// A recorded input event, as replayed from a JSON event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    DragStart { target: LayerId },
    DragMove { target: LayerId, dx: f64, dy: f64 },
    DragEnd { target: LayerId },
    GestureStart { target: LayerId },
    GestureMove { target: LayerId, da: f64, scale: f64 },
    GestureEnd { target: LayerId },
    Resize { width: f64, height: f64 },
}

impl InputEvent {
    /// Feed a gesture event to a handler. Returns `Ok(false)` for events that
    /// are not gestures (resizes), leaving them to the caller.
    pub fn dispatch_gesture<H>(&self, handler: &mut H) -> Result<bool, PosterError>
    where
        H: GestureHandler + ?Sized,
    {
        match self {
            InputEvent::DragStart { target } => handler.on_drag_start(target)?,
            InputEvent::DragMove { target, dx, dy } => {
                handler.on_drag_move(target, DragEvent { dx: *dx, dy: *dy })?
            }
            InputEvent::DragEnd { target } => handler.on_drag_end(target)?,
            InputEvent::GestureStart { target } => handler.on_gesture_start(target)?,
            InputEvent::GestureMove { target, da, scale } => {
                handler.on_gesture_move(target, PinchEvent { da: *da, scale: *scale })?
            }
            InputEvent::GestureEnd { target } => handler.on_gesture_end(target)?,
            InputEvent::Resize { .. } => return Ok(false),
        }
        Ok(true)
    }

    pub fn parse_log(json: &str) -> Result<Vec<InputEvent>, serde_json::Error> {
        serde_json::from_str(json)
    }
}
