//! Frame-level gesture extraction and start-form error messages.

use activity_core::{ActivityError, InputEvent};
use shared::{domain::StepId, error::ValidationError};

/// Drag signals one tile widget reported during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSignals {
    pub id: StepId,
    pub drag_started: bool,
    pub drag_stopped: bool,
}

/// Pointer state sampled once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerFrame {
    pub y: Option<f32>,
    pub primary_down: bool,
    pub released: bool,
}

/// Orders a frame's signals the way the surface expects them: start, move,
/// then end. A release anywhere ends the active drag even if the tile widget
/// missed it, and an active drag with no button held is ended without moving.
pub fn gestures_for_frame(
    signals: &[TileSignals],
    active: Option<StepId>,
    pointer: PointerFrame,
) -> Vec<InputEvent> {
    let mut events = Vec::new();
    let mut dragging = active;

    if dragging.is_none() {
        if let Some(started) = signals.iter().find(|s| s.drag_started) {
            events.push(InputEvent::DragStart(started.id));
            dragging = Some(started.id);
        }
    }

    let Some(dragging) = dragging else {
        return events;
    };
    if !pointer.primary_down && !pointer.released {
        events.push(InputEvent::DragEnd(dragging));
        return events;
    }
    if let Some(pointer_y) = pointer.y {
        events.push(InputEvent::DragMove { pointer_y });
    }
    let stopped = signals
        .iter()
        .any(|s| s.id == dragging && s.drag_stopped);
    if stopped || pointer.released {
        events.push(InputEvent::DragEnd(dragging));
    }
    events
}

pub fn classify_start_failure(err: &ActivityError) -> String {
    match err {
        ActivityError::Identity(ValidationError::MissingName | ValidationError::MissingEmail) => {
            "Please enter your name and email to start the activity.".to_string()
        }
        other => format!("Could not start the activity: {other}"),
    }
}
