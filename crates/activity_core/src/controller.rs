//! Activity state machine: identity capture, reorder gestures, submission.

use chrono::Utc;
use shared::domain::{AttemptOutcome, StepId};
use tracing::{debug, info, warn};

use crate::{
    error::ActivityError,
    reporter::{Attempt, AttemptReporter, ReportHandle},
    sequence::SequenceModel,
    session::SessionIdentity,
    surface::{ReorderSurface, TileLayout},
    validator,
};

const SUCCESS_MESSAGE: &str = "Great job! You have arranged the steps correctly.";
const FAILURE_MESSAGE: &str = "Some steps are out of order. Please try again to complete the flow.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityPhase {
    NotStarted,
    InProgress,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    DragStart(StepId),
    DragMove { pointer_y: f32 },
    DragEnd(StepId),
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    pub outcome: AttemptOutcome,
}

impl Feedback {
    pub fn message(&self) -> &'static str {
        match self.outcome {
            AttemptOutcome::Correct => SUCCESS_MESSAGE,
            AttemptOutcome::Incorrect => FAILURE_MESSAGE,
        }
    }

    pub fn style_class(&self) -> &'static str {
        match self.outcome {
            AttemptOutcome::Correct => "activity-result success",
            AttemptOutcome::Incorrect => "activity-result error",
        }
    }
}

/// What a submit produced: feedback to show now, and the in-flight report
/// which callers normally drop.
pub struct Submission {
    pub feedback: Feedback,
    pub report: ReportHandle,
}

pub enum Handled {
    Gesture { changed: bool },
    Submitted(Submission),
}

pub struct ActivityController {
    model: SequenceModel,
    surface: ReorderSurface,
    reporter: AttemptReporter,
    identity: Option<SessionIdentity>,
    phase: ActivityPhase,
    feedback: Option<Feedback>,
}

impl ActivityController {
    pub fn new(model: SequenceModel, reporter: AttemptReporter) -> Self {
        if model.len() < 2 {
            warn!(
                steps = model.len(),
                "activity: catalogue has fewer than two steps; every attempt will be correct"
            );
        }
        Self {
            model,
            surface: ReorderSurface::new(),
            reporter,
            identity: None,
            phase: ActivityPhase::NotStarted,
            feedback: None,
        }
    }

    pub fn phase(&self) -> ActivityPhase {
        self.phase
    }

    pub fn identity(&self) -> Option<&SessionIdentity> {
        self.identity.as_ref()
    }

    pub fn surface(&self) -> &ReorderSurface {
        &self.surface
    }

    pub fn model(&self) -> &SequenceModel {
        &self.model
    }

    /// Feedback of the most recent submit in this run.
    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    /// Captures identity and begins a run. Blank input, or a session that
    /// already holds an identity, leaves the controller untouched.
    pub fn start(&mut self, name: &str, email: &str) -> Result<(), ActivityError> {
        if self.phase != ActivityPhase::NotStarted {
            return Err(ActivityError::AlreadyStarted);
        }
        let identity = SessionIdentity::capture(name, email)?;
        info!("activity: identity captured");
        self.identity = Some(identity);
        self.restart()
    }

    /// Fresh shuffle for the current identity.
    pub fn restart(&mut self) -> Result<(), ActivityError> {
        if self.identity.is_none() {
            return Err(ActivityError::NotStarted);
        }
        self.surface.render(self.model.shuffled_copy());
        self.feedback = None;
        self.phase = ActivityPhase::InProgress;
        debug!(order = ?self.surface.current_order(), "activity: tiles shuffled");
        Ok(())
    }

    pub fn end_session(&mut self) {
        self.identity = None;
        self.surface.render(Vec::new());
        self.feedback = None;
        self.phase = ActivityPhase::NotStarted;
        info!("activity: session ended");
    }

    pub fn handle<L>(&mut self, event: InputEvent, layout: &L) -> Result<Handled, ActivityError>
    where
        L: TileLayout + ?Sized,
    {
        let changed = match event {
            InputEvent::DragStart(id) => self.on_drag_start(id),
            InputEvent::DragMove { pointer_y } => self.on_drag_move(pointer_y, layout),
            InputEvent::DragEnd(id) => self.on_drag_end(id),
            InputEvent::Submit => return self.on_submit().map(Handled::Submitted),
        };
        Ok(Handled::Gesture { changed })
    }

    pub fn on_drag_start(&mut self, id: StepId) -> bool {
        self.accepts_gestures() && self.surface.begin_drag(id)
    }

    pub fn on_drag_move<L>(&mut self, pointer_y: f32, layout: &L) -> bool
    where
        L: TileLayout + ?Sized,
    {
        self.accepts_gestures() && self.surface.drag_over(pointer_y, layout)
    }

    pub fn on_drag_end(&mut self, id: StepId) -> bool {
        self.accepts_gestures() && self.surface.end_drag(id)
    }

    /// Scores the current order, dispatches the report and returns feedback
    /// without waiting on delivery. Repeated submits each send a report.
    pub fn on_submit(&mut self) -> Result<Submission, ActivityError> {
        let identity = match (&self.identity, self.phase) {
            (Some(identity), ActivityPhase::InProgress | ActivityPhase::Submitted) => {
                identity.clone()
            }
            _ => return Err(ActivityError::NotStarted),
        };

        let submitted_order = self.surface.current_order();
        let outcome = validator::score(&submitted_order, &self.model.canonical_ids());
        let attempt = Attempt {
            identity,
            submitted_order,
            outcome,
            submitted_at: Utc::now(),
        };
        let report = self.reporter.report(&attempt);
        info!(outcome = outcome.as_str(), "activity: attempt submitted");

        let feedback = Feedback { outcome };
        self.feedback = Some(feedback);
        self.phase = ActivityPhase::Submitted;
        Ok(Submission { feedback, report })
    }

    fn accepts_gestures(&self) -> bool {
        self.phase != ActivityPhase::NotStarted
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
