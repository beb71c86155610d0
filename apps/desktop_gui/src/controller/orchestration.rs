//! Routes UI actions into the activity controller.

use activity_core::{ActivityController, Handled, InputEvent, TileLayout};

use crate::controller::events::classify_start_failure;

/// Returns the notice to show on the start form when identity is refused.
pub fn start_activity(controller: &mut ActivityController, name: &str, email: &str) -> Option<String> {
    match controller.start(name, email) {
        Ok(()) => None,
        Err(err) => {
            tracing::debug!("start refused: {err}");
            Some(classify_start_failure(&err))
        }
    }
}

/// Feeds one input event through the controller. Returns whether the window
/// needs a repaint. Report delivery is left to run in the background.
pub fn dispatch_input<L>(controller: &mut ActivityController, event: InputEvent, layout: &L) -> bool
where
    L: TileLayout + ?Sized,
{
    match controller.handle(event, layout) {
        Ok(Handled::Gesture { changed }) => changed,
        Ok(Handled::Submitted(submission)) => {
            tracing::debug!(
                outcome = submission.feedback.outcome.as_str(),
                "feedback rendered; report left in flight"
            );
            true
        }
        Err(err) => {
            tracing::warn!("input ignored: {err}");
            false
        }
    }
}
