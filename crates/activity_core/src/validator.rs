use shared::domain::{AttemptOutcome, StepId};

/// Exact positional comparison of a submitted order against the reference.
pub fn validate(candidate: &[StepId], canonical: &[StepId]) -> bool {
    candidate == canonical
}

pub fn score(candidate: &[StepId], canonical: &[StepId]) -> AttemptOutcome {
    AttemptOutcome::from_match(validate(candidate, canonical))
}
