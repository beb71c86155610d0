use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StepId(pub u32);

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the reference ordering. Its position in the catalogue is its
/// correct rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: StepId,
    pub label: String,
}

impl Step {
    pub fn new(id: u32, label: impl Into<String>) -> Self {
        Self {
            id: StepId(id),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttemptOutcome {
    Correct,
    Incorrect,
}

impl AttemptOutcome {
    pub fn from_match(is_correct: bool) -> Self {
        if is_correct {
            Self::Correct
        } else {
            Self::Incorrect
        }
    }

    pub fn is_correct(self) -> bool {
        self == Self::Correct
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Correct => "Correct",
            Self::Incorrect => "Incorrect",
        }
    }
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks a step list before it is used as a catalogue.
pub fn validate_steps(steps: &[Step]) -> Result<(), ValidationError> {
    if steps.is_empty() {
        return Err(ValidationError::EmptyCatalogue);
    }
    let mut seen = std::collections::HashSet::with_capacity(steps.len());
    for step in steps {
        if step.id.0 == 0 {
            return Err(ValidationError::NonPositiveStepId);
        }
        if !seen.insert(step.id) {
            return Err(ValidationError::DuplicateStepId(step.id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_and_zero_ids() {
        assert_eq!(validate_steps(&[]), Err(ValidationError::EmptyCatalogue));
        assert_eq!(
            validate_steps(&[Step::new(0, "zero")]),
            Err(ValidationError::NonPositiveStepId)
        );
        assert_eq!(
            validate_steps(&[Step::new(1, "a"), Step::new(1, "b")]),
            Err(ValidationError::DuplicateStepId(StepId(1)))
        );
        assert!(validate_steps(&[Step::new(1, "a"), Step::new(2, "b")]).is_ok());
    }

    #[test]
    fn outcome_serializes_as_title_case_word() {
        assert_eq!(
            serde_json::to_string(&AttemptOutcome::Correct).expect("json"),
            "\"Correct\""
        );
        assert_eq!(AttemptOutcome::from_match(false).to_string(), "Incorrect");
    }
}
