use thiserror::Error;

use crate::domain::StepId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    MissingName,
    #[error("email must not be empty")]
    MissingEmail,
    #[error("step catalogue must contain at least one step")]
    EmptyCatalogue,
    #[error("step ids must be positive")]
    NonPositiveStepId,
    #[error("duplicate step id {0}")]
    DuplicateStepId(StepId),
}
