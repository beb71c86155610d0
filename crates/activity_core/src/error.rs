use shared::error::ValidationError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActivityError {
    #[error("please enter your name and email to start the activity: {0}")]
    Identity(#[from] ValidationError),
    #[error("the activity has not been started")]
    NotStarted,
    #[error("the activity is already running; end the session to change identity")]
    AlreadyStarted,
}
