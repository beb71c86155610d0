//! Drag-to-order activity: shuffled steps, pointer reordering, validation and
//! fire-and-forget reporting of each attempt.

pub mod config;
pub mod controller;
pub mod error;
pub mod reporter;
pub mod sequence;
pub mod session;
pub mod surface;
pub mod validator;

pub use config::{load_settings, load_settings_from, Settings, SettingsError};
pub use controller::{
    ActivityController, ActivityPhase, Feedback, Handled, InputEvent, Submission,
};
pub use error::ActivityError;
pub use reporter::{
    Attempt, AttemptCollector, AttemptReporter, HttpCollector, MissingCollector, ReportHandle,
    ReportOutcome,
};
pub use sequence::SequenceModel;
pub use session::SessionIdentity;
pub use surface::{ReorderSurface, TileBounds, TileLayout, UniformTileLayout};
