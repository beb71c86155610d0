//! UI layer for the activity window: start form, tile list, feedback banner.

pub mod app;

pub use app::ActivityApp;
