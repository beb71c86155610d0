//! Controller layer: turning widget responses into activity input events.

pub mod events;
pub mod orchestration;
