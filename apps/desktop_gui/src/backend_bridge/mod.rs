//! Background runtime that carries attempt reports off the UI thread.

pub mod runtime;
