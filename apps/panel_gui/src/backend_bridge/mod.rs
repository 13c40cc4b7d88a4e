//! Bridge between the panel UI and the directory worker thread.

pub mod commands;
pub mod runtime;
