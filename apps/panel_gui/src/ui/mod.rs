//! UI layer: the company panel shell.

pub mod app;
