//! Bridge between the UI thread and the tokio-backed contact store worker.

pub mod commands;
pub mod runtime;
