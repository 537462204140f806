//! Bridge between the egui thread and the tokio worker running submissions.

pub mod commands;
pub mod runtime;
