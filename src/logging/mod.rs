//! Structured logging setup for hosts embedding the engine.

mod format;

pub use format::{AlertLogLine, StructuredLogger};
