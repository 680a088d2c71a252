//! Construction-time errors. Per-event processing never fails once built.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Window duration must be a finite number of seconds greater than zero.
    #[error("invalid window duration: {0} (must be finite and > 0)")]
    InvalidWindowDuration(f64),

    /// Smoothing factor must lie in (0, 1].
    #[error("invalid smoothing factor: {0} (must be in (0, 1])")]
    InvalidSmoothingFactor(f64),

    #[error("invalid alert config: {0}")]
    InvalidAlertConfig(String),

    #[error("invalid config document: {0}")]
    InvalidConfigDocument(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
