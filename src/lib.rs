//! Access-log anomaly engine: a time-bounded event window with exact rolling
//! aggregates, per-feature EWMA detectors, and a composite scorer that fuses
//! their z-scores into a bounded score plus an alert decision.
//!
//! Modular structure:
//! - [`events`] — Access event shape and a synthetic traffic generator
//! - [`features`] — Sliding event window and derived feature vector
//! - [`detector`] — Online EWMA mean/variance anomaly detector
//! - [`risk`] — Composite scoring, alert decision, explanations
//! - [`monitor`] — Single-stream driver tying the pieces together
//! - [`logging`] — Structured JSON logging
//!
//! The engine is synchronous and does no I/O; feed it from any thread, task or
//! callback, one stream per monitor.

pub mod config;
pub mod detector;
pub mod error;
pub mod events;
pub mod features;
pub mod logging;
pub mod monitor;
pub mod risk;

pub use config::{AlertConfig, EngineConfig, Normalization, ScoringConfig};
pub use detector::OnlineAnomalyDetector;
pub use error::{EngineError, EngineResult};
pub use events::Event;
pub use features::{EventWindow, Feature, FeatureVector};
pub use logging::StructuredLogger;
pub use monitor::{Observation, TrafficMonitor};
pub use risk::{CompositeAnomalyScorer, CompositeScoreResult};
