//! Single-feature online anomaly detection.

mod ewma;

pub use ewma::{OnlineAnomalyDetector, HISTORY_CAPACITY};
