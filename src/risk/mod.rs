//! Composite anomaly scoring and alert decisions.

mod engine;
mod explain;

pub use engine::{CompositeAnomalyScorer, CompositeScoreResult, SCORER_ALPHA};
pub use explain::{explain, Confidence, Contributor, Explanation};
