//! Access events as handed to the engine by whatever tails and parses the log.
//! Parsing raw lines is the producer's job; the engine only sees this shape.

mod simulate;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use simulate::{SimulatorConfig, TrafficSimulator, USER_AGENTS};

/// One observed HTTP request. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Wall-clock seconds (fractional) since the Unix epoch
    pub timestamp: f64,
    pub source_ip: String,
    pub path: String,
    /// May be empty; empty agents are not counted for entropy
    #[serde(default)]
    pub user_agent: String,
}

impl Event {
    pub fn new(
        timestamp: f64,
        source_ip: impl Into<String>,
        path: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            source_ip: source_ip.into(),
            path: path.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Build an event stamped with a chrono timestamp.
    pub fn at(
        ts: DateTime<Utc>,
        source_ip: impl Into<String>,
        path: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self::new(epoch_secs(ts), source_ip, path, user_agent)
    }

    pub fn has_user_agent(&self) -> bool {
        !self.user_agent.is_empty()
    }
}

/// Fractional seconds since the epoch, the unit every window timestamp uses.
pub fn epoch_secs(ts: DateTime<Utc>) -> f64 {
    ts.timestamp_micros() as f64 / 1e6
}

pub fn now_secs() -> f64 {
    epoch_secs(Utc::now())
}
