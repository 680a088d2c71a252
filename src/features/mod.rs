//! Time-bounded event window and the traffic features derived from it.

mod counter;
mod window;

pub use counter::CountedMap;
pub use window::EventWindow;

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four tracked traffic features, in scoring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Requests,
    UniqueIps,
    TopPathCount,
    UaEntropy,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::Requests,
        Feature::UniqueIps,
        Feature::TopPathCount,
        Feature::UaEntropy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Requests => "requests",
            Feature::UniqueIps => "unique_ips",
            Feature::TopPathCount => "top_path_count",
            Feature::UaEntropy => "ua_entropy",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of window aggregates; computed fresh on every call.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Events currently retained
    pub requests: u64,
    /// Distinct source IPs retained
    pub unique_ips: u64,
    /// Highest per-path count, 0 when empty
    pub top_path_count: u64,
    /// Shannon entropy (bits) of the user-agent distribution
    pub ua_entropy: f64,
}

impl FeatureVector {
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Requests => self.requests as f64,
            Feature::UniqueIps => self.unique_ips as f64,
            Feature::TopPathCount => self.top_path_count as f64,
            Feature::UaEntropy => self.ua_entropy,
        }
    }
}
