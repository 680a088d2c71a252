//! Engine configuration. Every recognized option is listed here with its default;
//! validation runs once when a [`crate::monitor::TrafficMonitor`] is built.

use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Trailing window length in seconds
    pub window_secs: f64,
    /// Alert thresholds
    pub alert: AlertConfig,
    /// How observations are normalized against their baseline
    pub scoring: ScoringConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// A single `requests` or `unique_ips` z-score at or above this alerts on its own
    pub alert_z_threshold: f64,
    /// Secondary gate (0–100), combined with a moderate request z-score
    pub min_score: f64,
    /// Volume floor applied by the caller before acting on an alert
    pub min_requests_for_alert: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub normalization: Normalization,
}

/// Which baseline a fresh observation is standardized against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Update the detector first, then score the value against the baseline that
    /// already contains it. Sustained anomalies fade as they are absorbed, and no
    /// z-score can exceed `1 / sqrt(alpha)`.
    #[default]
    Absorbed,
    /// Score against the baseline as it stood before this value, then update.
    Prior,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_secs: 60.0,
            alert: AlertConfig::default(),
            scoring: ScoringConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            alert_z_threshold: 4.0,
            min_score: 60.0,
            min_requests_for_alert: 200,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl AlertConfig {
    pub fn validate(&self) -> EngineResult<()> {
        if !self.alert_z_threshold.is_finite() {
            return Err(EngineError::InvalidAlertConfig(format!(
                "alert_z_threshold must be finite, got {}",
                self.alert_z_threshold
            )));
        }
        if !(0.0..=100.0).contains(&self.min_score) {
            return Err(EngineError::InvalidAlertConfig(format!(
                "min_score must be in [0, 100], got {}",
                self.min_score
            )));
        }
        Ok(())
    }
}

impl EngineConfig {
    pub fn validate(&self) -> EngineResult<()> {
        if !(self.window_secs.is_finite() && self.window_secs > 0.0) {
            return Err(EngineError::InvalidWindowDuration(self.window_secs));
        }
        self.alert.validate()
    }

    /// Parse a JSON document (missing fields take their defaults) and validate it.
    pub fn from_json_str(data: &str) -> EngineResult<Self> {
        let config: EngineConfig = serde_json::from_str(data)
            .map_err(|e| EngineError::InvalidConfigDocument(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
