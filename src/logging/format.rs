//! JSON log lines: one JSON object per line (ndjson) for ingestion and audit.

use crate::config::LogConfig;
use crate::features::Feature;
use crate::monitor::Observation;
use crate::risk::Confidence;
use serde::Serialize;
use std::io::{self, Write};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Flat record of one scored observation.
#[derive(Debug, Serialize)]
pub struct AlertLogLine<'a> {
    pub ts: String,
    pub level: &'a str,
    pub message: &'a str,
    pub score: f64,
    pub confidence: Confidence,
    pub requests: u64,
    pub unique_ips: u64,
    pub z_requests: f64,
    pub z_unique_ips: f64,
    pub alert: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_offender: Option<&'a str>,
}

impl<'a> AlertLogLine<'a> {
    pub fn from_observation(
        obs: &Observation,
        message: &'a str,
        top_offender: Option<&'a str>,
    ) -> Self {
        Self {
            ts: chrono::Utc::now().to_rfc3339(),
            level: if obs.alert { "warn" } else { "info" },
            message,
            score: obs.result.score,
            confidence: Confidence::from_score(obs.result.score),
            requests: obs.features.requests,
            unique_ips: obs.features.unique_ips,
            z_requests: obs.result.z(Feature::Requests),
            z_unique_ips: obs.result.z(Feature::UniqueIps),
            alert: obs.alert,
            top_offender,
        }
    }
}

pub struct StructuredLogger;

impl StructuredLogger {
    /// Install global subscriber: JSON lines to stdout, level from RUST_LOG or default.
    /// Returns `false` (and changes nothing) when a subscriber is already installed.
    pub fn init(json: bool, default_level: &str) -> bool {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));
        if json {
            let fmt = tracing_subscriber::fmt::layer()
                .json()
                .with_span_events(FmtSpan::NONE)
                .with_writer(std::io::stdout);
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt)
                .try_init()
                .is_ok()
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
                .try_init()
                .is_ok()
        }
    }

    /// Install the subscriber described by an engine's [`LogConfig`].
    pub fn init_from(config: &LogConfig) -> bool {
        Self::init(config.json, &config.level)
    }

    /// Emit a single structured log line without going through tracing.
    pub fn emit_json(event: &impl Serialize, w: &mut impl Write) -> io::Result<()> {
        let line = serde_json::to_string(event)?;
        writeln!(w, "{}", line)
    }
}
