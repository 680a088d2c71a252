//! Single-stream driver: event → window → features → score → gated alert.
//!
//! One monitor per log stream. Producers on several threads must funnel through
//! one owner; `&mut self` on every mutating call makes that explicit.

use crate::config::{AlertConfig, EngineConfig};
use crate::error::EngineResult;
use crate::events::Event;
use crate::features::{EventWindow, Feature, FeatureVector};
use crate::risk::{CompositeAnomalyScorer, CompositeScoreResult};
use tracing::{debug, info, trace};

/// Everything produced for one ingested event.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub features: FeatureVector,
    pub result: CompositeScoreResult,
    /// Alert decision after the volume floor was applied
    pub alert: bool,
}

pub struct TrafficMonitor {
    config: EngineConfig,
    window: EventWindow,
    scorer: CompositeAnomalyScorer,
}

impl TrafficMonitor {
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let window = EventWindow::new(config.window_secs)?;
        let scorer = CompositeAnomalyScorer::with_config(config.scoring);
        debug!(
            window_secs = config.window_secs,
            normalization = ?config.scoring.normalization,
            "traffic monitor ready"
        );
        Ok(Self {
            config,
            window,
            scorer,
        })
    }

    pub fn observe(&mut self, event: Event) -> Observation {
        self.window.add(event);
        let features = self.window.features();
        let result = self.scorer.score(&features);
        let alert = gated_alert(&features, &result, &self.config.alert);
        if alert {
            info!(
                score = result.score,
                z_requests = result.z(Feature::Requests),
                z_unique_ips = result.z(Feature::UniqueIps),
                requests = features.requests,
                "traffic anomaly alert"
            );
        }
        Observation {
            features,
            result,
            alert,
        }
    }

    /// Evict against an explicit clock while the stream is idle.
    pub fn tick(&mut self, now: f64) -> usize {
        let evicted = self.window.evict(now);
        if evicted > 0 {
            trace!(evicted, remaining = self.window.len(), "idle eviction");
        }
        evicted
    }

    pub fn window(&self) -> &EventWindow {
        &self.window
    }

    pub fn scorer(&self) -> &CompositeAnomalyScorer {
        &self.scorer
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

fn gated_alert(
    features: &FeatureVector,
    result: &CompositeScoreResult,
    config: &AlertConfig,
) -> bool {
    CompositeAnomalyScorer::is_alert(result, config)
        && features.requests >= config.min_requests_for_alert
}
