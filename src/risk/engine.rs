//! Fuses per-feature z-scores into one bounded score and an alert decision.

use crate::config::{AlertConfig, Normalization, ScoringConfig};
use crate::detector::OnlineAnomalyDetector;
use crate::features::{Feature, FeatureVector};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Smoothing factor shared by the four feature detectors.
pub const SCORER_ALPHA: f64 = 0.1;

const SCORE_SCALE: f64 = 10.0;
const MAX_SCORE: f64 = 100.0;
/// Request z-score needed alongside `min_score` for the secondary alert path.
const MODERATE_REQUEST_Z: f64 = 2.0;

fn weight(feature: Feature) -> f64 {
    match feature {
        Feature::Requests => 0.5,
        Feature::UniqueIps => 0.3,
        Feature::TopPathCount => 0.1,
        Feature::UaEntropy => 0.1,
    }
}

/// Outcome of scoring one feature vector; owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeScoreResult {
    /// 0–100
    pub score: f64,
    pub per_feature_z: BTreeMap<Feature, f64>,
    /// `max(0, z)` per feature
    pub per_feature_contribution: BTreeMap<Feature, f64>,
}

impl CompositeScoreResult {
    pub fn z(&self, feature: Feature) -> f64 {
        self.per_feature_z.get(&feature).copied().unwrap_or(0.0)
    }

    pub fn contribution(&self, feature: Feature) -> f64 {
        self.per_feature_contribution
            .get(&feature)
            .copied()
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone)]
pub struct CompositeAnomalyScorer {
    requests: OnlineAnomalyDetector,
    unique_ips: OnlineAnomalyDetector,
    top_path_count: OnlineAnomalyDetector,
    ua_entropy: OnlineAnomalyDetector,
    normalization: Normalization,
}

impl Default for CompositeAnomalyScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeAnomalyScorer {
    pub fn new() -> Self {
        Self::with_config(ScoringConfig::default())
    }

    pub fn with_config(config: ScoringConfig) -> Self {
        Self {
            requests: OnlineAnomalyDetector::with_alpha(SCORER_ALPHA),
            unique_ips: OnlineAnomalyDetector::with_alpha(SCORER_ALPHA),
            top_path_count: OnlineAnomalyDetector::with_alpha(SCORER_ALPHA),
            ua_entropy: OnlineAnomalyDetector::with_alpha(SCORER_ALPHA),
            normalization: config.normalization,
        }
    }

    pub fn detector(&self, feature: Feature) -> &OnlineAnomalyDetector {
        match feature {
            Feature::Requests => &self.requests,
            Feature::UniqueIps => &self.unique_ips,
            Feature::TopPathCount => &self.top_path_count,
            Feature::UaEntropy => &self.ua_entropy,
        }
    }

    fn detector_mut(&mut self, feature: Feature) -> &mut OnlineAnomalyDetector {
        match feature {
            Feature::Requests => &mut self.requests,
            Feature::UniqueIps => &mut self.unique_ips,
            Feature::TopPathCount => &mut self.top_path_count,
            Feature::UaEntropy => &mut self.ua_entropy,
        }
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// Update every detector with `features` and fuse the resulting z-scores.
    ///
    /// With [`Normalization::Absorbed`] each value is scored after it has been
    /// folded into its own baseline, so a sustained anomaly scores lower on
    /// every successive call.
    pub fn score(&mut self, features: &FeatureVector) -> CompositeScoreResult {
        let normalization = self.normalization;
        let mut per_feature_z = BTreeMap::new();
        let mut per_feature_contribution = BTreeMap::new();
        let mut raw = 0.0;

        for feature in Feature::ALL {
            let value = features.get(feature);
            let detector = self.detector_mut(feature);
            let z = match normalization {
                Normalization::Absorbed => {
                    detector.update(value);
                    detector.zscore(value)
                }
                Normalization::Prior => {
                    let z = detector.zscore(value);
                    detector.update(value);
                    z
                }
            };
            // f64::max drops a NaN operand, so a poisoned detector contributes 0.
            let contribution = z.max(0.0);
            raw += weight(feature) * contribution;
            per_feature_z.insert(feature, z);
            per_feature_contribution.insert(feature, contribution);
        }

        CompositeScoreResult {
            score: (raw * SCORE_SCALE).clamp(0.0, MAX_SCORE),
            per_feature_z,
            per_feature_contribution,
        }
    }

    /// Pure alert decision. Does not apply `min_requests_for_alert`; the caller
    /// gates on volume before acting.
    pub fn is_alert(result: &CompositeScoreResult, config: &AlertConfig) -> bool {
        let z_requests = result.z(Feature::Requests);
        let z_unique_ips = result.z(Feature::UniqueIps);
        if z_requests >= config.alert_z_threshold || z_unique_ips >= config.alert_z_threshold {
            return true;
        }
        result.score >= config.min_score && z_requests > MODERATE_REQUEST_Z
    }
}
