//! Which features drove a score, and how much to trust it.

use super::CompositeScoreResult;
use crate::features::Feature;
use serde::{Deserialize, Serialize};

const TOP_CONTRIBUTORS: usize = 3;
const SHARE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn from_score(score: f64) -> Self {
        if score > 70.0 {
            Confidence::High
        } else if score > 40.0 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    pub feature: Feature,
    pub contribution: f64,
    /// Share of the summed contributions, 0–100
    pub share_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub contributors: Vec<Contributor>,
    pub narrative: String,
    pub confidence: Confidence,
}

pub fn explain(result: &CompositeScoreResult) -> Explanation {
    let total: f64 = result.per_feature_contribution.values().sum();
    let mut ranked: Vec<(Feature, f64)> = Feature::ALL
        .iter()
        .map(|&f| (f, result.contribution(f)))
        .collect();
    // Stable sort keeps feature order among equal contributions.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let contributors: Vec<Contributor> = ranked
        .into_iter()
        .take(TOP_CONTRIBUTORS)
        .map(|(feature, contribution)| Contributor {
            feature,
            contribution,
            share_percent: contribution * 100.0 / (total + SHARE_EPSILON),
        })
        .collect();

    let narrative = contributors
        .iter()
        .map(|c| format!("{} contributed ~{:.0}% to anomaly score", c.feature, c.share_percent))
        .collect::<Vec<_>>()
        .join("; ");

    Explanation {
        contributors,
        narrative,
        confidence: Confidence::from_score(result.score),
    }
}
