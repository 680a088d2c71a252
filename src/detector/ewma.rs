//! EWMA mean/variance estimator for one feature. Single pass, O(1) state apart
//! from a bounded diagnostic history that the statistics never read.

use crate::error::{EngineError, EngineResult};
use std::collections::VecDeque;

/// Raw values retained for inspection.
pub const HISTORY_CAPACITY: usize = 500;

#[derive(Debug, Clone)]
pub struct OnlineAnomalyDetector {
    alpha: f64,
    mean: Option<f64>,
    variance: Option<f64>,
    count: u64,
    history: VecDeque<f64>,
}

impl OnlineAnomalyDetector {
    pub fn new(alpha: f64) -> EngineResult<Self> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(EngineError::InvalidSmoothingFactor(alpha));
        }
        Ok(Self::with_alpha(alpha))
    }

    /// Caller guarantees `alpha` is in (0, 1].
    pub(crate) fn with_alpha(alpha: f64) -> Self {
        Self {
            alpha,
            mean: None,
            variance: None,
            count: 0,
            history: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Absorb `value` into the running estimates.
    ///
    /// The residual feeding the variance is taken against the *updated* mean,
    /// which damps the variance response to a spike.
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        if self.history.len() == HISTORY_CAPACITY {
            self.history.pop_front();
        }
        self.history.push_back(value);

        let (Some(mean), variance) = (self.mean, self.variance) else {
            self.mean = Some(value);
            self.variance = Some(0.0);
            return;
        };
        let a = self.alpha;
        let mean = a * value + (1.0 - a) * mean;
        let residual = value - mean;
        self.variance = Some(a * residual * residual + (1.0 - a) * variance.unwrap_or(0.0));
        self.mean = Some(mean);
    }

    /// Standardized deviation of `value` from the running mean; 0 before the
    /// first observation. A zero, negative or missing variance uses std 1.0.
    pub fn zscore(&self, value: f64) -> f64 {
        let Some(mean) = self.mean else {
            return 0.0;
        };
        let std = match self.variance {
            Some(v) if v > 0.0 => v.sqrt(),
            _ => 1.0,
        };
        (value - mean) / std
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn mean(&self) -> Option<f64> {
        self.mean
    }

    pub fn variance(&self) -> Option<f64> {
        self.variance
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Most recent raw values, oldest first.
    pub fn history(&self) -> impl Iterator<Item = f64> + '_ {
        self.history.iter().copied()
    }
}
