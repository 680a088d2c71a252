//! EWMA detector: validation, update arithmetic, z-score floors.

use access_anomaly::detector::{OnlineAnomalyDetector, HISTORY_CAPACITY};
use access_anomaly::EngineError;

#[test]
fn rejects_alpha_outside_unit_interval() {
    assert_eq!(
        OnlineAnomalyDetector::new(0.0).unwrap_err(),
        EngineError::InvalidSmoothingFactor(0.0)
    );
    assert!(OnlineAnomalyDetector::new(1.5).is_err());
    assert!(OnlineAnomalyDetector::new(-0.1).is_err());
    assert!(OnlineAnomalyDetector::new(f64::NAN).is_err());
    assert!(OnlineAnomalyDetector::new(1.0).is_ok());
}

#[test]
fn zscore_is_zero_before_any_observation() {
    let d = OnlineAnomalyDetector::new(0.1).unwrap();
    assert_eq!(d.zscore(1_000.0), 0.0);
    assert_eq!(d.mean(), None);
    assert_eq!(d.variance(), None);
}

#[test]
fn cold_start_uses_unit_std() {
    let mut d = OnlineAnomalyDetector::new(0.1).unwrap();
    d.update(7.0);
    assert_eq!(d.count(), 1);
    assert_eq!(d.mean(), Some(7.0));
    assert_eq!(d.variance(), Some(0.0));
    assert_eq!(d.zscore(7.0), 0.0);
    assert_eq!(d.zscore(10.0), 3.0);
    assert_eq!(d.zscore(4.0), -3.0);
}

#[test]
fn residual_is_taken_against_updated_mean() {
    let mut d = OnlineAnomalyDetector::new(0.5).unwrap();
    d.update(10.0);
    d.update(20.0);
    // mean' = 15, residual = 20 - 15 = 5, var' = 0.5 * 25
    assert_eq!(d.mean(), Some(15.0));
    assert_eq!(d.variance(), Some(12.5));
}

#[test]
fn constant_input_converges() {
    let mut d = OnlineAnomalyDetector::new(0.1).unwrap();
    d.update(100.0);
    for _ in 0..500 {
        d.update(5.0);
    }
    let mean = d.mean().unwrap();
    let var = d.variance().unwrap();
    assert!((mean - 5.0).abs() < 1e-9, "mean {mean}");
    assert!(var.abs() < 1e-9, "variance {var}");
}

#[test]
fn accepts_negative_and_zero_values() {
    let mut d = OnlineAnomalyDetector::new(0.3).unwrap();
    for v in [0.0, -4.0, 0.0, -12.5] {
        d.update(v);
    }
    assert_eq!(d.count(), 4);
    assert!(d.zscore(-1.0).is_finite());
}

#[test]
fn history_keeps_most_recent_values() {
    let mut d = OnlineAnomalyDetector::new(0.2).unwrap();
    for i in 0..600 {
        d.update(i as f64);
    }
    let history: Vec<f64> = d.history().collect();
    assert_eq!(history.len(), HISTORY_CAPACITY);
    assert_eq!(history.first().copied(), Some(100.0));
    assert_eq!(history.last().copied(), Some(599.0));
}
