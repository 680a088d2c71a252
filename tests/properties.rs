//! Property checks: window exactness, aggregate consistency, score bounds.

use access_anomaly::config::{Normalization, ScoringConfig};
use access_anomaly::events::Event;
use access_anomaly::features::{EventWindow, Feature, FeatureVector};
use access_anomaly::risk::{CompositeAnomalyScorer, SCORER_ALPHA};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

const IPS: [&str; 4] = ["10.0.0.1", "10.0.0.2", "10.0.0.3", "10.0.0.4"];
const PATHS: [&str; 3] = ["/", "/login", "/api"];
const AGENTS: [&str; 3] = ["", "curl/7.68.0", "Mozilla/5.0"];

fn arb_stream() -> impl Strategy<Value = Vec<(u8, usize, usize, usize)>> {
    prop::collection::vec((0u8..8, 0..IPS.len(), 0..PATHS.len(), 0..AGENTS.len()), 1..120)
}

fn arb_features() -> impl Strategy<Value = FeatureVector> {
    (0u64..1_000_000, 0u64..100_000, 0u64..1_000_000, 0.0f64..20.0).prop_map(
        |(requests, unique_ips, top_path_count, ua_entropy)| FeatureVector {
            requests,
            unique_ips,
            top_path_count,
            ua_entropy,
        },
    )
}

proptest! {
    /// With non-decreasing timestamps the window holds exactly the events no
    /// older than the duration, and every map agrees with those events.
    #[test]
    fn window_matches_brute_force(stream in arb_stream(), half_secs in 1u8..40) {
        let duration = f64::from(half_secs) * 0.5;
        let mut window = EventWindow::new(duration).unwrap();
        let mut seen: Vec<Event> = Vec::new();
        let mut ts = 0.0;

        for (step, ip, path, ua) in stream {
            ts += f64::from(step) * 0.5;
            let event = Event::new(ts, IPS[ip], PATHS[path], AGENTS[ua]);
            seen.push(event.clone());
            window.add(event);

            let retained: Vec<&Event> = seen.iter().filter(|e| ts - e.timestamp <= duration).collect();
            let features = window.features();
            prop_assert_eq!(features.requests as usize, retained.len());
            prop_assert_eq!(window.len(), retained.len());

            let ips: HashSet<&str> = retained.iter().map(|e| e.source_ip.as_str()).collect();
            prop_assert_eq!(features.unique_ips as usize, ips.len());

            let mut paths: HashMap<&str, usize> = HashMap::new();
            for e in &retained {
                *paths.entry(e.path.as_str()).or_default() += 1;
            }
            prop_assert_eq!(features.top_path_count as usize, paths.values().copied().max().unwrap_or(0));

            let agents = retained.iter().filter(|e| !e.user_agent.is_empty()).count();
            prop_assert_eq!(window.user_agent_counts().total(), agents);
            prop_assert!(window.ip_counts().iter().all(|(_, n)| n > 0));
            prop_assert!(window.path_counts().iter().all(|(_, n)| n > 0));
            prop_assert!(window.user_agent_counts().iter().all(|(_, n)| n > 0));
            prop_assert!(features.ua_entropy >= 0.0);
        }
    }

    #[test]
    fn equal_agent_mix_gives_log2_k(k in 1usize..16, copies in 1usize..8) {
        let mut window = EventWindow::new(1_000.0).unwrap();
        let mut ts = 0.0;
        for _ in 0..copies {
            for agent in 0..k {
                window.add(Event::new(ts, "10.0.0.1", "/", format!("agent-{agent}")));
                ts += 1.0;
            }
        }
        prop_assert!((window.features().ua_entropy - (k as f64).log2()).abs() < 1e-6);
    }

    #[test]
    fn score_stays_in_bounds(
        stream in prop::collection::vec(arb_features(), 1..60),
        prior in any::<bool>(),
    ) {
        let normalization = if prior { Normalization::Prior } else { Normalization::Absorbed };
        let mut scorer = CompositeAnomalyScorer::with_config(ScoringConfig { normalization });
        let cap = 1.0 / SCORER_ALPHA.sqrt() + 1e-9;
        for features in &stream {
            let result = scorer.score(features);
            prop_assert!((0.0..=100.0).contains(&result.score));
            for feature in Feature::ALL {
                prop_assert!(result.contribution(feature) >= 0.0);
                if normalization == Normalization::Absorbed {
                    prop_assert!(result.z(feature) <= cap);
                }
            }
        }
    }
}
