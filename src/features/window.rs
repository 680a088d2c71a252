//! Sliding window: events arrive at the tail, age out from the head.
//!
//! Aggregates are maintained incrementally on insert and evict, so `add` is
//! O(1) amortized and `features` costs O(distinct paths + distinct agents).
//! Eviction is measured against the newest event's timestamp unless the caller
//! supplies a reference time; out-of-order timestamps can therefore leave a
//! stale head in place until a later event (or `evict`) pushes it out.

use super::{CountedMap, FeatureVector};
use crate::error::{EngineError, EngineResult};
use crate::events::{now_secs, Event};
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct EventWindow {
    duration_secs: f64,
    events: VecDeque<Event>,
    ips: CountedMap,
    paths: CountedMap,
    user_agents: CountedMap,
}

impl EventWindow {
    pub fn new(duration_secs: f64) -> EngineResult<Self> {
        if !(duration_secs.is_finite() && duration_secs > 0.0) {
            return Err(EngineError::InvalidWindowDuration(duration_secs));
        }
        Ok(Self {
            duration_secs,
            events: VecDeque::new(),
            ips: CountedMap::new(),
            paths: CountedMap::new(),
            user_agents: CountedMap::new(),
        })
    }

    /// Append an event and evict relative to its own timestamp.
    pub fn add(&mut self, event: Event) -> usize {
        let now = event.timestamp;
        self.add_at(event, now)
    }

    /// Append an event and evict relative to `now`. Returns the number evicted.
    pub fn add_at(&mut self, event: Event, now: f64) -> usize {
        self.ips.increment(&event.source_ip);
        self.paths.increment(&event.path);
        if event.has_user_agent() {
            self.user_agents.increment(&event.user_agent);
        }
        self.events.push_back(event);
        self.evict(now)
    }

    /// Drop every head event older than the window relative to `now`.
    pub fn evict(&mut self, now: f64) -> usize {
        let mut evicted = 0;
        while let Some(oldest) = self.events.front() {
            if now - oldest.timestamp <= self.duration_secs {
                break;
            }
            if let Some(event) = self.events.pop_front() {
                self.forget(&event);
                evicted += 1;
            }
        }
        evicted
    }

    /// Idle-period eviction against the wall clock.
    pub fn evict_now(&mut self) -> usize {
        self.evict(now_secs())
    }

    fn forget(&mut self, event: &Event) {
        self.ips.decrement(&event.source_ip);
        self.paths.decrement(&event.path);
        if event.has_user_agent() {
            self.user_agents.decrement(&event.user_agent);
        }
    }

    pub fn features(&self) -> FeatureVector {
        FeatureVector {
            requests: self.events.len() as u64,
            unique_ips: self.ips.len() as u64,
            top_path_count: self.paths.max_count() as u64,
            ua_entropy: self.user_agents.entropy_bits(),
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Retained events, oldest first.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn ip_counts(&self) -> &CountedMap {
        &self.ips
    }

    pub fn path_counts(&self) -> &CountedMap {
        &self.paths
    }

    pub fn user_agent_counts(&self) -> &CountedMap {
        &self.user_agents
    }

    /// Busiest source IPs, count descending.
    pub fn top_offenders(&self, limit: usize) -> Vec<(String, usize)> {
        self.ips
            .top(limit)
            .into_iter()
            .map(|(ip, n)| (ip.to_owned(), n))
            .collect()
    }

    pub fn top_path(&self) -> Option<(&str, usize)> {
        self.paths.top(1).into_iter().next()
    }
}
