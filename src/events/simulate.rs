//! Synthetic access traffic: a seeded stand-in for a busy nginx log, used to
//! drive the engine in tests and benches without touching the filesystem.

use super::Event;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::net::Ipv4Addr;

pub const USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64)",
    "curl/7.68.0",
    "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)",
    "python-requests/2.25.1",
];

const IP_POOL_BASE: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 1);
const IP_POOL_SPAN: u32 = 65_535;
const BURST_PROBABILITY: f64 = 0.05;

#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Request slots per simulated second
    pub qps: u32,
    /// Size of the source IP pool cycled through
    pub unique_ips: u32,
    pub path: String,
    /// Events emitted for a slot that bursts; 0 disables bursts
    pub burst: u32,
    /// Simulated clock start (epoch seconds)
    pub start_ts: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            qps: 100,
            unique_ips: 100,
            path: "/login".to_string(),
            burst: 0,
            start_ts: 1_700_000_000.0,
        }
    }
}

pub struct TrafficSimulator {
    config: SimulatorConfig,
    rng: StdRng,
    clock: f64,
}

impl TrafficSimulator {
    pub fn new(config: SimulatorConfig, seed: u64) -> Self {
        let clock = config.start_ts;
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            clock,
        }
    }

    /// Start of the next simulated second.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Emit one simulated second of traffic, slots spread evenly across it.
    pub fn next_second(&mut self) -> Vec<Event> {
        let slots = self.config.qps.max(1);
        let step = 1.0 / f64::from(slots);
        let mut out = Vec::with_capacity(slots as usize);
        for slot in 0..slots {
            let ts = self.clock + f64::from(slot) * step;
            let emit = if self.config.burst > 0 && self.rng.gen_bool(BURST_PROBABILITY) {
                self.config.burst
            } else {
                1
            };
            for _ in 0..emit {
                out.push(self.event_at(ts));
            }
        }
        self.clock += 1.0;
        out
    }

    fn event_at(&mut self, ts: f64) -> Event {
        let idx = self.rng.gen_range(0..self.config.unique_ips.max(1));
        let ip = Ipv4Addr::from(u32::from(IP_POOL_BASE) + idx % IP_POOL_SPAN);
        let ua = USER_AGENTS.choose(&mut self.rng).copied().unwrap_or_default();
        Event::new(ts, ip.to_string(), self.config.path.clone(), ua)
    }
}
