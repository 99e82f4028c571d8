//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;

use rand::RngCore;

use powgen::devices::AmbientBaseline;
use powgen::sim::engine::Engine;
use powgen::sim::schedule::ScheduleEntry;
use powgen::sim::types::SimConfig;

/// Random source replaying a fixed list of uniform draws.
///
/// Each scripted value `x` in `[0, 1)` is encoded so that `rng.random::<f64>()`
/// returns `x`. Once the script runs out every further draw is `0.0`.
pub struct ScriptedRng {
    draws: VecDeque<f64>,
}

impl ScriptedRng {
    pub fn new(draws: &[f64]) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
        }
    }

    /// Draws not consumed yet.
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let x = self.draws.pop_front().unwrap_or(0.0);
        ((x * (1u64 << 53) as f64) as u64) << 11
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

/// One-day configuration with seed 42 and the given crossing probability.
pub fn one_day(probability: f64) -> SimConfig {
    SimConfig::new(1, 42).with_switch_probability(probability)
}

/// Engine over `entries` with the default ambient baseline.
pub fn engine_with<R: rand::Rng>(
    config: SimConfig,
    entries: Vec<ScheduleEntry>,
    rng: R,
) -> Engine<R> {
    Engine::new(config, entries, AmbientBaseline::default(), rng)
}
