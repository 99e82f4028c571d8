//! Simulation engine that drives schedules, devices, and the ambient baseline.

use std::collections::HashSet;

use chrono::{NaiveDateTime, TimeDelta};
use rand::Rng;

use crate::devices::AmbientBaseline;

use super::clock::{Clock, SimTime};
use super::schedule::{Crossing, ScheduleEntry};
use super::types::{MinuteRecord, SimConfig};

/// Simulation engine owning every schedule entry and the random source.
///
/// Generic over `R: Rng` so tests can drive it with scripted draws. The
/// engine is strictly sequential: each call to [`Engine::step`] simulates
/// exactly one minute, in increasing order.
pub struct Engine<R: Rng> {
    config: SimConfig,
    entries: Vec<ScheduleEntry>,
    ambient: AmbientBaseline,
    clock: Clock,
    epoch: NaiveDateTime,
    rng: R,
}

impl<R: Rng> Engine<R> {
    /// Creates a new simulation engine.
    ///
    /// Entries are sorted by name once here; that order drives both the
    /// per-minute iteration and the output columns.
    ///
    /// # Arguments
    ///
    /// * `config` - Simulation configuration
    /// * `entries` - Schedule entries (names must be unique)
    /// * `ambient` - Background load generator
    /// * `rng` - Random source used for every stochastic decision of the run
    ///
    /// # Panics
    ///
    /// Panics if two entries share a name.
    pub fn new(
        config: SimConfig,
        mut entries: Vec<ScheduleEntry>,
        ambient: AmbientBaseline,
        rng: R,
    ) -> Self {
        let mut seen = HashSet::new();
        for e in &entries {
            assert!(seen.insert(e.name.as_str()), "duplicate entry name \"{}\"", e.name);
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let clock = Clock::new(config.days);
        let epoch = config.start_date.and_time(chrono::NaiveTime::MIN);

        Self {
            config,
            entries,
            ambient,
            clock,
            epoch,
            rng,
        }
    }

    /// Device names in output column order.
    pub fn device_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Schedule entries in output column order.
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Returns a reference to the simulation configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Minutes left to simulate.
    pub fn remaining(&self) -> usize {
        self.clock.remaining()
    }

    /// Simulates the next minute.
    ///
    /// For every entry, in name order: apply the start crossing, then the end
    /// crossing, record the on flag, and advance the device one minute. The
    /// ambient baseline is added to the summed device power.
    ///
    /// # Returns
    ///
    /// The record for the simulated minute, or `None` once every minute of
    /// the configured days has been produced.
    pub fn step(&mut self) -> Option<MinuteRecord> {
        let now = self.clock.tick()?;
        Some(self.simulate_minute(now))
    }

    fn simulate_minute(&mut self, now: SimTime) -> MinuteRecord {
        let n = self.entries.len();
        let mut on = Vec::with_capacity(n);
        let mut device_power_w = Vec::with_capacity(n);

        for entry in &mut self.entries {
            let _span =
                tracing::debug_span!("device", name = %entry.name, day = now.day, time = %now.time)
                    .entered();

            let crossing =
                entry.apply_crossings(now.time, self.config.switch_probability, &mut self.rng);
            if let Some(crossing) = crossing {
                tracing::debug!(
                    switched_on = crossing == Crossing::SwitchedOn,
                    "schedule crossing"
                );
            }

            on.push(entry.device.is_on());
            device_power_w.push(entry.device.tick(&mut self.rng));
        }

        let ambient_w = self.ambient.power_at(now.index);
        let power_w = device_power_w.iter().sum::<f64>() + ambient_w;

        MinuteRecord {
            minute: now.index,
            timestamp: self.epoch + TimeDelta::minutes(now.index as i64),
            power_w,
            ambient_w,
            device_power_w,
            on,
        }
    }

    /// Executes all remaining minutes and returns the complete record vector.
    pub fn run(&mut self) -> Vec<MinuteRecord> {
        let mut records = Vec::with_capacity(self.remaining());
        while let Some(r) = self.step() {
            records.push(r);
        }
        records
    }
}

impl<R: Rng> Iterator for Engine<R> {
    type Item = MinuteRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}
