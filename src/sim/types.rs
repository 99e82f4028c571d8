//! Core simulation types: run configuration and per-minute records.

use chrono::{NaiveDate, NaiveDateTime};

use super::clock::MINUTES_PER_DAY;

/// Default probability that a due schedule crossing happens in a given minute.
pub const DEFAULT_SWITCH_PROBABILITY: f64 = 0.2;

/// Default anchor of the synthetic calendar.
pub fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Centralized simulation configuration.
///
/// # Examples
///
/// ```
/// use powgen::sim::types::SimConfig;
///
/// let cfg = SimConfig::new(2, 42);
/// assert_eq!(cfg.total_minutes(), 2880);
/// assert_eq!(cfg.switch_probability, 0.2);
/// ```
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of days to simulate.
    pub days: usize,
    /// Seed of the simulation's random source.
    pub seed: u64,
    /// Calendar date of simulated day 0.
    pub start_date: NaiveDate,
    /// Per-minute probability that a due start/end crossing happens.
    pub switch_probability: f64,
}

impl SimConfig {
    /// Creates a configuration with the default calendar anchor and crossing probability.
    ///
    /// # Panics
    ///
    /// Panics if `days` is zero.
    pub fn new(days: usize, seed: u64) -> Self {
        assert!(days > 0, "days must be > 0");
        Self {
            days,
            seed,
            start_date: default_start_date(),
            switch_probability: DEFAULT_SWITCH_PROBABILITY,
        }
    }

    /// Sets the crossing probability. `1.0` makes schedule crossings deterministic.
    ///
    /// # Panics
    ///
    /// Panics if `probability` is outside `[0, 1]`.
    pub fn with_switch_probability(mut self, probability: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&probability),
            "switch probability must be in [0, 1]"
        );
        self.switch_probability = probability;
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self
    }

    /// Total number of simulated minutes across all days.
    pub fn total_minutes(&self) -> usize {
        self.days * MINUTES_PER_DAY
    }
}

/// Complete record of one simulated minute.
#[derive(Debug, Clone, PartialEq)]
pub struct MinuteRecord {
    /// Absolute minute index since the start of the simulation.
    pub minute: usize,
    /// Synthetic timestamp of the minute.
    pub timestamp: NaiveDateTime,
    /// Aggregate power in watts, ambient baseline included.
    pub power_w: f64,
    /// Ambient baseline contribution in watts.
    pub ambient_w: f64,
    /// Per-device power in watts, in device-name order.
    pub device_power_w: Vec<f64>,
    /// Per-device on flags, in device-name order.
    pub on: Vec<bool>,
}
