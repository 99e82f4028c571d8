//! TOML-based scenario configuration and preset definitions.

use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::devices::{AmbientBaseline, Charger, CoffeePot, Device, DeviceKind, HeatCable, Stove};
use crate::sim::clock::TimeOfDay;
use crate::sim::schedule::ScheduleEntry;
use crate::sim::types::{DEFAULT_SWITCH_PROBABILITY, SimConfig, default_start_date};

/// Top-level scenario configuration parsed from TOML.
///
/// All sections have defaults. Load from TOML with
/// [`ScenarioConfig::from_toml_file`] or use [`ScenarioConfig::household`]
/// for the built-in fleet.
///
/// ```toml
/// [simulation]
/// days = 2
/// seed = 7
///
/// [devices.stove]
/// type = "Stove"
/// power = 4000
/// start = 16
/// end = "16:30"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Simulation length, calendar, and randomness.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Ambient background load parameters.
    #[serde(default)]
    pub ambient: AmbientConfig,
    /// Schedule entries keyed by device name.
    #[serde(default)]
    pub devices: BTreeMap<String, DeviceSpec>,
}

/// Simulation length, calendar, and randomness.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of days to simulate (must be > 0).
    pub days: usize,
    /// Random seed. A fresh seed is drawn when absent.
    pub seed: Option<u64>,
    /// Calendar date of the first simulated day, as `"YYYY-MM-DD"`.
    pub start_date: NaiveDate,
    /// Per-minute probability of a due schedule crossing (0.0-1.0).
    pub switch_probability: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            days: 1,
            seed: None,
            start_date: default_start_date(),
            switch_probability: DEFAULT_SWITCH_PROBABILITY,
        }
    }
}

/// Ambient background load parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AmbientConfig {
    /// Mean background draw (W).
    pub offset_w: f64,
    /// Noise amplitude (W).
    pub amplitude_w: f64,
    /// Noise coordinate advanced per minute.
    pub frequency: f64,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            offset_w: PI * 20.0,
            amplitude_w: 50.0,
            frequency: 0.005,
        }
    }
}

/// One schedule entry as written in the configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceSpec {
    /// Device type identifier: `HeatCable`, `Stove`, `CoffeePot` or `Charger`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Nominal power (W). Required for every type.
    pub power: Option<f64>,
    /// Thermostat set point. Required for `HeatCable`.
    pub temperature: Option<f64>,
    /// Energy budget per run. Required for `Charger`.
    pub capacity: Option<f64>,
    /// Start of the daily window.
    pub start: Option<ClockSpec>,
    /// End of the daily window.
    pub end: Option<ClockSpec>,
}

/// A time of day written either as a whole hour or as `"HH:MM"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ClockSpec {
    Hour(i64),
    Text(String),
}

impl ClockSpec {
    fn to_time(&self) -> Option<TimeOfDay> {
        match self {
            Self::Hour(h) => u32::try_from(*h).ok().and_then(TimeOfDay::from_hour),
            Self::Text(s) => s.parse().ok(),
        }
    }
}

impl From<u32> for ClockSpec {
    fn from(hour: u32) -> Self {
        Self::Hour(i64::from(hour))
    }
}

impl From<&str> for ClockSpec {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Errors raised while loading a scenario. All of them abort before the
/// simulation starts.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read \"{}\": {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown preset \"{name}\", available: {available}")]
    UnknownPreset { name: String, available: String },
    #[error(
        "device \"{device}\": unknown device type \"{kind}\" \
         (expected HeatCable, Stove, CoffeePot or Charger)"
    )]
    UnknownDeviceType { device: String, kind: String },
    #[error("device \"{device}\": missing required parameter `{parameter}`")]
    MissingParameter {
        device: String,
        parameter: &'static str,
    },
    #[error("device \"{device}\": invalid `{field}` time {value}, expected an hour or \"HH:MM\"")]
    InvalidTime {
        device: String,
        field: &'static str,
        value: String,
    },
    #[error("config error: {field}: {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl DeviceSpec {
    /// Creates a spec with a type and power; other parameters start empty.
    pub fn new(kind: DeviceKind, power: f64) -> Self {
        Self {
            kind: kind.to_string(),
            power: Some(power),
            ..Self::default()
        }
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn capacity(mut self, capacity: f64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Sets the daily window.
    pub fn window(mut self, start: impl Into<ClockSpec>, end: impl Into<ClockSpec>) -> Self {
        self.start = Some(start.into());
        self.end = Some(end.into());
        self
    }

    /// Builds the device described by this spec.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an unknown type, a missing required
    /// parameter, or a non-positive power.
    pub fn build_device(&self, name: &str) -> Result<Device, ConfigError> {
        let kind: DeviceKind = self
            .kind
            .parse()
            .map_err(|_| ConfigError::UnknownDeviceType {
                device: name.to_string(),
                kind: self.kind.clone(),
            })?;

        let require = |value: Option<f64>, parameter: &'static str| {
            value.ok_or_else(|| ConfigError::MissingParameter {
                device: name.to_string(),
                parameter,
            })
        };

        let power = require(self.power, "power")?;
        if !(power.is_finite() && power > 0.0) {
            return Err(ConfigError::invalid(
                format!("devices.{name}.power"),
                "must be > 0",
            ));
        }

        let device = match kind {
            DeviceKind::HeatCable => {
                HeatCable::new(power, require(self.temperature, "temperature")?).into()
            }
            DeviceKind::Stove => Stove::new(power).into(),
            DeviceKind::CoffeePot => CoffeePot::new(power).into(),
            DeviceKind::Charger => {
                let capacity = require(self.capacity, "capacity")?;
                if !(capacity >= 0.0) {
                    return Err(ConfigError::invalid(
                        format!("devices.{name}.capacity"),
                        "must be >= 0",
                    ));
                }
                Charger::new(power, capacity).into()
            }
        };
        Ok(device)
    }

    fn time(
        &self,
        name: &str,
        field: &'static str,
        spec: Option<&ClockSpec>,
    ) -> Result<Option<TimeOfDay>, ConfigError> {
        spec.map(|s| {
            s.to_time().ok_or_else(|| ConfigError::InvalidTime {
                device: name.to_string(),
                field,
                value: match s {
                    ClockSpec::Hour(h) => h.to_string(),
                    ClockSpec::Text(t) => format!("\"{t}\""),
                },
            })
        })
        .transpose()
    }

    /// Builds the schedule entry named `name`.
    ///
    /// # Errors
    ///
    /// See [`DeviceSpec::build_device`]; additionally fails on malformed times.
    pub fn build_entry(&self, name: &str) -> Result<ScheduleEntry, ConfigError> {
        let device = self.build_device(name)?;
        let start = self.time(name, "start", self.start.as_ref())?;
        let end = self.time(name, "end", self.end.as_ref())?;
        Ok(ScheduleEntry::new(name, device, start, end))
    }
}

impl ScenarioConfig {
    /// Returns the household preset: heated bathroom floor, overnight car
    /// charging, an afternoon stove session and the morning coffee.
    pub fn household() -> Self {
        let devices = BTreeMap::from([
            (
                "bathroom".to_string(),
                DeviceSpec::new(DeviceKind::HeatCable, 1600.0).temperature(30.0),
            ),
            (
                "car".to_string(),
                DeviceSpec::new(DeviceKind::Charger, 5000.0)
                    .capacity(30_000.0)
                    .window(20, "07:45"),
            ),
            (
                "stove".to_string(),
                DeviceSpec::new(DeviceKind::Stove, 4000.0).window(16, "16:30"),
            ),
            (
                "coffee".to_string(),
                DeviceSpec::new(DeviceKind::CoffeePot, 400.0).window("07:15", "07:30"),
            ),
        ]);

        Self {
            simulation: SimulationConfig::default(),
            ambient: AmbientConfig::default(),
            devices,
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["household"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "household" => Ok(Self::household()),
            _ => Err(ConfigError::UnknownPreset {
                name: name.to_string(),
                available: Self::PRESETS.join(", "),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Validates range constraints and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid. Device
    /// construction errors are reported by [`ScenarioConfig::build_schedule`].
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.simulation;

        if s.days == 0 {
            errors.push(ConfigError::invalid("simulation.days", "must be > 0"));
        }
        if !(0.0..=1.0).contains(&s.switch_probability) {
            errors.push(ConfigError::invalid(
                "simulation.switch_probability",
                "must be in [0.0, 1.0]",
            ));
        }

        let a = &self.ambient;
        if !a.offset_w.is_finite() {
            errors.push(ConfigError::invalid("ambient.offset_w", "must be finite"));
        }
        if !(a.amplitude_w.is_finite() && a.amplitude_w >= 0.0) {
            errors.push(ConfigError::invalid("ambient.amplitude_w", "must be >= 0"));
        }
        if !(a.frequency.is_finite() && a.frequency >= 0.0) {
            errors.push(ConfigError::invalid("ambient.frequency", "must be >= 0"));
        }

        for (name, d) in &self.devices {
            let kind = d.kind.parse::<DeviceKind>().ok();
            if d.temperature.is_some() && kind != Some(DeviceKind::HeatCable) {
                errors.push(ConfigError::invalid(
                    format!("devices.{name}.temperature"),
                    "only applies to HeatCable",
                ));
            }
            if d.capacity.is_some() && kind != Some(DeviceKind::Charger) {
                errors.push(ConfigError::invalid(
                    format!("devices.{name}.capacity"),
                    "only applies to Charger",
                ));
            }
        }

        errors
    }

    /// Builds every schedule entry, in name order.
    ///
    /// # Errors
    ///
    /// Returns the first device that fails to build.
    pub fn build_schedule(&self) -> Result<Vec<ScheduleEntry>, ConfigError> {
        self.devices
            .iter()
            .map(|(name, spec)| spec.build_entry(name))
            .collect()
    }

    /// Simulation configuration for a run seeded with `seed`.
    ///
    /// # Panics
    ///
    /// Panics on values [`ScenarioConfig::validate`] rejects.
    pub fn sim_config(&self, seed: u64) -> SimConfig {
        let s = &self.simulation;
        SimConfig::new(s.days, seed)
            .with_start_date(s.start_date)
            .with_switch_probability(s.switch_probability)
    }

    /// Ambient baseline generator described by the `[ambient]` section.
    pub fn ambient(&self) -> AmbientBaseline {
        let a = &self.ambient;
        AmbientBaseline::new(a.offset_w, a.amplitude_w, a.frequency)
    }
}
