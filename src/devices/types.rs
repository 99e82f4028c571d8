//! Common types for appliance simulation components.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use super::curve::{DeviceConfig, compute_power};
use super::{Charger, CoffeePot, HeatCable, Stove};

/// On/off state and elapsed on-time shared by every appliance.
///
/// `on_time` counts minutes in the current on-run. It is zero while the
/// device is off and restarts from zero on every off→on transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwitchState {
    /// Whether the device is currently switched on.
    pub is_on: bool,
    /// Minutes elapsed in the current on-run.
    pub on_time: u32,
}

impl SwitchState {
    /// Switches the device on or off. Any change of state restarts `on_time`.
    pub fn set_on(&mut self, on: bool) {
        if self.is_on != on {
            self.on_time = 0;
        }
        self.is_on = on;
    }

    /// Advances one minute for a device whose draw follows its curve while on.
    ///
    /// Returns the power in watts drawn during this minute.
    pub fn advance(&mut self, config: &DeviceConfig) -> f64 {
        if self.is_on {
            self.on_time += 1;
            compute_power(config, self.on_time)
        } else {
            self.on_time = 0;
            0.0
        }
    }
}

/// Appliance kinds known to the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    /// Thermostat-controlled heat cable.
    HeatCable,
    /// Ramped heating element with a duty-cycled output.
    Stove,
    /// Flat resistive load.
    CoffeePot,
    /// Capacity-limited charger.
    Charger,
}

impl DeviceKind {
    /// Every supported kind, in configuration spelling order.
    pub const ALL: [Self; 4] = [Self::HeatCable, Self::Stove, Self::CoffeePot, Self::Charger];

    /// Identifier used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HeatCable => "HeatCable",
            Self::Stove => "Stove",
            Self::CoffeePot => "CoffeePot",
            Self::Charger => "Charger",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a device type identifier is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown device type \"{0}\"")]
pub struct UnknownDeviceKind(pub String);

impl FromStr for DeviceKind {
    type Err = UnknownDeviceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownDeviceKind(s.to_string()))
    }
}

/// A simulated appliance.
///
/// The set of appliance behaviours is closed, so they are modelled as one
/// enum dispatched by [`Device::tick`] rather than trait objects.
#[derive(Debug, Clone)]
pub enum Device {
    HeatCable(HeatCable),
    Stove(Stove),
    CoffeePot(CoffeePot),
    Charger(Charger),
}

impl Device {
    /// Advances the device by one simulated minute.
    ///
    /// # Arguments
    ///
    /// * `rng` - Random source for devices with stochastic behaviour
    ///
    /// # Returns
    ///
    /// Power in watts drawn during this minute (always >= 0)
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        match self {
            Self::HeatCable(d) => d.tick(rng),
            Self::Stove(d) => d.tick(),
            Self::CoffeePot(d) => d.tick(),
            Self::Charger(d) => d.tick(),
        }
    }

    /// Whether the device is currently on.
    pub fn is_on(&self) -> bool {
        self.switch().is_on
    }

    /// Minutes elapsed in the current on-run.
    pub fn on_time(&self) -> u32 {
        self.switch().on_time
    }

    /// Switches the device on or off from outside (the schedule).
    pub fn set_on(&mut self, on: bool) {
        self.switch_mut().set_on(on);
    }

    pub fn kind(&self) -> DeviceKind {
        match self {
            Self::HeatCable(_) => DeviceKind::HeatCable,
            Self::Stove(_) => DeviceKind::Stove,
            Self::CoffeePot(_) => DeviceKind::CoffeePot,
            Self::Charger(_) => DeviceKind::Charger,
        }
    }

    fn switch(&self) -> &SwitchState {
        match self {
            Self::HeatCable(d) => &d.switch,
            Self::Stove(d) => &d.switch,
            Self::CoffeePot(d) => &d.switch,
            Self::Charger(d) => &d.switch,
        }
    }

    fn switch_mut(&mut self) -> &mut SwitchState {
        match self {
            Self::HeatCable(d) => &mut d.switch,
            Self::Stove(d) => &mut d.switch,
            Self::CoffeePot(d) => &mut d.switch,
            Self::Charger(d) => &mut d.switch,
        }
    }
}

impl From<HeatCable> for Device {
    fn from(d: HeatCable) -> Self {
        Self::HeatCable(d)
    }
}

impl From<Stove> for Device {
    fn from(d: Stove) -> Self {
        Self::Stove(d)
    }
}

impl From<CoffeePot> for Device {
    fn from(d: CoffeePot) -> Self {
        Self::CoffeePot(d)
    }
}

impl From<Charger> for Device {
    fn from(d: Charger) -> Self {
        Self::Charger(d)
    }
}
