use super::curve::{Activation, DeviceConfig, Profile};
use super::types::SwitchState;

/// A coffee pot: flat resistive draw whenever it is switched on.
#[derive(Debug, Clone)]
pub struct CoffeePot {
    /// Electrical configuration (boolean activation, steady output).
    pub config: DeviceConfig,
    pub(crate) switch: SwitchState,
}

impl CoffeePot {
    /// Creates a switched-off coffee pot with the given nominal power in watts.
    ///
    /// # Panics
    ///
    /// Panics if `power` is not positive.
    pub fn new(power: f64) -> Self {
        Self {
            config: DeviceConfig::new(power, Activation::Boolean, Profile::On),
            switch: SwitchState::default(),
        }
    }

    /// Advances one minute and returns the power drawn in watts.
    pub fn tick(&mut self) -> f64 {
        self.switch.advance(&self.config)
    }
}
