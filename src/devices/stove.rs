use super::curve::{Activation, DeviceConfig, Profile};
use super::types::SwitchState;

/// A stove heating element.
///
/// Power ramps up linearly over the first few minutes of a run and the
/// output is duty-cycled (PWM profile). On/off is driven by the schedule.
#[derive(Debug, Clone)]
pub struct Stove {
    /// Electrical configuration (linear activation, PWM output).
    pub config: DeviceConfig,
    pub(crate) switch: SwitchState,
}

impl Stove {
    /// Creates a switched-off stove with the given nominal power in watts.
    ///
    /// # Panics
    ///
    /// Panics if `power` is not positive.
    pub fn new(power: f64) -> Self {
        Self {
            config: DeviceConfig::new(power, Activation::Linear, Profile::Pwm),
            switch: SwitchState::default(),
        }
    }

    /// Advances one minute and returns the power drawn in watts.
    pub fn tick(&mut self) -> f64 {
        self.switch.advance(&self.config)
    }
}
