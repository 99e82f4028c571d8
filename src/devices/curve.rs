//! Power-curve shaping shared by all appliance models.

/// Shape of the power curve over a device's on-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Full nominal power from the first on-minute.
    Boolean,
    /// Ramps up over the first few minutes: `power / max(1, 4.5 - on_time)`.
    Linear,
    /// Logistic S-curve approaching nominal power: `power * σ(on_time / 13)`.
    Sigmoid,
}

/// Output gating applied after the activation shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Shaped power passes through unchanged.
    On,
    /// Periodic duty-cycle notch: output is zero whenever `on_time % 19 == 17`.
    Pwm,
}

/// Period of the PWM notch in minutes.
const PWM_PERIOD: u32 = 19;
/// Phase within the PWM period at which output is gated off.
const PWM_NOTCH: u32 = 17;
/// Minutes of on-time over which the linear ramp reaches full power.
const LINEAR_RAMP: f64 = 4.5;
/// Time constant of the sigmoid activation, in minutes.
const SIGMOID_SCALE: f64 = 13.0;

/// Static electrical configuration of an appliance.
///
/// Created once when a device is built and never mutated afterwards.
///
/// # Examples
///
/// ```
/// use powgen::devices::curve::{Activation, DeviceConfig, Profile};
///
/// let cfg = DeviceConfig::new(400.0, Activation::Boolean, Profile::On);
/// assert_eq!(cfg.power_at(10), 400.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceConfig {
    /// Nominal power draw in watts.
    pub power: f64,
    /// Activation shape over on-time.
    pub activation: Activation,
    /// Output gating profile.
    pub profile: Profile,
}

impl DeviceConfig {
    /// Creates a new device configuration.
    ///
    /// # Panics
    ///
    /// Panics if `power` is not a positive finite number.
    pub fn new(power: f64, activation: Activation, profile: Profile) -> Self {
        assert!(power.is_finite() && power > 0.0, "power must be > 0");
        Self {
            power,
            activation,
            profile,
        }
    }

    /// Instantaneous power in watts after `on_time` minutes. See [`compute_power`].
    pub fn power_at(&self, on_time: u32) -> f64 {
        compute_power(self, on_time)
    }
}

/// Maps a device configuration and its elapsed on-time to a power draw in watts.
///
/// The activation shape is applied first, then the output profile gates it.
/// Pure: identical inputs always give identical output. The linear divisor is
/// clamped to at least 1 so the ramp saturates at nominal power instead of
/// blowing up once `on_time` passes 3.5 minutes.
pub fn compute_power(config: &DeviceConfig, on_time: u32) -> f64 {
    let t = f64::from(on_time);

    let shaped = match config.activation {
        Activation::Boolean => config.power,
        Activation::Linear => config.power / (LINEAR_RAMP - t).max(1.0),
        Activation::Sigmoid => config.power * (1.0 / (1.0 + (-t / SIGMOID_SCALE).exp())),
    };

    match config.profile {
        Profile::On => shaped,
        Profile::Pwm if on_time % PWM_PERIOD == PWM_NOTCH => 0.0,
        Profile::Pwm => shaped,
    }
}
