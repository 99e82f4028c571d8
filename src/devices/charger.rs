use super::curve::{Activation, DeviceConfig, Profile, compute_power};
use super::types::SwitchState;

/// A capacity-limited charger (e.g. an electric car).
///
/// Draws along a sigmoid curve while on and switches itself off once the
/// energy delivered in the current run, `on_time * power / 60`, exceeds
/// `capacity`. The minute that crosses the limit still reports its power;
/// the charger is off from the following minute until switched on again.
///
/// # Examples
///
/// ```
/// use powgen::devices::{Charger, Device};
///
/// let mut charger = Device::from(Charger::new(600.0, 50.0));
/// charger.set_on(true);
/// let mut rng = rand::rng();
/// let minutes_on = (0..20).filter(|_| charger.tick(&mut rng) > 0.0).count();
/// assert_eq!(minutes_on, 6);
/// ```
#[derive(Debug, Clone)]
pub struct Charger {
    /// Electrical configuration (sigmoid activation, steady output).
    pub config: DeviceConfig,

    /// Energy budget per run, in watt-hours.
    pub capacity: f64,

    pub(crate) switch: SwitchState,
}

impl Charger {
    /// Creates a switched-off charger.
    ///
    /// # Arguments
    ///
    /// * `power` - Nominal power in watts (must be > 0)
    /// * `capacity` - Energy budget per run (must be >= 0)
    ///
    /// # Panics
    ///
    /// Panics if `power` is not positive or `capacity` is negative.
    pub fn new(power: f64, capacity: f64) -> Self {
        assert!(capacity >= 0.0, "capacity must be >= 0");
        Self {
            config: DeviceConfig::new(power, Activation::Sigmoid, Profile::On),
            capacity,
            switch: SwitchState::default(),
        }
    }

    /// Energy delivered so far in the current run.
    pub fn delivered(&self) -> f64 {
        f64::from(self.switch.on_time) * self.config.power / 60.0
    }

    /// Advances one minute and returns the power drawn in watts.
    pub fn tick(&mut self) -> f64 {
        if !self.switch.is_on {
            self.switch.on_time = 0;
            return 0.0;
        }

        self.switch.on_time += 1;
        let power = compute_power(&self.config, self.switch.on_time);
        let delivered = self.delivered();
        if delivered > self.capacity {
            tracing::debug!(delivered, capacity = self.capacity, "charger reached capacity");
            self.switch.set_on(false);
        }
        power
    }
}
