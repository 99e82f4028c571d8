use rand::Rng;

use super::curve::{Activation, DeviceConfig, Profile, compute_power};
use super::types::SwitchState;

/// Heat gained per minute of heating, per kilowatt, before noise.
const HEATING_GAIN: f64 = 0.7;
/// Constant ambient loss per minute.
const AMBIENT_LOSS: f64 = 0.5 / 60.0;
/// Divisor of the logarithmic loss term.
const LOG_LOSS_DIVISOR: f64 = 20.0;
/// Floor applied to the heat before taking its logarithm.
const LOG_FLOOR: f64 = 0.1;
/// Heating stops above `target * UPPER_BAND`.
const UPPER_BAND: f64 = 1.2;
/// Heating restarts below `target * LOWER_BAND`.
const LOWER_BAND: f64 = 0.8;

/// A thermostat-controlled resistive heat cable.
///
/// The cable alternates between two states: **heating** (`switch.is_on`) and
/// **idle**. While heating, the simulated heat rises by a noisy amount every
/// minute until it exceeds 120% of the target temperature. While idle, heat
/// decays by a constant term plus a logarithmic term until it drops below 80%
/// of the target, at which point heating resumes.
///
/// The model is illustrative; `current_heat` is not a calibrated temperature.
///
/// # Examples
///
/// ```
/// use powgen::devices::HeatCable;
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let mut cable = HeatCable::new(1600.0, 30.0);
/// let mut rng = StdRng::seed_from_u64(7);
/// let drawn: f64 = (0..24 * 60).map(|_| cable.tick(&mut rng)).sum();
/// assert!(drawn > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct HeatCable {
    /// Electrical configuration (boolean activation, steady output).
    pub config: DeviceConfig,

    /// Thermostat set point.
    pub target_temperature: f64,

    /// Simulated accumulated heat.
    pub current_heat: f64,

    pub(crate) switch: SwitchState,
}

impl HeatCable {
    /// Creates an idle heat cable whose heat starts at the set point.
    ///
    /// # Arguments
    ///
    /// * `power` - Nominal power in watts (must be > 0)
    /// * `target_temperature` - Thermostat set point
    ///
    /// # Panics
    ///
    /// Panics if `power` is not positive.
    pub fn new(power: f64, target_temperature: f64) -> Self {
        Self {
            config: DeviceConfig::new(power, Activation::Boolean, Profile::On),
            target_temperature,
            current_heat: target_temperature,
            switch: SwitchState::default(),
        }
    }

    /// Whether the cable is in the heating state.
    pub fn is_heating(&self) -> bool {
        self.switch.is_on
    }

    /// Minutes elapsed in the current heating run.
    pub fn on_time(&self) -> u32 {
        self.switch.on_time
    }

    /// Advances the thermostat by one minute and returns the power drawn in watts.
    ///
    /// A uniform noise draw is taken from `rng` only while heating.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        self.step(|| rng.random::<f64>())
    }

    /// Advances one minute using `noise` in `[0, 1)` as the heating noise draw.
    pub fn tick_with_noise(&mut self, noise: f64) -> f64 {
        self.step(|| noise)
    }

    fn step(&mut self, noise: impl FnOnce() -> f64) -> f64 {
        if self.switch.is_on {
            if self.current_heat > self.target_temperature * UPPER_BAND {
                self.switch.set_on(false);
                tracing::debug!(heat = self.current_heat, "heat cable reached upper band");
                return 0.0;
            }
            self.switch.on_time += 1;
            self.current_heat += (self.config.power / 1000.0) * HEATING_GAIN * noise();
            compute_power(&self.config, self.switch.on_time)
        } else {
            self.current_heat -=
                AMBIENT_LOSS + self.current_heat.max(LOG_FLOOR).ln() / LOG_LOSS_DIVISOR;
            if self.current_heat < self.target_temperature * LOWER_BAND {
                self.switch.set_on(true);
                tracing::debug!(heat = self.current_heat, "heat cable dropped below lower band");
                return compute_power(&self.config, self.switch.on_time);
            }
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn starts_idle_at_set_point() {
        let cable = HeatCable::new(1600.0, 30.0);
        assert!(!cable.is_heating());
        assert_eq!(cable.current_heat, 30.0);
        assert_eq!(cable.on_time(), 0);
    }

    #[test]
    fn idle_cooling_eventually_triggers_heating() {
        let mut cable = HeatCable::new(1600.0, 30.0);
        let mut ticks = 0;
        let mut last = 0.0;
        while !cable.is_heating() {
            last = cable.tick_with_noise(0.0);
            ticks += 1;
            assert!(ticks < 10_000, "cable never started heating");
        }
        assert!(cable.current_heat < 30.0 * 0.8);
        // cold-start power at on_time 0
        assert_eq!(last, 1600.0);
        assert_eq!(cable.on_time(), 0);
    }

    #[test]
    fn idle_returns_zero_until_threshold() {
        let mut cable = HeatCable::new(1600.0, 30.0);
        let p = cable.tick_with_noise(0.5);
        assert_eq!(p, 0.0);
        assert!(cable.current_heat < 30.0);
    }

    #[test]
    fn heating_stops_above_upper_band() {
        let mut cable = HeatCable::new(1600.0, 30.0);
        cable.switch.set_on(true);
        cable.switch.on_time = 12;
        cable.current_heat = 36.5;
        assert_eq!(cable.tick_with_noise(0.9), 0.0);
        assert!(!cable.is_heating());
        assert_eq!(cable.on_time(), 0);
    }

    #[test]
    fn heating_increments_on_time_and_adds_heat() {
        let mut cable = HeatCable::new(1000.0, 30.0);
        cable.switch.set_on(true);
        cable.current_heat = 20.0;

        for expected in 1..=5 {
            let p = cable.tick_with_noise(0.5);
            assert_eq!(p, 1000.0);
            assert_eq!(cable.on_time(), expected);
        }
        assert!((cable.current_heat - (20.0 + 5.0 * 0.35)).abs() < 1e-9);
    }

    #[test]
    fn log_floor_keeps_cooling_finite() {
        let mut cable = HeatCable::new(1000.0, 0.0);
        cable.current_heat = -5.0;
        cable.tick_with_noise(0.0);
        assert!(cable.current_heat.is_finite());
    }

    #[test]
    fn thermostat_cycles_over_a_day() {
        let mut cable = HeatCable::new(1600.0, 30.0);
        let mut rng = StdRng::seed_from_u64(42);
        let mut transitions = 0;
        let mut was_on = cable.is_heating();
        for _ in 0..24 * 60 {
            cable.tick(&mut rng);
            if cable.is_heating() != was_on {
                transitions += 1;
                was_on = cable.is_heating();
            }
            if !cable.is_heating() {
                assert_eq!(cable.on_time(), 0);
            }
        }
        assert!(transitions >= 2, "expected thermostat cycling, saw {transitions}");
    }
}
