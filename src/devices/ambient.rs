use std::f64::consts::PI;

use crate::noise::perlin_1d;

/// Slowly drifting background load from unmodelled household consumption.
///
/// `AmbientBaseline` adds a smooth, noise-driven draw to every emitted total,
/// independent of any device state:
///
/// `baseline(t) = max(0, offset_w + amplitude_w * perlin(t * frequency))`
///
/// where `t` is the absolute minute index since the start of the simulation.
///
/// # Examples
///
/// ```
/// use powgen::devices::AmbientBaseline;
///
/// let ambient = AmbientBaseline::default();
/// // Perlin noise is zero on lattice points, leaving only the offset
/// assert!((ambient.power_at(0) - std::f64::consts::PI * 20.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientBaseline {
    /// Mean background draw in watts
    pub offset_w: f64,

    /// Peak deviation from the mean in watts
    pub amplitude_w: f64,

    /// Noise coordinates advanced per simulated minute
    pub frequency: f64,
}

impl Default for AmbientBaseline {
    fn default() -> Self {
        Self {
            offset_w: PI * 20.0,
            amplitude_w: 50.0,
            frequency: 0.005,
        }
    }
}

impl AmbientBaseline {
    /// Creates an ambient baseline with explicit parameters.
    pub fn new(offset_w: f64, amplitude_w: f64, frequency: f64) -> Self {
        Self {
            offset_w,
            amplitude_w,
            frequency,
        }
    }

    /// Background power in watts at absolute minute `minute`. Never negative.
    pub fn power_at(&self, minute: usize) -> f64 {
        let noise = perlin_1d(minute as f64 * self.frequency);
        (self.offset_w + self.amplitude_w * noise).max(0.0)
    }
}
