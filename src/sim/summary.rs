//! Post-hoc run statistics computed from emitted minute records.

use std::fmt;

use super::types::MinuteRecord;

/// Per-device totals over a run.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSummary {
    /// Device name.
    pub name: String,
    /// Minutes during which the on flag was set.
    pub on_minutes: usize,
    /// Energy drawn by the device (kWh).
    pub energy_kwh: f64,
}

/// Aggregate statistics of a complete or partial simulation run.
///
/// Built incrementally with [`RunSummary::record`] so it can follow a
/// streamed run, or post-hoc with [`RunSummary::from_records`].
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Number of simulated minutes.
    pub minutes: usize,
    /// Total energy including the ambient baseline (kWh).
    pub energy_kwh: f64,
    /// Energy drawn by the ambient baseline alone (kWh).
    pub ambient_energy_kwh: f64,
    /// Highest aggregate power seen in any minute (W).
    pub peak_power_w: f64,
    /// Per-device totals, in output column order.
    pub devices: Vec<DeviceSummary>,
}

/// Watts held for one minute, expressed in kWh.
const W_MINUTE_TO_KWH: f64 = 1.0 / 60.0 / 1000.0;

impl RunSummary {
    /// An empty summary for the given device names.
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            minutes: 0,
            energy_kwh: 0.0,
            ambient_energy_kwh: 0.0,
            peak_power_w: 0.0,
            devices: names
                .iter()
                .map(|n| DeviceSummary {
                    name: n.as_ref().to_string(),
                    on_minutes: 0,
                    energy_kwh: 0.0,
                })
                .collect(),
        }
    }

    /// Folds one minute into the totals.
    pub fn record(&mut self, r: &MinuteRecord) {
        self.minutes += 1;
        self.energy_kwh += r.power_w * W_MINUTE_TO_KWH;
        self.ambient_energy_kwh += r.ambient_w * W_MINUTE_TO_KWH;
        self.peak_power_w = self.peak_power_w.max(r.power_w);

        for ((d, on), power) in self.devices.iter_mut().zip(&r.on).zip(&r.device_power_w) {
            if *on {
                d.on_minutes += 1;
            }
            d.energy_kwh += power * W_MINUTE_TO_KWH;
        }
    }

    /// Computes the summary from a complete record vector.
    pub fn from_records<S: AsRef<str>>(names: &[S], records: &[MinuteRecord]) -> Self {
        let mut summary = Self::new(names);
        for r in records {
            summary.record(r);
        }
        summary
    }

    /// Mean aggregate power over the run (W).
    pub fn mean_power_w(&self) -> f64 {
        if self.minutes == 0 {
            0.0
        } else {
            self.energy_kwh / (self.minutes as f64 * W_MINUTE_TO_KWH)
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Run Summary ---")?;
        writeln!(f, "Minutes simulated:     {}", self.minutes)?;
        writeln!(f, "Total energy:          {:.2} kWh", self.energy_kwh)?;
        writeln!(f, "Ambient energy:        {:.2} kWh", self.ambient_energy_kwh)?;
        writeln!(f, "Peak power:            {:.1} W", self.peak_power_w)?;
        write!(f, "Mean power:            {:.1} W", self.mean_power_w())?;
        for d in &self.devices {
            write!(
                f,
                "\n  {:<16} {:>6} min on  {:>8.2} kWh",
                d.name, d.on_minutes, d.energy_kwh
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::types::default_start_date;

    fn record(minute: usize, devices: &[(bool, f64)], ambient_w: f64) -> MinuteRecord {
        let device_power_w: Vec<f64> = devices.iter().map(|d| d.1).collect();
        MinuteRecord {
            minute,
            timestamp: default_start_date().and_hms_opt(0, 0, 0).unwrap(),
            power_w: device_power_w.iter().sum::<f64>() + ambient_w,
            ambient_w,
            device_power_w,
            on: devices.iter().map(|d| d.0).collect(),
        }
    }

    #[test]
    fn empty_run_is_zero() {
        let s = RunSummary::from_records(&["a"], &[]);
        assert_eq!(s.minutes, 0);
        assert_eq!(s.mean_power_w(), 0.0);
        assert_eq!(s.devices[0].on_minutes, 0);
    }

    #[test]
    fn an_hour_at_one_kilowatt_is_one_kwh() {
        let records: Vec<MinuteRecord> = (0..60)
            .map(|m| record(m, &[(true, 1000.0), (false, 0.0)], 0.0))
            .collect();
        let s = RunSummary::from_records(&["heater", "lamp"], &records);
        assert_eq!(s.minutes, 60);
        assert!((s.energy_kwh - 1.0).abs() < 1e-9);
        assert!((s.devices[0].energy_kwh - 1.0).abs() < 1e-9);
        assert_eq!(s.devices[0].on_minutes, 60);
        assert_eq!(s.devices[1].on_minutes, 0);
        assert!((s.mean_power_w() - 1000.0).abs() < 1e-6);
        assert_eq!(s.peak_power_w, 1000.0);
    }

    #[test]
    fn ambient_is_tracked_separately() {
        let records = vec![record(0, &[], 60.0), record(1, &[], 120.0)];
        let s = RunSummary::from_records::<&str>(&[], &records);
        assert!((s.ambient_energy_kwh - 0.003).abs() < 1e-12);
        assert_eq!(s.ambient_energy_kwh, s.energy_kwh);
        assert_eq!(s.peak_power_w, 120.0);
    }

    #[test]
    fn display_lists_devices() {
        let s = RunSummary::from_records(&["car"], &[record(0, &[(true, 5000.0)], 0.0)]);
        let text = s.to_string();
        assert!(text.contains("--- Run Summary ---"));
        assert!(text.contains("car"));
    }
}
