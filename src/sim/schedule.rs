//! Daily activation windows binding named devices to the clock.

use rand::Rng;

use super::clock::TimeOfDay;
use crate::devices::Device;

/// Outcome of applying schedule crossings for one minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    /// The device was switched on by the start rule.
    SwitchedOn,
    /// The device was switched off by the end rule.
    SwitchedOff,
}

/// Bernoulli trial for one schedule crossing.
///
/// Succeeds when a uniform draw exceeds `1 - probability`. A probability of
/// 1 always succeeds and 0 never does; neither consumes a draw.
pub fn crossing_trial<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    if probability >= 1.0 {
        true
    } else if probability <= 0.0 {
        false
    } else {
        rng.random::<f64>() > 1.0 - probability
    }
}

/// A named device and its optional daily start and end times.
///
/// From `start` until midnight the start rule runs a per-minute trial that
/// switches the device on; after `end` until midnight the end rule runs a
/// trial that switches it off. Trials repeat every minute until they
/// succeed, so a crossing is delayed by a geometrically distributed number
/// of minutes. The rules are independent: once both times have passed, both
/// trials run in the same minute, start first.
#[derive(Debug, Clone)]
pub struct ScheduleEntry {
    /// Unique identifier, also the output column name.
    pub name: String,
    /// Device exclusively owned by this entry.
    pub device: Device,
    /// First minute of the day at which the start rule runs.
    pub start: Option<TimeOfDay>,
    /// The end rule runs from the minute after this one.
    pub end: Option<TimeOfDay>,
}

impl ScheduleEntry {
    pub fn new(
        name: impl Into<String>,
        device: impl Into<Device>,
        start: Option<TimeOfDay>,
        end: Option<TimeOfDay>,
    ) -> Self {
        Self {
            name: name.into(),
            device: device.into(),
            start,
            end,
        }
    }

    /// An entry with neither time; its device is never switched by the schedule.
    pub fn unscheduled(name: impl Into<String>, device: impl Into<Device>) -> Self {
        Self::new(name, device, None, None)
    }

    /// Whether the start rule runs at `now`.
    pub fn start_due(&self, now: TimeOfDay) -> bool {
        self.start.is_some_and(|start| now >= start)
    }

    /// Whether the end rule runs at `now`.
    pub fn end_due(&self, now: TimeOfDay) -> bool {
        self.end.is_some_and(|end| now > end)
    }

    /// Applies the stochastic start and end crossings for minute `now`.
    ///
    /// The start rule is evaluated before the end rule; each draws from `rng`
    /// only when its condition holds.
    pub fn apply_crossings<R: Rng + ?Sized>(
        &mut self,
        now: TimeOfDay,
        probability: f64,
        rng: &mut R,
    ) -> Option<Crossing> {
        let was_on = self.device.is_on();

        if self.start_due(now) && crossing_trial(rng, probability) {
            self.device.set_on(true);
        }
        if self.end_due(now) && crossing_trial(rng, probability) {
            self.device.set_on(false);
        }

        match (was_on, self.device.is_on()) {
            (false, true) => Some(Crossing::SwitchedOn),
            (true, false) => Some(Crossing::SwitchedOff),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::{CoffeePot, Stove};
    use rand::{SeedableRng, rngs::StdRng};

    fn t(hour: u8, minute: u8) -> TimeOfDay {
        TimeOfDay::new(hour, minute)
    }

    fn entry(start: Option<TimeOfDay>, end: Option<TimeOfDay>) -> ScheduleEntry {
        ScheduleEntry::new("pot", CoffeePot::new(400.0), start, end)
    }

    #[test]
    fn start_rule_is_inclusive() {
        let e = entry(Some(t(16, 0)), Some(t(16, 30)));
        assert!(!e.start_due(t(15, 59)));
        assert!(e.start_due(t(16, 0)));
        assert!(e.start_due(t(16, 31)));
        assert!(e.start_due(t(23, 59)));
    }

    #[test]
    fn end_rule_starts_after_end() {
        let e = entry(Some(t(16, 0)), Some(t(16, 30)));
        assert!(!e.end_due(t(16, 30)));
        assert!(e.end_due(t(16, 31)));
        assert!(!e.end_due(t(0, 0)));
    }

    #[test]
    fn overnight_times_do_not_wrap() {
        let e = entry(Some(t(20, 0)), Some(t(7, 45)));
        // neither rule runs between midnight and the end time
        assert!(!e.start_due(t(0, 0)));
        assert!(!e.end_due(t(0, 0)));
        assert!(!e.start_due(t(7, 45)));
        assert!(!e.end_due(t(7, 45)));
        // both run once the start time has passed
        assert!(e.start_due(t(20, 0)));
        assert!(e.end_due(t(20, 0)));
    }

    #[test]
    fn unscheduled_entry_is_never_switched() {
        let mut e = ScheduleEntry::unscheduled("pot", CoffeePot::new(400.0));
        let mut rng = StdRng::seed_from_u64(3);
        for m in 0..1440 {
            let now = TimeOfDay::from_minute_of_day(m);
            assert_eq!(e.apply_crossings(now, 1.0, &mut rng), None);
        }
        assert!(!e.device.is_on());
    }

    #[test]
    fn certain_crossings_follow_start_and_end() {
        let mut e = entry(Some(t(16, 0)), Some(t(16, 30)));
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(e.apply_crossings(t(15, 59), 1.0, &mut rng), None);
        assert_eq!(
            e.apply_crossings(t(16, 0), 1.0, &mut rng),
            Some(Crossing::SwitchedOn)
        );
        assert_eq!(e.apply_crossings(t(16, 30), 1.0, &mut rng), None);
        assert!(e.device.is_on());
        assert_eq!(
            e.apply_crossings(t(16, 31), 1.0, &mut rng),
            Some(Crossing::SwitchedOff)
        );
        // both rules run from here on; start then end leaves it off
        assert_eq!(e.apply_crossings(t(20, 0), 1.0, &mut rng), None);
        assert!(!e.device.is_on());
    }

    #[test]
    fn end_only_entry_is_switched_off() {
        let mut e = entry(None, Some(t(12, 0)));
        let mut rng = StdRng::seed_from_u64(3);
        e.device.set_on(true);

        assert_eq!(e.apply_crossings(t(12, 0), 1.0, &mut rng), None);
        assert!(e.device.is_on());
        assert_eq!(
            e.apply_crossings(t(12, 1), 1.0, &mut rng),
            Some(Crossing::SwitchedOff)
        );
        // never switched back on
        for m in 12 * 60 + 2..24 * 60 {
            assert_eq!(
                e.apply_crossings(TimeOfDay::from_minute_of_day(m), 1.0, &mut rng),
                None
            );
        }
    }

    #[test]
    fn zero_probability_never_switches() {
        let mut e = entry(Some(t(0, 0)), None);
        let mut rng = StdRng::seed_from_u64(3);
        for m in 0..1440 {
            e.apply_crossings(TimeOfDay::from_minute_of_day(m), 0.0, &mut rng);
        }
        assert!(!e.device.is_on());
    }

    #[test]
    fn stochastic_start_is_eventually_taken() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut delays = Vec::new();
        for _ in 0..200 {
            let mut e = ScheduleEntry::new("stove", Stove::new(4000.0), Some(t(8, 0)), None);
            let mut minute = 8 * 60;
            while e.apply_crossings(TimeOfDay::from_minute_of_day(minute), 0.2, &mut rng)
                != Some(Crossing::SwitchedOn)
            {
                minute += 1;
                assert!(minute < 24 * 60, "start never crossed");
            }
            delays.push(minute - 8 * 60);
        }
        let mean = delays.iter().sum::<usize>() as f64 / delays.len() as f64;
        // geometric with p = 0.2 counted from zero has mean 4
        assert!((2.5..6.0).contains(&mean), "mean delay {mean}");
        assert!(delays.contains(&0));
    }
}
