use std::fmt;
use std::str::FromStr;

/// Minutes in one simulated day.
pub const MINUTES_PER_DAY: usize = 24 * 60;

/// A wall-clock time of day at minute resolution.
///
/// Ordering is lexicographic on `(hour, minute)`.
///
/// # Examples
///
/// ```
/// use powgen::sim::clock::TimeOfDay;
///
/// let t: TimeOfDay = "07:45".parse().unwrap();
/// assert_eq!(t, TimeOfDay::new(7, 45));
/// assert!(TimeOfDay::new(8, 0) > t);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    /// Creates a time of day.
    ///
    /// # Panics
    ///
    /// Panics if `hour > 23` or `minute > 59`.
    pub fn new(hour: u8, minute: u8) -> Self {
        Self::checked(u32::from(hour), u32::from(minute))
            .unwrap_or_else(|| panic!("invalid time of day {hour}:{minute}"))
    }

    /// Creates a time of day, returning `None` when out of range.
    pub fn checked(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self {
                hour: hour as u8,
                minute: minute as u8,
            })
        } else {
            None
        }
    }

    /// Whole hour with the minute at zero.
    pub fn from_hour(hour: u32) -> Option<Self> {
        Self::checked(hour, 0)
    }

    /// Time of day of the minute with index `minute_of_day` (wraps daily).
    pub fn from_minute_of_day(minute_of_day: usize) -> Self {
        let m = minute_of_day % MINUTES_PER_DAY;
        Self {
            hour: (m / 60) as u8,
            minute: (m % 60) as u8,
        }
    }

    /// Minutes since midnight.
    pub fn minute_of_day(self) -> usize {
        usize::from(self.hour) * 60 + usize::from(self.minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Error returned when a time of day cannot be parsed from `"HH:MM"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time of day \"{0}\", expected HH:MM")]
pub struct ParseTimeError(pub String);

impl FromStr for TimeOfDay {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseTimeError(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(err)?;
        let hour = h.parse::<u32>().map_err(|_| err())?;
        let minute = m.parse::<u32>().map_err(|_| err())?;
        Self::checked(hour, minute).ok_or_else(err)
    }
}

/// Position of one simulated minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimTime {
    /// Absolute minute index since the start of the simulation.
    pub index: usize,
    /// Zero-based simulated day.
    pub day: usize,
    /// Time of day within `day`.
    pub time: TimeOfDay,
}

impl SimTime {
    pub fn from_index(index: usize) -> Self {
        Self {
            index,
            day: index / MINUTES_PER_DAY,
            time: TimeOfDay::from_minute_of_day(index),
        }
    }
}

/// A simulation clock that walks minutes over a fixed number of days.
///
/// Minutes are produced strictly in increasing order, nested day → hour → minute.
///
/// # Examples
///
/// ```
/// use powgen::sim::clock::Clock;
///
/// let mut clock = Clock::new(1);
/// let first = clock.tick().unwrap();
/// assert_eq!((first.day, first.time.hour, first.time.minute), (0, 0, 0));
/// assert_eq!(clock.remaining(), 1439);
/// ```
pub struct Clock {
    /// Next minute index to hand out
    current: usize,
    /// Total minutes to run in the simulation
    total: usize,
}

impl Clock {
    /// Creates a clock covering `days` whole days.
    pub fn new(days: usize) -> Self {
        Self {
            current: 0,
            total: days * MINUTES_PER_DAY,
        }
    }

    /// Advances the clock by one minute.
    ///
    /// # Returns
    ///
    /// * `Some(time)` - The minute being simulated (starting from minute 0)
    /// * `None` - If the clock has reached its total minutes
    pub fn tick(&mut self) -> Option<SimTime> {
        if self.current < self.total {
            let time = SimTime::from_index(self.current);
            self.current += 1;
            Some(time)
        } else {
            None
        }
    }

    /// Minutes left before the clock completes.
    pub fn remaining(&self) -> usize {
        self.total - self.current
    }
}
