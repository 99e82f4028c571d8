/// Minute clock and time-of-day types.
pub mod clock;
pub mod engine;
/// Daily activation windows and stochastic crossings.
pub mod schedule;
pub mod summary;
pub mod types;
