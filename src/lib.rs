//! Synthetic household power time-series generator.
//!
//! A fleet of simulated appliances is driven by daily schedules with
//! stochastic switching delays and summed with a noisy ambient baseline,
//! producing one aggregate power sample per minute.

pub mod config;
pub mod devices;
pub mod io;
pub mod noise;
/// Simulation clock, schedules, engine, and run statistics.
pub mod sim;
