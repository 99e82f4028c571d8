//! Appliance simulation components.

/// Ambient background load generator.
pub mod ambient;
/// Capacity-limited charger model.
pub mod charger;
/// Flat resistive load model.
pub mod coffee_pot;
pub mod curve;
/// Thermostat-controlled heat cable model.
pub mod heat_cable;
/// Ramped, duty-cycled heating element model.
pub mod stove;
pub mod types;

// Re-export the main types for convenience
pub use ambient::AmbientBaseline;
pub use charger::Charger;
pub use coffee_pot::CoffeePot;
pub use curve::{Activation, DeviceConfig, Profile, compute_power};
pub use heat_cable::HeatCable;
pub use stove::Stove;
pub use types::{Device, DeviceKind, SwitchState, UnknownDeviceKind};
