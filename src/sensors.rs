pub mod moisture_probe;
pub mod sensor;
pub mod simulated_probe;

#[cfg(target_os = "espidf")]
pub mod moisture_sensor;

pub use moisture_probe::MoistureProbe;
pub use sensor::Sensor;
pub use simulated_probe::SimulatedProbe;
