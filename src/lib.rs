use mutually_exclusive_features::exactly_one_of;

exactly_one_of!("delay-hang", "delay-error");

#[cfg(target_os = "espidf")]
pub mod board;
pub mod configuration;
pub mod error;
pub mod sampling;
pub mod sensors;
pub mod time;
