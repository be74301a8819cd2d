pub mod simulated_ticks;
pub mod system_time;

#[cfg(target_os = "espidf")]
pub mod esp_ticks;

pub use system_time::{SystemTime, TickSource, TICK_RANGE};
